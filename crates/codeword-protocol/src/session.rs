//! Matchmaking sessions as the backend reports them, and as we return them.

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Byte offset of the session name inside a session's application data.
pub const SESSION_NAME_OFFSET: usize = 12;

/// Byte length of the session name field: 10 UTF-16 code units.
pub const SESSION_NAME_LEN: usize = 20;

// ---------------------------------------------------------------------------
// SessionSummary
// ---------------------------------------------------------------------------

/// One candidate session from a matchmaking search.
///
/// `application_data` is an opaque, game-defined blob; the only part we
/// understand is the name field at [`SESSION_NAME_OFFSET`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: u32,
    pub player_count: u32,
    pub application_data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// The result of a successful lookup.
///
/// Serializes as `{"id": .., "active_players": .., "name": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: u32,
    pub active_players: u32,
    pub name: String,
}

impl SessionRecord {
    /// Decodes a record from a search candidate.
    ///
    /// # Errors
    /// Fails if the candidate's name field can't be decoded; see
    /// [`decode_session_name`].
    pub fn from_summary(summary: &SessionSummary) -> Result<Self, ProtocolError> {
        Ok(Self {
            id: summary.id,
            active_players: summary.player_count,
            name: decode_session_name(&summary.application_data)?,
        })
    }
}

/// Extracts the session name from a session's application data.
///
/// The name is bytes `12..32` interpreted as little-endian UTF-16. A leading
/// byte-order mark and trailing NUL padding are stripped, so a short name
/// comes back without filler.
///
/// # Errors
/// - [`ProtocolError::TruncatedApplicationData`] if `data` is shorter than
///   32 bytes
/// - [`ProtocolError::InvalidUtf16`] if the field holds unpaired surrogates
pub fn decode_session_name(data: &[u8]) -> Result<String, ProtocolError> {
    let end = SESSION_NAME_OFFSET + SESSION_NAME_LEN;
    let field = data
        .get(SESSION_NAME_OFFSET..end)
        .ok_or(ProtocolError::TruncatedApplicationData {
            len: data.len(),
            needed: end,
        })?;

    let units: Vec<u16> = field
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let name = String::from_utf16(&units).map_err(|_| ProtocolError::InvalidUtf16)?;
    Ok(name
        .strip_prefix('\u{feff}')
        .unwrap_or(name.as_str())
        .trim_end_matches('\0')
        .to_owned())
}
