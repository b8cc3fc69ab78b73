//! Error types for the matchmaking layer.

use codeword_protocol::{JoinCode, ProtocolError};
use codeword_transport::TransportError;

/// Errors that can occur while looking a session up by code.
#[derive(Debug, thiserror::Error)]
pub enum MatchmakingError {
    /// The search ran but no session is advertising this code.
    #[error("no session with join code {0}")]
    NotFound(JoinCode),

    /// The search call itself failed.
    #[error("matchmaking search failed: {0}")]
    Transport(#[from] TransportError),

    /// A session matched, but its application data couldn't be decoded.
    #[error("matched session is malformed: {0}")]
    Protocol(#[from] ProtocolError),
}
