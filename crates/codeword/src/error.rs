//! Unified error type for join-code lookups.

use std::time::Duration;

use codeword_auth::AuthError;
use codeword_matchmaking::MatchmakingError;
use codeword_protocol::{JoinCode, ProtocolError, JOIN_CODE_PATTERN};
use codeword_transport::TransportError;
use serde::Serialize;

/// Top-level error that wraps every failure a lookup can end in.
///
/// `Display` carries the underlying cause and is meant for logs. What a
/// caller shows to users is [`LookupError::payload`], which exposes only a
/// fixed message and a stable numeric code.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No session is advertising the code.
    #[error("unknown join code {0}")]
    NotFound(JoinCode),

    /// The input isn't a well-formed join code. Nothing was contacted.
    #[error("invalid join code {input:?}, expected {pattern}")]
    InvalidCode {
        input: String,
        pattern: &'static str,
    },

    /// A credential stage failed.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// The game server couldn't be reached, rejected the login, or dropped
    /// the connection mid-query.
    #[error("could not reach game server: {0}")]
    Connection(#[from] TransportError),

    /// The game server answered with data we couldn't decode.
    #[error("malformed response from game server: {0}")]
    Protocol(#[source] ProtocolError),

    /// The whole lookup exceeded its time limit.
    #[error("lookup timed out after {0:?}")]
    TimedOut(Duration),
}

impl LookupError {
    /// Stable numeric code for this kind of failure.
    pub fn code(&self) -> u32 {
        match self {
            Self::NotFound(_) => 1,
            Self::InvalidCode { .. } => 2,
            Self::Authentication(_) => 3,
            Self::Connection(_) => 4,
            Self::Protocol(_) => 5,
            Self::TimedOut(_) => 6,
        }
    }

    /// The user-facing message for this kind of failure.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "unknown join code",
            Self::InvalidCode { .. } => "invalid join code",
            Self::Authentication(_) => "authentication failed",
            Self::Connection(_) => "could not reach game server",
            Self::Protocol(_) => "malformed response from game server",
            Self::TimedOut(_) => "lookup timed out",
        }
    }

    /// The serializable error body for callers.
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.message(),
            error_code: self.code(),
            validation_regex: match self {
                Self::InvalidCode { pattern, .. } => Some(*pattern),
                _ => None,
            },
        }
    }
}

impl From<ProtocolError> for LookupError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::InvalidJoinCode(input) => Self::InvalidCode {
                input,
                pattern: JOIN_CODE_PATTERN,
            },
            other => Self::Protocol(other),
        }
    }
}

impl From<MatchmakingError> for LookupError {
    fn from(err: MatchmakingError) -> Self {
        match err {
            MatchmakingError::NotFound(code) => Self::NotFound(code),
            MatchmakingError::Transport(e) => Self::Connection(e),
            MatchmakingError::Protocol(e) => Self::Protocol(e),
        }
    }
}

/// What a failed lookup reports to its caller.
///
/// Serializes as `{"error": .., "error_code": ..}`, plus
/// `"validation_regex"` for malformed codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: &'static str,
    pub error_code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_regex: Option<&'static str>,
}
