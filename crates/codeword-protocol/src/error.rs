//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. A
//! `ProtocolError` always means the bytes or strings we were handed don't
//! have the shape the protocol promises, never that the network failed.

/// Errors that can occur while validating or decoding protocol values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The input isn't a well-formed join code.
    ///
    /// Carries the rejected input so callers can log it; it is never
    /// echoed back to end users.
    #[error("invalid join code {0:?}")]
    InvalidJoinCode(String),

    /// A session's application data is too short to contain the name field.
    #[error("application data truncated: {len} bytes, need at least {needed}")]
    TruncatedApplicationData {
        /// Length of the payload we received.
        len: usize,
        /// Minimum length required to slice out the name.
        needed: usize,
    },

    /// The session name bytes are not valid UTF-16.
    #[error("session name is not valid UTF-16")]
    InvalidUtf16,
}
