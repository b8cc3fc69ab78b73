//! Join-code matchmaking queries.
//!
//! A [`MatchmakeClient`] borrows an already logged-in
//! [`RpcSession`](codeword_transport::RpcSession) and turns a
//! [`JoinCode`](codeword_protocol::JoinCode) into a
//! [`SessionRecord`](codeword_protocol::SessionRecord):
//!
//! ```text
//! JoinCode → CODEWORD_SEARCH.with_codeword → browse → first candidate → decode name
//! ```
//!
//! The client never opens or closes the session; its owner does.

mod client;
mod error;

pub use client::MatchmakeClient;
pub use error::MatchmakingError;
