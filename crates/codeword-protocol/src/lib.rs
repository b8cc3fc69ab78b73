//! Wire types for join-code session lookups.
//!
//! This crate defines the values that cross the boundary between the
//! lookup client and the matchmaking backend:
//!
//! - **Join codes** ([`JoinCode`]): the short, human-shareable code a
//!   player types in. Validated once, then passed around as a type that
//!   can't be malformed.
//! - **Search criteria** ([`SearchParams`], [`SearchCriteria`]): the
//!   fixed-shape matchmaking query. Only the codeword varies per call.
//! - **Sessions** ([`SessionSummary`], [`SessionRecord`]): what the backend
//!   returns, and what we hand back to callers.
//! - **Title and identity** ([`GameTitle`], [`DeviceIdentity`],
//!   [`InstallTicket`], [`AuthenticationInfo`]): the fixed inputs that prove
//!   who we are to the platform and the game server.
//!
//! # Architecture
//!
//! ```text
//! Auth (credentials) ─┐
//!                     ├─→ Transport (RPC session) → Matchmaking (query)
//! Protocol (types) ───┘
//! ```
//!
//! The protocol layer knows nothing about connections or caches; it only
//! validates and decodes.

mod error;
mod identity;
mod join_code;
mod search;
mod session;
mod title;

pub use error::ProtocolError;
pub use identity::{DeviceIdentity, InstallTicket};
pub use join_code::{JoinCode, JOIN_CODE_ALPHABET, JOIN_CODE_LEN, JOIN_CODE_PATTERN};
pub use search::{SearchCriteria, SearchParams, CODEWORD_SEARCH};
pub use session::{
    decode_session_name, SessionRecord, SessionSummary, SESSION_NAME_LEN,
    SESSION_NAME_OFFSET,
};
pub use title::{
    AuthenticationInfo, GameTitle, BACKEND_PORT, DEFAULT_SYSTEM_VERSION,
    ID_TOKEN_TYPE, PLATFORM_NGS_VERSION,
};
