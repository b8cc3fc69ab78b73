//! # Codeword
//!
//! Look up a multiplayer session by its join code.
//!
//! A lookup validates the code, obtains platform credentials (cached, see
//! [`codeword_auth`]), opens an authenticated RPC session to the title's
//! game server, runs one matchmaking search, and closes the session again:
//!
//! ```text
//! "AB123" → JoinCode → CredentialSource → SessionConnector → MatchmakeClient → SessionRecord
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codeword::prelude::*;
//!
//! // Supply the platform services and an RPC transport, then:
//! // let config = LookupConfig::load("codeword.toml").await?;
//! // let finder = SessionFinder::from_config(&config, device, app, account, transport).await?;
//! // let record = finder.find("AB123").await?;
//! // println!("{}", serde_json::to_string(&record)?);
//! ```

pub mod config;
mod connector;
mod error;
mod guard;
mod lookup;
pub mod telemetry;

pub use config::{ConfigError, DevicePaths, LookupConfig};
pub use connector::SessionConnector;
pub use error::{ErrorPayload, LookupError};
pub use guard::SessionGuard;
pub use lookup::{LookupState, SessionFinder};

pub use codeword_auth as auth;
pub use codeword_cache as cache;
pub use codeword_matchmaking as matchmaking;
pub use codeword_protocol as protocol;
pub use codeword_transport as transport;

/// The types most lookups need, in one import.
pub mod prelude {
    pub use crate::{
        ErrorPayload, LookupConfig, LookupError, SessionConnector, SessionFinder,
    };
    pub use codeword_auth::{
        AccountService, AppAuthService, CredentialChain, CredentialSource, DeviceAuthService,
    };
    pub use codeword_protocol::{GameTitle, JoinCode, SessionRecord};
    pub use codeword_transport::{RpcSession, RpcTransport};
}
