//! Platform credential chain for game-server login.
//!
//! Logging into a game server takes an identity token, and getting one is
//! a three-hop handshake with the platform's cloud services:
//!
//! 1. **Device auth**: prove the device is genuine → device token
//! 2. **Application auth**: prove this title is entitled to run on that
//!    device → application token
//! 3. **Account auth**: log the account in using both → user id +
//!    identity token
//!
//! Each hop is slow, and each token is valid for hours, so every stage is
//! cached individually ([`CredentialChain`]). Resolution is lazy and walks
//! backwards: if the identity token is still fresh, stages 1 and 2 are
//! never touched.
//!
//! # How it fits in the stack
//!
//! ```text
//! Orchestrator (above)  ← asks a CredentialSource for (user id, token)
//!     ↕
//! Auth (this crate)     ← CredentialChain over three service traits
//!     ↕
//! Cache (below)         ← TtlCache persists each stage's result
//! ```
//!
//! The platform HTTP calls are not implemented here. Callers provide them
//! through [`DeviceAuthService`], [`AppAuthService`] and [`AccountService`].

mod chain;
mod error;
mod services;
mod tokens;

pub use chain::{ChainInputs, CredentialChain, CredentialSource};
pub use error::{AuthError, ServiceError};
pub use services::{
    AccountCredentials, AccountLogin, AccountLoginRequest, AccountService, AppAuthRequest,
    AppAuthService, DeviceAuthService,
};
pub use tokens::{ApplicationToken, AuthStage, DeviceToken, IdentityCredentials};
