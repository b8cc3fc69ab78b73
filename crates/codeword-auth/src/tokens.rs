//! Credential values and the stages that produce them.

use std::fmt;
use std::time::Duration;

use codeword_cache::DEFAULT_TTL;
use serde::{Deserialize, Serialize};

/// Identity tokens expire server-side well before a day is up.
const IDENTITY_TOKEN_TTL: Duration = Duration::from_secs(3 * 60 * 60);

// ---------------------------------------------------------------------------
// AuthStage
// ---------------------------------------------------------------------------

/// One step of the credential chain.
///
/// The stage is the cache identity: it names the storage slot and supplies
/// the default freshness window. Stages are ordered; each depends on every
/// stage before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuthStage {
    DeviceAuth,
    AppAuth,
    AccountAuth,
}

impl AuthStage {
    /// All stages, in dependency order.
    pub const ALL: [AuthStage; 3] = [Self::DeviceAuth, Self::AppAuth, Self::AccountAuth];

    /// The cache slot this stage's output is stored under.
    pub fn cache_key(self) -> &'static str {
        match self {
            Self::DeviceAuth => "device-token",
            Self::AppAuth => "application-token",
            Self::AccountAuth => "identity-token",
        }
    }

    /// How long this stage's output is reused before being refreshed.
    pub fn default_ttl(self) -> Duration {
        match self {
            Self::DeviceAuth | Self::AppAuth => DEFAULT_TTL,
            Self::AccountAuth => IDENTITY_TOKEN_TTL,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceAuth => write!(f, "device auth"),
            Self::AppAuth => write!(f, "application auth"),
            Self::AccountAuth => write!(f, "account auth"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Bearer token proving device authenticity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceToken(pub String);

/// Bearer token proving the title is entitled to run on the device.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationToken(pub String);

/// The end of the chain: who we are on the game server, and the token that
/// proves it. Produced by one account login and cached as one unit, since
/// both halves expire together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCredentials {
    pub user_id: u64,
    pub identity_token: String,
}

// Tokens are bearer secrets; keep them out of debug logs.

impl fmt::Debug for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeviceToken(<redacted>)")
    }
}

impl fmt::Debug for ApplicationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApplicationToken(<redacted>)")
    }
}

impl fmt::Debug for IdentityCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityCredentials")
            .field("user_id", &format_args!("{:016x}", self.user_id))
            .field("identity_token", &"<redacted>")
            .finish()
    }
}
