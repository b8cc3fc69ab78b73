//! Per-title constants and the RPC login credential.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard secure port every game-server host listens on.
pub const BACKEND_PORT: u16 = 443;

/// Platform system version reported to the auth services (10.0.3).
pub const DEFAULT_SYSTEM_VERSION: u32 = 1003;

/// NGS version tag identifying the calling platform on RPC login.
pub const PLATFORM_NGS_VERSION: u32 = 4;

/// Token-type tag meaning "the token is an account identity token".
pub const ID_TOKEN_TYPE: u8 = 2;

// ---------------------------------------------------------------------------
// GameTitle
// ---------------------------------------------------------------------------

/// The fixed identifiers of one game title.
///
/// These never change for a given title/version, but they aren't secrets
/// either; they come from configuration so the same binary can target a
/// patched title version without a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTitle {
    /// Platform title id, used by application auth.
    pub title_id: u64,
    /// Title version, used by application auth.
    pub title_version: u32,
    /// Identifies the title's game-server cluster; derives the host name.
    pub game_server_id: u32,
    /// RPC access key.
    pub access_key: String,
    /// RPC protocol version.
    pub nex_version: u32,
    /// RPC client version.
    pub client_version: u32,
}

impl GameTitle {
    /// The game-server host for this title, derived from its server id.
    pub fn backend_host(&self) -> String {
        format!("g{:08x}-lp1.s.n.srv.nintendo.net", self.game_server_id)
    }
}

// ---------------------------------------------------------------------------
// AuthenticationInfo
// ---------------------------------------------------------------------------

/// The bearer credential presented during RPC login.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationInfo {
    pub token: String,
    pub ngs_version: u32,
    pub token_type: u8,
}

impl AuthenticationInfo {
    /// Wraps an identity token with this platform's fixed version tags.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ngs_version: PLATFORM_NGS_VERSION,
            token_type: ID_TOKEN_TYPE,
        }
    }
}

impl fmt::Debug for AuthenticationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationInfo")
            .field("token", &"<redacted>")
            .field("ngs_version", &self.ngs_version)
            .field("token_type", &self.token_type)
            .finish()
    }
}
