//! The lookup orchestrator: join code in, session record out.
//!
//! One lookup walks a strict sequence of states:
//!
//! ```text
//! Idle → Authenticating → Connecting → Querying → Disconnecting → Done
//!   │          │              │            │             │
//!   └──────────┴──────────────┴────────────┴─────────────┴──→ Errored
//! ```
//!
//! A malformed code goes straight from `Idle` to `Errored` without any I/O.
//! Once a session is open, every outcome of the query passes through
//! `Disconnecting`, so the session is closed before the result is returned.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use codeword_auth::{
    AccountService, AppAuthService, CredentialChain, CredentialSource, DeviceAuthService,
};
use codeword_cache::FileStore;
use codeword_matchmaking::MatchmakeClient;
use codeword_protocol::{JoinCode, SessionRecord};
use codeword_transport::RpcTransport;

use crate::config::{ConfigError, LookupConfig};
use crate::{LookupError, SessionConnector};

// ---------------------------------------------------------------------------
// LookupState
// ---------------------------------------------------------------------------

/// Where a lookup is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupState {
    Idle,
    Authenticating,
    Connecting,
    Querying,
    Disconnecting,
    Done,
    Errored,
}

impl LookupState {
    /// Returns `true` once the lookup has finished, either way.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Errored)
    }

    /// The next state on the success path, or `None` from a terminal state.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Authenticating),
            Self::Authenticating => Some(Self::Connecting),
            Self::Connecting => Some(Self::Querying),
            Self::Querying => Some(Self::Disconnecting),
            Self::Disconnecting => Some(Self::Done),
            Self::Done | Self::Errored => None,
        }
    }

    /// Returns `true` if moving to `target` is valid: one step forward, or
    /// to `Errored` from any state that isn't terminal.
    pub fn can_transition_to(self, target: Self) -> bool {
        if target == Self::Errored {
            return !self.is_terminal();
        }
        self.next() == Some(target)
    }
}

impl fmt::Display for LookupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Authenticating => write!(f, "Authenticating"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Querying => write!(f, "Querying"),
            Self::Disconnecting => write!(f, "Disconnecting"),
            Self::Done => write!(f, "Done"),
            Self::Errored => write!(f, "Errored"),
        }
    }
}

/// Tracks and logs one lookup's state.
struct Progress {
    state: LookupState,
}

impl Progress {
    fn new() -> Self {
        Self {
            state: LookupState::Idle,
        }
    }

    fn advance(&mut self, next: LookupState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid lookup transition {} → {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "lookup state");
        self.state = next;
    }
}

// ---------------------------------------------------------------------------
// SessionFinder
// ---------------------------------------------------------------------------

/// Finds multiplayer sessions by join code.
///
/// A finder is meant to be built once and shared (behind an `Arc`) by every
/// lookup in the process: the credential cache is what makes repeated
/// lookups cheap. Each lookup opens and closes its own RPC session.
pub struct SessionFinder<C: CredentialSource, T: RpcTransport> {
    credentials: C,
    connector: SessionConnector<T>,
    timeout: Option<Duration>,
}

impl<C: CredentialSource, T: RpcTransport> SessionFinder<C, T> {
    pub fn new(credentials: C, connector: SessionConnector<T>) -> Self {
        Self {
            credentials,
            connector,
            timeout: None,
        }
    }

    /// Bounds each whole lookup by `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    pub fn connector(&self) -> &SessionConnector<T> {
        &self.connector
    }

    /// Looks up the session advertising `code`.
    ///
    /// # Errors
    /// - [`LookupError::InvalidCode`] if `code` isn't a well-formed join
    ///   code (nothing is contacted)
    /// - [`LookupError::Authentication`] if credentials can't be obtained
    /// - [`LookupError::Connection`] if the game server can't be reached,
    ///   rejects the login, or fails the query
    /// - [`LookupError::NotFound`] if no session has this code
    /// - [`LookupError::Protocol`] if the matching session can't be decoded
    /// - [`LookupError::TimedOut`] if the time limit runs out
    pub async fn find(&self, code: &str) -> Result<SessionRecord, LookupError> {
        let mut progress = Progress::new();

        let code = match JoinCode::parse(code) {
            Ok(code) => code,
            Err(e) => {
                let err = LookupError::from(e);
                tracing::info!(error = %err, "rejected join code");
                progress.advance(LookupState::Errored);
                return Err(err);
            }
        };

        tracing::info!(%code, "looking up session");
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(&code, &mut progress))
                .await
                .unwrap_or(Err(LookupError::TimedOut(limit))),
            None => self.run(&code, &mut progress).await,
        };

        match &result {
            Ok(record) => {
                progress.advance(LookupState::Done);
                tracing::info!(
                    %code,
                    id = record.id,
                    active_players = record.active_players,
                    "session found"
                );
            }
            Err(e) => {
                progress.advance(LookupState::Errored);
                tracing::info!(%code, error = %e, error_code = e.code(), "lookup failed");
            }
        }
        result
    }

    async fn run(
        &self,
        code: &JoinCode,
        progress: &mut Progress,
    ) -> Result<SessionRecord, LookupError> {
        progress.advance(LookupState::Authenticating);
        let identity = self.credentials.credentials().await?;

        progress.advance(LookupState::Connecting);
        let mut guard = self
            .connector
            .connect(identity.user_id, &identity.identity_token)
            .await?;

        progress.advance(LookupState::Querying);
        let outcome = MatchmakeClient::new(guard.session_mut())
            .find_session_by_code(code)
            .await
            .map_err(LookupError::from);

        progress.advance(LookupState::Disconnecting);
        if let Err(e) = guard.close().await {
            tracing::warn!(%code, error = %e, "failed to close session");
        }
        outcome
    }
}

impl<D, P, A, T> SessionFinder<CredentialChain<D, P, A, FileStore>, T>
where
    D: DeviceAuthService,
    P: AppAuthService,
    A: AccountService,
    T: RpcTransport,
{
    /// Wires a finder from `config`: loads the device files, roots the
    /// credential cache at `cache_dir`, and applies the timeout.
    ///
    /// The platform services and the RPC transport are supplied by the
    /// caller.
    pub async fn from_config(
        config: &LookupConfig,
        device: D,
        app: P,
        account: A,
        transport: T,
    ) -> Result<Self, ConfigError> {
        let identity = Arc::new(config.load_device_identity().await?);
        let ticket = config.load_install_ticket().await?;

        let chain = CredentialChain::new(
            device,
            app,
            account,
            config.file_store(),
            config.chain_inputs(Arc::clone(&identity), ticket),
        );
        let connector = SessionConnector::new(transport, &config.title, identity);

        let finder = Self::new(chain, connector);
        Ok(match config.timeout() {
            Some(limit) => finder.with_timeout(limit),
            None => finder,
        })
    }
}
