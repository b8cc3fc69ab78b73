//! The credential chain: three cached stages, resolved lazily.
//!
//! ```text
//! identity() ──hit──→ done
//!    │miss
//!    ├─→ application_token() ──hit──→ (token)
//!    │        │miss
//!    │        └─→ device_token() ──hit/miss──→ AppAuthService
//!    ├─→ device_token()          (cache hit by now)
//!    └─→ AccountService::login
//! ```
//!
//! A stage only looks at its predecessors when its own cache entry is
//! missing or stale. With a fresh identity token, a lookup makes no
//! platform calls at all.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use codeword_cache::{CacheStore, TtlCache};
use codeword_protocol::{DeviceIdentity, InstallTicket};

use crate::{
    AccountCredentials, AccountLoginRequest, AccountService, AppAuthRequest, AppAuthService,
    ApplicationToken, AuthError, AuthStage, DeviceAuthService, DeviceToken,
    IdentityCredentials,
};

/// Produces the identity the orchestrator logs into the game server with.
///
/// [`CredentialChain`] is the production implementation; the trait exists so
/// the orchestrator doesn't carry the chain's four type parameters.
pub trait CredentialSource: Send + Sync + 'static {
    fn credentials(
        &self,
    ) -> impl Future<Output = Result<IdentityCredentials, AuthError>> + Send;
}

/// The fixed inputs of the chain, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ChainInputs {
    /// Shared with the session connector, which presents it as the TLS
    /// client identity.
    pub identity: Arc<DeviceIdentity>,
    pub ticket: InstallTicket,
    pub title_id: u64,
    pub title_version: u32,
    pub account: AccountCredentials,
    pub system_version: u32,
}

/// Device → application → account credentials, each cached on its own TTL.
pub struct CredentialChain<D, P, A, S: CacheStore> {
    device: D,
    app: P,
    account: A,
    cache: TtlCache<S>,
    inputs: ChainInputs,
    /// Indexed by `AuthStage::index()`.
    ttls: [Duration; 3],
}

impl<D, P, A, S> CredentialChain<D, P, A, S>
where
    D: DeviceAuthService,
    P: AppAuthService,
    A: AccountService,
    S: CacheStore,
{
    /// Creates a chain caching into `store`, with each stage's default TTL.
    pub fn new(device: D, app: P, account: A, store: S, inputs: ChainInputs) -> Self {
        Self {
            device,
            app,
            account,
            cache: TtlCache::new(store),
            inputs,
            ttls: AuthStage::ALL.map(AuthStage::default_ttl),
        }
    }

    /// Overrides the freshness window for one stage.
    pub fn with_ttl(mut self, stage: AuthStage, ttl: Duration) -> Self {
        self.ttls[stage.index()] = ttl;
        self
    }

    pub fn ttl(&self, stage: AuthStage) -> Duration {
        self.ttls[stage.index()]
    }

    pub fn cache(&self) -> &TtlCache<S> {
        &self.cache
    }

    pub fn inputs(&self) -> &ChainInputs {
        &self.inputs
    }

    /// Stage 1: the device token.
    pub async fn device_token(&self) -> Result<DeviceToken, AuthError> {
        let stage = AuthStage::DeviceAuth;
        self.cache
            .get_or_refresh(stage.cache_key(), self.ttl(stage), || async {
                tracing::info!(%stage, "requesting device token");
                let token = self
                    .device
                    .device_token(&self.inputs.identity, self.inputs.system_version)
                    .await
                    .map_err(|source| AuthError::Stage { stage, source })?;
                Ok::<_, AuthError>(DeviceToken(token))
            })
            .await
    }

    /// Stage 2: the application token. Resolves the device token only if
    /// the application token has to be refreshed.
    pub async fn application_token(&self) -> Result<ApplicationToken, AuthError> {
        let stage = AuthStage::AppAuth;
        self.cache
            .get_or_refresh(stage.cache_key(), self.ttl(stage), || async {
                let device_token = self.device_token().await?;

                tracing::info!(%stage, title_id = self.inputs.title_id, "requesting application token");
                let token = self
                    .app
                    .application_token(AppAuthRequest {
                        title_id: self.inputs.title_id,
                        title_version: self.inputs.title_version,
                        device_token: &device_token,
                        ticket: &self.inputs.ticket,
                        system_version: self.inputs.system_version,
                    })
                    .await
                    .map_err(|source| AuthError::Stage { stage, source })?;
                Ok::<_, AuthError>(ApplicationToken(token))
            })
            .await
    }

    /// Stage 3: user id and identity token. Resolves the earlier stages
    /// only if the identity token has to be refreshed.
    pub async fn identity(&self) -> Result<IdentityCredentials, AuthError> {
        let stage = AuthStage::AccountAuth;
        self.cache
            .get_or_refresh(stage.cache_key(), self.ttl(stage), || async {
                // Application first: on its own miss it resolves the device
                // token, which the line after then reads back from cache.
                let application_token = self.application_token().await?;
                let device_token = self.device_token().await?;

                tracing::info!(
                    %stage,
                    username = %self.inputs.account.username,
                    "logging in account"
                );
                let login = self
                    .account
                    .login(AccountLoginRequest {
                        device_token: &device_token,
                        application_token: &application_token,
                        account: &self.inputs.account,
                        system_version: self.inputs.system_version,
                    })
                    .await
                    .map_err(|source| AuthError::Stage { stage, source })?;

                let user_id = u64::from_str_radix(&login.user_id, 16)
                    .map_err(|_| AuthError::MalformedUserId(login.user_id.clone()))?;
                Ok::<_, AuthError>(IdentityCredentials {
                    user_id,
                    identity_token: login.id_token,
                })
            })
            .await
    }
}

impl<D, P, A, S> CredentialSource for CredentialChain<D, P, A, S>
where
    D: DeviceAuthService,
    P: AppAuthService,
    A: AccountService,
    S: CacheStore,
{
    async fn credentials(&self) -> Result<IdentityCredentials, AuthError> {
        self.identity().await
    }
}
