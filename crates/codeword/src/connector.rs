//! Opens authenticated RPC sessions to a title's game server.

use std::sync::Arc;

use codeword_protocol::{AuthenticationInfo, DeviceIdentity, GameTitle};
use codeword_transport::{BackendParams, Endpoint, RpcSession, RpcTransport};

use crate::{LookupError, SessionGuard};

/// Opens a session and logs it in, or leaves nothing open.
///
/// The session comes back already inside a [`SessionGuard`], so no code
/// path ever holds an open session without one.
pub struct SessionConnector<T: RpcTransport> {
    transport: T,
    endpoint: Endpoint,
    params: BackendParams,
    identity: Arc<DeviceIdentity>,
}

impl<T: RpcTransport> SessionConnector<T> {
    /// Creates a connector for `title`'s game server, presenting `identity`
    /// as the TLS client identity.
    pub fn new(transport: T, title: &GameTitle, identity: Arc<DeviceIdentity>) -> Self {
        Self {
            transport,
            endpoint: Endpoint::for_title(title),
            params: BackendParams::for_title(title),
            identity,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Opens a session and logs in as `user_id` with `identity_token`.
    ///
    /// The session is guarded from the moment it opens: a rejected login
    /// closes it before the error is returned, and if this future is
    /// dropped mid-login (timeout or cancellation) the guard closes it.
    ///
    /// # Errors
    /// [`LookupError::Connection`] if the connection can't be opened or the
    /// login fails.
    pub async fn connect(
        &self,
        user_id: u64,
        identity_token: &str,
    ) -> Result<SessionGuard<T::Session>, LookupError> {
        let session = self
            .transport
            .open(&self.endpoint, &self.params, &self.identity)
            .await?;
        let conn_id = session.id();
        tracing::info!(%conn_id, endpoint = %self.endpoint, "session opened");
        let mut guard = SessionGuard::new(session);

        let auth = AuthenticationInfo::bearer(identity_token);
        if let Err(e) = guard.session_mut().login(user_id, &auth).await {
            tracing::warn!(%conn_id, error = %e, "login failed, closing session");
            if let Err(close_err) = guard.close().await {
                tracing::warn!(%conn_id, error = %close_err, "failed to close session");
            }
            return Err(LookupError::Connection(e));
        }

        tracing::debug!(%conn_id, user_id, "session logged in");
        Ok(guard)
    }
}
