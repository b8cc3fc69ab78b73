//! Scoped ownership of an open RPC session.

use codeword_transport::{RpcSession, TransportError};

/// Owns an open session and guarantees it gets closed exactly once.
///
/// The normal path is [`SessionGuard::close`]. If the guard is dropped
/// while still holding the session (the lookup was cancelled or timed
/// out), `Drop` spawns the close on the current Tokio runtime. Since `Drop`
/// is synchronous, that close is fire-and-forget.
pub struct SessionGuard<S: RpcSession> {
    session: Option<S>,
}

impl<S: RpcSession> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// The guarded session.
    pub fn session_mut(&mut self) -> &mut S {
        match self.session.as_mut() {
            Some(session) => session,
            // Only `close(self)` and `drop` take the session, and neither
            // leaves the guard reachable.
            None => unreachable!("session taken from a live guard"),
        }
    }

    /// Closes the session now.
    pub async fn close(mut self) -> Result<(), TransportError> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        let conn_id = session.id();
        let result = session.close().await;
        tracing::info!(%conn_id, ok = result.is_ok(), "session closed");
        result
    }
}

impl<S: RpcSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let conn_id = session.id();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(%conn_id, "guard dropped with session open, closing in background");
                handle.spawn(async move {
                    if let Err(e) = session.close().await {
                        tracing::warn!(%conn_id, error = %e, "background session close failed");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(%conn_id, "no runtime to close session on, abandoning it");
            }
        }
    }
}
