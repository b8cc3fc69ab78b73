//! Transport abstraction for game-server RPC sessions.
//!
//! Provides the [`RpcTransport`] and [`RpcSession`] traits. The secure RPC
//! stack itself (packet framing, encryption, object serialization) lives
//! behind these traits; this crate only fixes the shape of the calls the
//! lookup client makes.
//!
//! A session's lifecycle is `open → login → calls → close`, and the owner
//! must call [`RpcSession::close`] exactly once.

mod error;

pub use error::TransportError;

use std::fmt;
use std::future::Future;

use codeword_protocol::{
    AuthenticationInfo, DeviceIdentity, GameTitle, SearchCriteria, SessionSummary,
    BACKEND_PORT,
};

/// Opaque identifier for an RPC session, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc-{}", self.0)
    }
}

/// Where a game server listens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// The fixed endpoint for a title: derived host, standard secure port.
    pub fn for_title(title: &GameTitle) -> Self {
        Self {
            host: title.backend_host(),
            port: BACKEND_PORT,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Protocol parameters the RPC client is configured with before connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendParams {
    pub access_key: String,
    pub nex_version: u32,
    pub client_version: u32,
}

impl BackendParams {
    pub fn for_title(title: &GameTitle) -> Self {
        Self {
            access_key: title.access_key.clone(),
            nex_version: title.nex_version,
            client_version: title.client_version,
        }
    }
}

/// Opens secure RPC sessions to a game server.
pub trait RpcTransport: Send + Sync + 'static {
    /// The session type produced by this transport.
    type Session: RpcSession;

    /// Opens a connection to `endpoint`, presenting `identity` as the TLS
    /// client identity. The returned session is not yet logged in.
    fn open(
        &self,
        endpoint: &Endpoint,
        params: &BackendParams,
        identity: &DeviceIdentity,
    ) -> impl Future<Output = Result<Self::Session, TransportError>> + Send;
}

/// One live RPC connection to a game server.
pub trait RpcSession: Send + 'static {
    /// Authenticates the session as `user_id` using a bearer credential.
    fn login(
        &mut self,
        user_id: u64,
        auth: &AuthenticationInfo,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Runs a matchmaking session search and returns every candidate.
    fn browse_matchmake_sessions(
        &mut self,
        criteria: &SearchCriteria<'_>,
    ) -> impl Future<Output = Result<Vec<SessionSummary>, TransportError>> + Send;

    /// Closes the connection.
    fn close(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Returns the unique identifier for this session.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title() -> GameTitle {
        GameTitle {
            title_id: 1,
            title_version: 2,
            game_server_id: 0x1234_abcd,
            access_key: "key".into(),
            nex_version: 30_500,
            client_version: 7,
        }
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "rpc-7");
        assert_eq!(id.into_inner(), 7);
    }

    #[test]
    fn test_endpoint_for_title_uses_secure_port() {
        let endpoint = Endpoint::for_title(&title());
        assert_eq!(endpoint.port, 443);
        assert_eq!(
            endpoint.to_string(),
            "g1234abcd-lp1.s.n.srv.nintendo.net:443"
        );
    }

    #[test]
    fn test_backend_params_for_title() {
        let params = BackendParams::for_title(&title());
        assert_eq!(
            params,
            BackendParams {
                access_key: "key".into(),
                nex_version: 30_500,
                client_version: 7,
            }
        );
    }
}
