/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Opening the connection failed (DNS, TCP, TLS handshake).
    #[error("connect to {endpoint} failed: {reason}")]
    ConnectFailed { endpoint: String, reason: String },

    /// The server rejected the RPC login.
    #[error("login rejected: {0}")]
    LoginRejected(String),

    /// A remote call failed after the session was established.
    #[error("rpc call {method} failed: {reason}")]
    CallFailed { method: &'static str, reason: String },

    /// The connection was closed.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// An I/O error from the underlying socket.
    #[error("transport i/o: {0}")]
    Io(#[from] std::io::Error),
}
