//! Device identity and install ticket: the fixed inputs to authentication.
//!
//! Both are loaded once at startup and live for the whole process. Neither
//! is cached on disk by us; they're read from wherever the operator
//! provisioned them.

use std::fmt;

/// A device's client certificate and private key.
///
/// Proves device authenticity to the device-auth service and serves as the
/// TLS client identity for the game-server connection.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    certificate: Vec<u8>,
    private_key: Vec<u8>,
}

impl DeviceIdentity {
    /// Creates an identity from raw certificate and key material.
    pub fn new(certificate: Vec<u8>, private_key: Vec<u8>) -> Self {
        Self {
            certificate,
            private_key,
        }
    }

    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceIdentity")
            .field("certificate_len", &self.certificate.len())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The title's install ticket, as opaque bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct InstallTicket(Vec<u8>);

impl InstallTicket {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for InstallTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstallTicket({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_identity_debug_redacts_key() {
        let identity = DeviceIdentity::new(b"cert".to_vec(), b"super-secret".to_vec());
        let rendered = format!("{identity:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("certificate_len: 4"));
    }

    #[test]
    fn test_install_ticket_debug_shows_length_only() {
        let ticket = InstallTicket::new(vec![1, 2, 3]);
        assert_eq!(format!("{ticket:?}"), "InstallTicket(3 bytes)");
        assert_eq!(ticket.as_bytes(), &[1, 2, 3]);
    }
}
