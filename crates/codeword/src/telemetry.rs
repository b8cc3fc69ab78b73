//! Tracing setup for binaries and tools built on the lookup client.

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (e.g. `"info"` or `"codeword=debug"`) when it is unset.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one stays in place.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
