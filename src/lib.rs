//! EVE Online ESI client
//!
//! Re-exports the typed client from [`esi_client`] and adds a tracing setup
//! helper for binaries and tools built on it.

#![warn(missing_docs)]

pub use esi_client::*;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber
///
/// `RUST_LOG` takes precedence; `default_filter` (e.g. "esi_client=debug")
/// applies when it is unset or invalid. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(default_filter: &str) -> std::result::Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_only_once() {
        assert!(init_tracing("esi_client=debug").is_ok());
        assert!(init_tracing("esi_client=debug").is_err());
    }
}
