//! Tracing subscriber setup for binaries and tests that host this crate.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Another global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Set `RUST_LOG=plinth=debug` to see message construction details.
///
/// # Errors
///
/// Returns [`TelemetryError::AlreadyInstalled`] when a global subscriber
/// was set earlier.
pub fn init_tracing() -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}

/// Installs the subscriber unless one is already present.
pub fn try_init_tracing() {
    if let Err(err) = init_tracing() {
        tracing::debug!(error = %err, "keeping existing tracing subscriber");
    }
}
