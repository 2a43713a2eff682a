//! Utilities for logging.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Error returned when a global subscriber could not be installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), InitError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
