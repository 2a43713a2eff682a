use datafusion::error::DataFusionError;
use thiserror::Error;

/// Unified error type for Quarry crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    #[error("Connection configuration has no `backend` entry")]
    MissingBackend,
    #[error("Unknown backend `{name}` (available: {})", .available.join(", "))]
    UnknownBackend { name: String, available: Vec<String> },
    // Failures raised by a backend are passed through untouched.
    #[error(transparent)]
    Backend(#[from] DataFusionError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn not_supported(msg: impl Into<String>) -> Self {
        Error::NotSupported(msg.into())
    }
}
