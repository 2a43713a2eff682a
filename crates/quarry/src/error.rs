use datafusion::error::DataFusionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuarryError {
    #[error("Failed to load catalog")]
    Settings(#[from] config::ConfigError),

    #[error(transparent)]
    Dataset(#[from] quarry_common::Error),

    #[error(transparent)]
    Engine(#[from] DataFusionError),

    #[error("Failed to render description")]
    Json(#[from] serde_json::Error),
}
