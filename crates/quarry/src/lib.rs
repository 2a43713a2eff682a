//! Main Quarry crate: catalog settings, logging setup and the commands behind
//! the `quarry` binary.

pub mod commands;
pub mod error;
pub mod logging;
pub mod settings;

pub use error::QuarryError;
pub use settings::Settings;

// Re-export the dataset API so pipelines only need this crate.
pub use quarry_common::{Error, Options, Result};
pub use quarry_dataset::{Dataset, DatasetConfig, DatasetFactory, SaveDataset, TableDataset};
pub use quarry_engine::{Backend, BackendRegistry, Connection, FileFormat};
pub use quarry_pool::{ConnectionKey, ConnectionPool};
