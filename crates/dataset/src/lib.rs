//! Dataset crate
//!
//! Catalog-configured datasets for pipeline nodes. A [`TableDataset`] maps a
//! [`DatasetConfig`] (file path, file format, table name, connection) to a
//! lazy DataFusion frame loaded through a pooled backend connection.
//!
//! # Example
//! ```rust,no_run
//! use quarry_dataset::{Dataset, DatasetConfig, DatasetFactory};
//! use serde_json::json;
//!
//! # async fn run() -> quarry_common::Result<()> {
//! let factory = DatasetFactory::default();
//! let connection = serde_json::from_value(json!({"backend": "datafusion"})).unwrap();
//! let orders = factory.table_dataset(
//!     DatasetConfig::new()
//!         .with_filepath("data/orders.parquet")
//!         .with_file_format("parquet")
//!         .with_table_name("orders")
//!         .with_connection(connection),
//! )?;
//! orders.load().await?.show().await?;
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod factory;
pub mod table;

pub use dataset::{Dataset, SaveDataset};
pub use factory::DatasetFactory;
pub use table::{DatasetConfig, TableDataset};
