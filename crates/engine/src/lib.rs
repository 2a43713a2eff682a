//! Engine crate
//!
//! The backend abstraction Quarry datasets load through. A [`Backend`] is
//! resolved by name from a [`BackendRegistry`] and opens a [`Connection`];
//! connections hand out lazy DataFusion frames, either for a table they
//! already know or for a file read with one of the [`FileFormat`] readers.
//!
//! # Example
//! ```rust,no_run
//! use quarry_engine::{BackendRegistry, FileFormat};
//! use quarry_common::Options;
//!
//! # async fn run() -> quarry_common::Result<()> {
//! let registry = BackendRegistry::with_defaults();
//! let conn = registry.resolve("datafusion")?.connect(Options::new()).await?;
//! let orders = conn
//!     .read(FileFormat::Parquet, "orders.parquet", Some("orders"), &Options::new())
//!     .await?;
//! orders.show().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod context;
pub mod format;
pub mod registry;

pub use backend::{Backend, Connection};
pub use context::{DataFusionBackend, DataFusionConnection, DATAFUSION_BACKEND};
pub use format::{FileFormat, ReadOptions};
pub use registry::BackendRegistry;
