use std::sync::Arc;

use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use quarry_common::{Options, Result};

use crate::format::FileFormat;

/// A named query-engine implementation that can open connections.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Name used in a connection configuration's `backend` entry.
    fn name(&self) -> &str;

    /// Opens a session. `options` is the connection configuration without
    /// its `backend` entry.
    async fn connect(&self, options: Options) -> Result<Arc<dyn Connection>>;
}

/// A live backend session. Every table it hands out is lazy: nothing is
/// read until the returned frame is collected.
#[async_trait]
pub trait Connection: Send + Sync {
    fn backend_name(&self) -> &str;

    fn supported_formats(&self) -> &[FileFormat] {
        &FileFormat::ALL
    }

    /// Looks up a table already known to the session.
    async fn table(&self, name: &str) -> Result<DataFrame>;

    /// Reads a file. When `table_name` is given the result is also
    /// registered under that name, replacing any previous table.
    async fn read(
        &self,
        format: FileFormat,
        path: &str,
        table_name: Option<&str>,
        options: &Options,
    ) -> Result<DataFrame>;
}
