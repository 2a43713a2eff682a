//! A dataset backed by a table or file on a query-engine connection.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use quarry_common::{Error, Options, Result};
use quarry_engine::{Connection, FileFormat};
use quarry_pool::ConnectionPool;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::dataset::Dataset;

/// A catalog entry describing a [`TableDataset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    pub filepath: Option<String>,
    pub file_format: Option<String>,
    pub table_name: Option<String>,
    /// Must carry a `backend` entry to load; the rest is passed to `connect`.
    pub connection: Option<Options>,
    #[serde(default)]
    pub load_args: Options,
    #[serde(default)]
    pub save_args: Options,
}

impl DatasetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filepath(mut self, filepath: impl Into<String>) -> Self {
        self.filepath = Some(filepath.into());
        self
    }

    pub fn with_file_format(mut self, file_format: impl Into<String>) -> Self {
        self.file_format = Some(file_format.into());
        self
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn with_connection(mut self, connection: Options) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn with_load_args(mut self, load_args: Options) -> Self {
        self.load_args = load_args;
        self
    }

    pub fn with_save_args(mut self, save_args: Options) -> Self {
        self.save_args = save_args;
        self
    }
}

/// Loads a lazy table, either by reading `filepath` with the `file_format`
/// reader or by looking up `table_name` on the connection.
///
/// Read-only: there is no [`SaveDataset`](crate::SaveDataset) impl, so this
/// does not compile:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use quarry_dataset::{DatasetConfig, SaveDataset, TableDataset};
/// use quarry_pool::ConnectionPool;
///
/// # async fn run(frame: datafusion::dataframe::DataFrame) {
/// let pool = Arc::new(ConnectionPool::default());
/// let dataset = TableDataset::new(DatasetConfig::new().with_table_name("orders"), pool).unwrap();
/// dataset.save(frame).await.unwrap();
/// # }
/// ```
pub struct TableDataset {
    filepath: Option<String>,
    file_format: Option<String>,
    reader: Option<FileFormat>,
    table_name: Option<String>,
    connection_config: Option<Options>,
    load_args: Options,
    save_args: Options,
    pool: Arc<ConnectionPool>,
}

impl TableDataset {
    /// Validates `config` and binds the dataset to `pool`.
    ///
    /// Fails if neither `filepath` nor `table_name` is set, or if a
    /// `filepath` comes with a `file_format` no reader exists for. Without a
    /// `filepath` the format is never read and is kept as given.
    pub fn new(config: DatasetConfig, pool: Arc<ConnectionPool>) -> Result<Self> {
        let DatasetConfig { filepath, file_format, table_name, connection, load_args, save_args } =
            config;

        if filepath.is_none() && table_name.is_none() {
            return Err(Error::config("Must provide at least one of `filepath` or `table_name`."));
        }
        let reader = match (&filepath, file_format.as_deref()) {
            (Some(_), Some(name)) => Some(name.parse::<FileFormat>()?),
            _ => None,
        };

        Ok(Self {
            filepath,
            file_format,
            reader,
            table_name,
            connection_config: connection,
            load_args,
            save_args,
            pool,
        })
    }

    pub fn filepath(&self) -> Option<&str> {
        self.filepath.as_deref()
    }

    /// The format name exactly as configured.
    pub fn file_format(&self) -> Option<&str> {
        self.file_format.as_deref()
    }

    /// The reader `load` dispatches a file to; `None` without a `filepath`.
    pub fn reader_format(&self) -> Option<FileFormat> {
        self.reader
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn load_args(&self) -> &Options {
        &self.load_args
    }

    pub fn save_args(&self) -> &Options {
        &self.save_args
    }

    /// The pooled connection for this dataset's connection configuration.
    pub async fn connection(&self) -> Result<Arc<dyn Connection>> {
        let config = self.connection_config.as_ref().ok_or(Error::MissingBackend)?;
        self.pool.get_or_connect(config).await
    }

    async fn read_file(&self, path: &str, format: FileFormat) -> Result<DataFrame> {
        let conn = self.connection().await?;
        if !conn.supported_formats().contains(&format) {
            return Err(Error::not_supported(format!(
                "backend `{}` has no {} reader",
                conn.backend_name(),
                format.reader_name()
            )));
        }
        debug!(dataset = %self, reader = %format.reader_name(), "loading file");
        conn.read(format, path, self.table_name.as_deref(), &self.load_args).await
    }
}

#[async_trait]
impl Dataset for TableDataset {
    type Output = DataFrame;

    async fn load(&self) -> Result<DataFrame> {
        match (self.filepath.as_deref(), self.reader) {
            (Some(path), Some(format)) => self.read_file(path, format).await,
            (Some(path), None) => {
                Err(Error::not_supported(format!("loading `{path}` without a `file_format`")))
            }
            (None, _) => {
                let name = self.table_name.as_deref().ok_or_else(|| {
                    Error::config("dataset has neither `filepath` nor `table_name`")
                })?;
                let conn = self.connection().await?;
                debug!(dataset = %self, table = name, "loading table");
                conn.table(name).await
            }
        }
    }

    fn describe(&self) -> Options {
        let mut description = Options::new();
        description.insert("filepath".to_string(), json!(self.filepath));
        description.insert("file_format".to_string(), json!(self.file_format));
        description.insert("table_name".to_string(), json!(self.table_name));
        description.insert("connection_config".to_string(), json!(self.connection_config));
        description.insert("load_args".to_string(), json!(self.load_args));
        description.insert("save_args".to_string(), json!(self.save_args));
        description
    }
}

impl fmt::Display for TableDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (key, value) in self.describe() {
            match value {
                Value::Null => {}
                Value::Object(ref map) if map.is_empty() => {}
                Value::String(s) => parts.push(format!("{key}={s}")),
                other => parts.push(format!("{key}={other}")),
            }
        }
        write!(f, "TableDataset({})", parts.join(", "))
    }
}

impl fmt::Debug for TableDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableDataset")
            .field("filepath", &self.filepath)
            .field("file_format", &self.file_format)
            .field("reader", &self.reader)
            .field("table_name", &self.table_name)
            .field("connection_config", &self.connection_config)
            .field("load_args", &self.load_args)
            .field("save_args", &self.save_args)
            .finish_non_exhaustive()
    }
}
