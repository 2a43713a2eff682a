//! The DataFusion backend: every connection is its own `SessionContext`.

use std::sync::Arc;

use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use datafusion::prelude::{
    CsvReadOptions, NdJsonReadOptions, ParquetReadOptions, SessionConfig, SessionContext,
};
use quarry_common::{Error, OptionReader, Options, Result};
use tracing::{debug, info};

use crate::backend::{Backend, Connection};
use crate::format::{FileFormat, ReadOptions};

pub const DATAFUSION_BACKEND: &str = "datafusion";

#[derive(Debug, Clone, Copy, Default)]
pub struct DataFusionBackend;

impl DataFusionBackend {
    /// Builds the session configuration from connect options.
    pub fn session_config(options: Options) -> Result<SessionConfig> {
        let mut reader = OptionReader::new(format!("connect({DATAFUSION_BACKEND})"), options);
        let mut config = SessionConfig::new();

        if let Some(partitions) = reader.take_usize("target_partitions")? {
            if partitions == 0 {
                return Err(Error::config("`target_partitions` must be greater than 0"));
            }
            config = config.with_target_partitions(partitions);
        }
        if let Some(batch_size) = reader.take_usize("batch_size")? {
            if batch_size == 0 {
                return Err(Error::config("`batch_size` must be greater than 0"));
            }
            config = config.with_batch_size(batch_size);
        }
        if let Some(enabled) = reader.take_bool("information_schema")? {
            config = config.with_information_schema(enabled);
        }
        match (reader.take_string("default_catalog")?, reader.take_string("default_schema")?) {
            (Some(catalog), Some(schema)) => {
                config = config.with_default_catalog_and_schema(catalog, schema);
            }
            (None, None) => {}
            _ => {
                return Err(Error::config(
                    "`default_catalog` and `default_schema` must be set together",
                ))
            }
        }
        reader.finish()?;
        Ok(config)
    }
}

#[async_trait]
impl Backend for DataFusionBackend {
    fn name(&self) -> &str {
        DATAFUSION_BACKEND
    }

    async fn connect(&self, options: Options) -> Result<Arc<dyn Connection>> {
        let config = Self::session_config(options)?;
        info!(
            backend = DATAFUSION_BACKEND,
            target_partitions = config.target_partitions(),
            batch_size = config.batch_size(),
            "opened session"
        );
        Ok(Arc::new(DataFusionConnection::new(SessionContext::new_with_config(config))))
    }
}

#[derive(Clone)]
pub struct DataFusionConnection {
    ctx: SessionContext,
}

impl DataFusionConnection {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    async fn read_unregistered(&self, path: &str, options: ReadOptions) -> Result<DataFrame> {
        let df = match options {
            ReadOptions::Csv(opts) => {
                let mut read = CsvReadOptions::new();
                if let Some(has_header) = opts.has_header {
                    read = read.has_header(has_header);
                }
                if let Some(delimiter) = opts.delimiter {
                    read = read.delimiter(delimiter);
                }
                if let Some(quote) = opts.quote {
                    read = read.quote(quote);
                }
                if let Some(max_records) = opts.schema_infer_max_records {
                    read = read.schema_infer_max_records(max_records);
                }
                if let Some(extension) = opts.file_extension.as_deref() {
                    read = read.file_extension(extension);
                }
                self.ctx.read_csv(path, read).await?
            }
            ReadOptions::Parquet(opts) => {
                let mut read = ParquetReadOptions::default();
                if let Some(extension) = opts.file_extension.as_deref() {
                    read.file_extension = extension;
                }
                if let Some(pruning) = opts.parquet_pruning {
                    read = read.parquet_pruning(pruning);
                }
                if let Some(skip) = opts.skip_metadata {
                    read = read.skip_metadata(skip);
                }
                self.ctx.read_parquet(path, read).await?
            }
            ReadOptions::Json(opts) => {
                let mut read = NdJsonReadOptions::default();
                if let Some(extension) = opts.file_extension.as_deref() {
                    read.file_extension = extension;
                }
                if let Some(max_records) = opts.schema_infer_max_records {
                    read.schema_infer_max_records = max_records;
                }
                self.ctx.read_json(path, read).await?
            }
        };
        Ok(df)
    }
}

#[async_trait]
impl Connection for DataFusionConnection {
    fn backend_name(&self) -> &str {
        DATAFUSION_BACKEND
    }

    async fn table(&self, name: &str) -> Result<DataFrame> {
        Ok(self.ctx.table(name).await?)
    }

    async fn read(
        &self,
        format: FileFormat,
        path: &str,
        table_name: Option<&str>,
        options: &Options,
    ) -> Result<DataFrame> {
        let read_options = ReadOptions::parse(format, options)?;
        debug!(reader = %format.reader_name(), path, table_name, "reading file");
        let df = self.read_unregistered(path, read_options).await?;

        if let Some(name) = table_name {
            self.ctx.deregister_table(name)?;
            self.ctx.register_table(name, df.clone().into_view())?;
        }
        Ok(df)
    }
}
