//! File formats a connection can read, and their typed load options.

use std::fmt;
use std::str::FromStr;

use quarry_common::{Error, OptionReader, Options, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Parquet,
    /// Newline-delimited JSON.
    Json,
}

impl FileFormat {
    pub const ALL: [FileFormat; 3] = [FileFormat::Csv, FileFormat::Parquet, FileFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Parquet => "parquet",
            FileFormat::Json => "json",
        }
    }

    /// Name of the reader operation, e.g. `read_parquet`.
    pub fn reader_name(&self) -> String {
        format!("read_{}", self.as_str())
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FileFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let supported: Vec<&str> = FileFormat::ALL.iter().map(|f| f.as_str()).collect();
                Error::not_supported(format!(
                    "file format `{s}` (supported: {})",
                    supported.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvOptions {
    pub has_header: Option<bool>,
    pub delimiter: Option<u8>,
    pub quote: Option<u8>,
    pub schema_infer_max_records: Option<usize>,
    pub file_extension: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParquetOptions {
    pub file_extension: Option<String>,
    pub parquet_pruning: Option<bool>,
    pub skip_metadata: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    pub file_extension: Option<String>,
    pub schema_infer_max_records: Option<usize>,
}

/// Load options validated against the reader they are meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOptions {
    Csv(CsvOptions),
    Parquet(ParquetOptions),
    Json(JsonOptions),
}

impl ReadOptions {
    pub fn parse(format: FileFormat, options: &Options) -> Result<Self> {
        let mut reader = OptionReader::new(format.reader_name(), options.clone());
        let parsed = match format {
            FileFormat::Csv => ReadOptions::Csv(CsvOptions {
                has_header: reader.take_bool("has_header")?,
                delimiter: reader.take_byte("delimiter")?,
                quote: reader.take_byte("quote")?,
                schema_infer_max_records: reader.take_usize("schema_infer_max_records")?,
                file_extension: reader.take_string("file_extension")?,
            }),
            FileFormat::Parquet => ReadOptions::Parquet(ParquetOptions {
                file_extension: reader.take_string("file_extension")?,
                parquet_pruning: reader.take_bool("parquet_pruning")?,
                skip_metadata: reader.take_bool("skip_metadata")?,
            }),
            FileFormat::Json => ReadOptions::Json(JsonOptions {
                file_extension: reader.take_string("file_extension")?,
                schema_infer_max_records: reader.take_usize("schema_infer_max_records")?,
            }),
        };
        reader.finish()?;
        Ok(parsed)
    }
}
