use std::collections::BTreeMap;

use quarry_common::Error;
use quarry_dataset::DatasetConfig;
use serde::Deserialize;

pub const CATALOG_PATH_ENV: &str = "QUARRY_CATALOG_PATH";
pub const DEFAULT_CATALOG_PATH: &str = "conf/catalog.toml";

/// A catalog of named dataset entries.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub datasets: BTreeMap<String, DatasetConfig>,
}

impl Settings {
    /// Loads the catalog file, then applies `QUARRY__*` environment overrides.
    ///
    /// The file is `path`, else `$QUARRY_CATALOG_PATH`, else
    /// `conf/catalog.toml`; its extension picks the format.
    pub fn new(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let config_file_path = path
            .map(str::to_string)
            .or_else(|| std::env::var(CATALOG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&config_file_path).required(true))
            .add_source(
                config::Environment::with_prefix("QUARRY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        s.try_deserialize()
    }

    /// Parses a catalog held in memory.
    pub fn from_contents(
        contents: &str,
        format: config::FileFormat,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, format))
            .build()?
            .try_deserialize()
    }

    pub fn dataset(&self, name: &str) -> Result<&DatasetConfig, Error> {
        self.datasets
            .get(name)
            .ok_or_else(|| Error::config(format!("no dataset named `{name}` in the catalog")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }
}
