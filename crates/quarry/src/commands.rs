//! The operations behind each `quarry` subcommand. Each returns the text to
//! print so it can be checked without a terminal.

use datafusion::arrow::util::pretty::pretty_format_batches;
use datafusion::error::DataFusionError;
use quarry_dataset::{Dataset, DatasetFactory, TableDataset};
use tracing::info;

use crate::error::QuarryError;
use crate::settings::Settings;

pub const DEFAULT_SHOW_LIMIT: usize = 10;

fn dataset(
    settings: &Settings,
    factory: &DatasetFactory,
    name: &str,
) -> Result<TableDataset, QuarryError> {
    let config = settings.dataset(name)?.clone();
    Ok(factory.table_dataset(config)?)
}

pub fn list(settings: &Settings) -> String {
    settings.names().collect::<Vec<_>>().join("\n")
}

/// The dataset's description as pretty JSON.
pub fn describe(
    settings: &Settings,
    factory: &DatasetFactory,
    name: &str,
) -> Result<String, QuarryError> {
    let dataset = dataset(settings, factory, name)?;
    Ok(serde_json::to_string_pretty(&dataset.describe())?)
}

/// Loads the dataset and renders its first `limit` rows as a table.
pub async fn show(
    settings: &Settings,
    factory: &DatasetFactory,
    name: &str,
    limit: usize,
) -> Result<String, QuarryError> {
    let dataset = dataset(settings, factory, name)?;
    info!(dataset = %dataset, limit, "loading");
    let batches = dataset.load().await?.limit(0, Some(limit))?.collect().await?;
    let table = pretty_format_batches(&batches).map_err(DataFusionError::from)?;
    Ok(table.to_string())
}

/// Loads the dataset and lists its columns, one `name: type` per line.
pub async fn schema(
    settings: &Settings,
    factory: &DatasetFactory,
    name: &str,
) -> Result<String, QuarryError> {
    let dataset = dataset(settings, factory, name)?;
    let df = dataset.load().await?;
    let lines: Vec<String> = df
        .schema()
        .fields()
        .iter()
        .map(|field| {
            let nullability = if field.is_nullable() { "" } else { " not null" };
            format!("{}: {}{}", field.name(), field.data_type(), nullability)
        })
        .collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_common::Error;
    use tempfile::TempDir;

    fn catalog(dir: &TempDir) -> Settings {
        let csv_path = dir.path().join("orders.csv");
        std::fs::write(&csv_path, "order_id,status\n1,shipped\n2,placed\n3,returned\n").unwrap();
        let toml = format!(
            r#"
[datasets.orders]
filepath = "{}"
file_format = "csv"
table_name = "orders"
connection = {{ backend = "datafusion", target_partitions = 1 }}
load_args = {{ has_header = true }}

[datasets.no_format]
filepath = "{}"
connection = {{ backend = "datafusion" }}
"#,
            csv_path.display(),
            csv_path.display()
        );
        Settings::from_contents(&toml, config::FileFormat::Toml).unwrap()
    }

    #[test]
    fn list_prints_sorted_names() {
        let dir = TempDir::new().unwrap();
        assert_eq!(list(&catalog(&dir)), "no_format\norders");
    }

    #[test]
    fn describe_renders_json() {
        let dir = TempDir::new().unwrap();
        let out = describe(&catalog(&dir), &DatasetFactory::default(), "orders").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["file_format"], "csv");
        assert_eq!(value["table_name"], "orders");
        assert_eq!(value["load_args"]["has_header"], true);
    }

    #[tokio::test]
    async fn show_limits_rows() {
        let dir = TempDir::new().unwrap();
        let out = show(&catalog(&dir), &DatasetFactory::default(), "orders", 2).await.unwrap();
        assert!(out.contains("shipped"));
        assert!(out.contains("placed"));
        assert!(!out.contains("returned"));
    }

    #[tokio::test]
    async fn schema_lists_columns() {
        let dir = TempDir::new().unwrap();
        let out = schema(&catalog(&dir), &DatasetFactory::default(), "orders").await.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("order_id: Int64"));
        assert!(lines[1].starts_with("status: Utf8"));
    }

    #[tokio::test]
    async fn show_without_format_is_not_supported() {
        let dir = TempDir::new().unwrap();
        let err =
            show(&catalog(&dir), &DatasetFactory::default(), "no_format", 5).await.unwrap_err();
        assert!(matches!(err, QuarryError::Dataset(Error::NotSupported(_))));
    }

    #[test]
    fn unknown_dataset_fails() {
        let dir = TempDir::new().unwrap();
        let err = describe(&catalog(&dir), &DatasetFactory::default(), "payments").unwrap_err();
        assert!(matches!(err, QuarryError::Dataset(Error::Config(_))));
    }
}
