//! Run configuration
//!
//! Loaded from a JSON file; every field has a default so a partial file (or
//! none at all) is valid. Command-line options override individual fields.

use anyhow::{Context, Result};
use orderflow_similarity::SimilarityWeights;
use orderflow_storage::{Destination, OutputFormat, WriteMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EtlConfig {
    pub orders_csv: PathBuf,
    pub products_csv: PathBuf,
    /// Output table as `dataset.table`
    pub destination: String,
    pub warehouse_dir: PathBuf,
    pub write_mode: WriteMode,
    pub format: OutputFormat,
    pub weights: SimilarityWeights,
    pub http_port: u16,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            orders_csv: PathBuf::from("data/orders.csv"),
            products_csv: PathBuf::from("data/products.csv"),
            destination: "orders.orders_denormalized".to_string(),
            warehouse_dir: PathBuf::from("warehouse"),
            write_mode: WriteMode::Replace,
            format: OutputFormat::Csv,
            weights: SimilarityWeights::default(),
            http_port: 8080,
        }
    }
}

impl EtlConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Check the destination and weights before any I/O happens
    pub fn validate(&self) -> Result<()> {
        self.destination()?;
        let mut weights = self.weights;
        weights
            .validate_and_normalize()
            .context("invalid similarity weights")?;
        Ok(())
    }

    pub fn destination(&self) -> Result<Destination> {
        Destination::parse(&self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EtlConfig::default();
        assert_eq!(config.destination, "orders.orders_denormalized");
        assert_eq!(config.write_mode, WriteMode::Replace);
        assert_eq!(config.weights, SimilarityWeights::new(0.5, 0.2, 0.3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EtlConfig::from_json(
            r#"{"orders_csv": "in/o.csv", "write_mode": "append", "format": "jsonl",
                "weights": {"price": 0.6}}"#,
        )
        .unwrap();
        assert_eq!(config.orders_csv, PathBuf::from("in/o.csv"));
        assert_eq!(config.products_csv, PathBuf::from("data/products.csv"));
        assert_eq!(config.write_mode, WriteMode::Append);
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert_eq!(config.weights.goods_group, 0.5);
        assert_eq!(config.weights.price, 0.6);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"destination": "sales.orders", "http_port": 9000}}"#).unwrap();

        let config = EtlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.destination().unwrap().table(), "orders");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EtlConfig {
            destination: "no_table".to_string(),
            ..EtlConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EtlConfig {
            weights: SimilarityWeights::new(0.0, 0.0, 0.0),
            ..EtlConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_write_mode_rejected() {
        assert!(EtlConfig::from_json(r#"{"write_mode": "upsert"}"#).is_err());
    }
}
