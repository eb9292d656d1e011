use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use orderflow_core::JoinedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Destination of a write, in the form `dataset.table`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    dataset: String,
    table: String,
}

impl Destination {
    /// Parse a `dataset.table` identifier
    ///
    /// Both segments must be non-empty and made of ASCII letters, digits,
    /// `_` or `-`.
    pub fn parse(identifier: &str) -> Result<Self> {
        let mut parts = identifier.split('.');
        let (Some(dataset), Some(table), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("destination must have the form dataset.table, got {:?}", identifier);
        };

        for segment in [dataset, table] {
            if segment.is_empty() {
                bail!("destination {:?} has an empty segment", identifier);
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                bail!("destination {:?} contains invalid characters", identifier);
            }
        }

        Ok(Self {
            dataset: dataset.to_string(),
            table: table.to_string(),
        })
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.dataset, self.table)
    }
}

impl FromStr for Destination {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Destination::parse(s)
    }
}

/// What to do when the destination already holds data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Refuse to write over an existing destination
    Fail,
    /// Replace existing contents
    #[default]
    Replace,
    /// Add rows after existing contents
    Append,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteMode::Fail => "fail",
            WriteMode::Replace => "replace",
            WriteMode::Append => "append",
        };
        f.write_str(name)
    }
}

impl FromStr for WriteMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(WriteMode::Fail),
            "replace" => Ok(WriteMode::Replace),
            "append" => Ok(WriteMode::Append),
            _ => Err(anyhow!("unknown write mode {:?} (expected fail, replace or append)", s)),
        }
    }
}

/// Outcome of a successful write
#[derive(Debug, Clone, Serialize)]
pub struct WriteSummary {
    pub destination: String,
    pub rows: usize,
    pub mode: WriteMode,
    /// File written, for file-backed sinks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub written_at: DateTime<Utc>,
}

/// External sink accepting a finalized record set
pub trait TableSink {
    fn write(
        &self,
        destination: &Destination,
        records: &[JoinedRecord],
        mode: WriteMode,
    ) -> Result<WriteSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_parse() {
        let dest = Destination::parse("orders.orders_denormalized").unwrap();
        assert_eq!(dest.dataset(), "orders");
        assert_eq!(dest.table(), "orders_denormalized");
        assert_eq!(dest.to_string(), "orders.orders_denormalized");
    }

    #[test]
    fn test_destination_rejects_bad_identifiers() {
        for bad in ["orders", "a.b.c", ".table", "dataset.", "data set.t", "../x.y", ""] {
            assert!(Destination::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_write_mode_parse() {
        assert_eq!("replace".parse::<WriteMode>().unwrap(), WriteMode::Replace);
        assert_eq!("APPEND".parse::<WriteMode>().unwrap(), WriteMode::Append);
        assert!("upsert".parse::<WriteMode>().is_err());
        assert_eq!(WriteMode::default(), WriteMode::Replace);
    }
}
