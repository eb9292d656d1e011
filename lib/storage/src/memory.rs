use crate::sink::{Destination, TableSink, WriteMode, WriteSummary};
use anyhow::{bail, Result};
use chrono::Utc;
use orderflow_core::JoinedRecord;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory sink, keyed by destination
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: RwLock<HashMap<Destination, Vec<JoinedRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the rows stored at a destination
    pub fn get(&self, destination: &Destination) -> Option<Vec<JoinedRecord>> {
        self.tables.read().get(destination).cloned()
    }

    pub fn list_destinations(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().map(|d| d.to_string()).collect();
        names.sort();
        names
    }
}

impl TableSink for MemorySink {
    fn write(
        &self,
        destination: &Destination,
        records: &[JoinedRecord],
        mode: WriteMode,
    ) -> Result<WriteSummary> {
        let mut tables = self.tables.write();
        let exists = tables.contains_key(destination);
        match mode {
            WriteMode::Fail if exists => bail!("destination {} already exists", destination),
            WriteMode::Append if exists => {
                if let Some(existing) = tables.get_mut(destination) {
                    existing.extend_from_slice(records);
                }
            }
            _ => {
                tables.insert(destination.clone(), records.to_vec());
            }
        }

        Ok(WriteSummary {
            destination: destination.to_string(),
            rows: records.len(),
            mode,
            path: None,
            written_at: Utc::now(),
        })
    }
}
