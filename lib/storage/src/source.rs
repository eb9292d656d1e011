// CSV input, restricted to the declared columns of a dataset
use anyhow::{Context, Result};
use orderflow_core::{Dataset, RawTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Reads a headed CSV file into a [`RawTable`]
#[derive(Debug, Clone)]
pub struct CsvSource {
    delimiter: u8,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a CSV file and project it onto the dataset's declared columns
    pub fn read<P: AsRef<Path>>(&self, path: P, dataset: Dataset) -> Result<RawTable> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open {} input {}", dataset, path.display()))?;
        let table = self
            .read_from(file, dataset)
            .with_context(|| format!("failed to read {} input {}", dataset, path.display()))?;
        info!(dataset = %dataset, rows = table.len(), path = %path.display(), "input loaded");
        Ok(table)
    }

    /// Read CSV from any reader and project it onto the dataset's declared columns
    pub fn read_from<R: Read>(&self, reader: R, dataset: Dataset) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let table = RawTable::new(dataset, columns, rows)?;
        Ok(table.project(dataset.schema())?)
    }
}
