// Local file warehouse: one file per destination table
use crate::sink::{Destination, TableSink, WriteMode, WriteSummary};
use anyhow::{bail, Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::Utc;
use orderflow_core::JoinedRecord;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File encoding used by the warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            _ => bail!("unknown output format {:?} (expected csv or jsonl)", s),
        }
    }
}

/// Writes each destination to `<root>/<dataset>/<table>.<ext>`
pub struct WarehouseSink {
    root: PathBuf,
    format: OutputFormat,
}

impl WarehouseSink {
    pub fn new<P: AsRef<Path>>(root: P, format: OutputFormat) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            format,
        }
    }

    /// Get the file backing a destination
    pub fn table_path(&self, destination: &Destination) -> PathBuf {
        self.root
            .join(destination.dataset())
            .join(format!("{}.{}", destination.table(), self.format.extension()))
    }

    /// Write the whole file atomically; with `DisallowOverwrite` an existing
    /// file is left untouched and the write fails
    fn write_new(
        &self,
        path: &Path,
        records: &[JoinedRecord],
        overwrite: OverwriteBehavior,
    ) -> Result<()> {
        let format = self.format;
        AtomicFile::new(path, overwrite)
            .write(|file| {
                let mut writer = BufWriter::new(file);
                encode(&mut writer, records, format, true)?;
                writer.flush()
            })
            .with_context(|| format!("failed to write {}", path.display()))
    }

    fn append(&self, path: &Path, records: &[JoinedRecord]) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {} for append", path.display()))?;
        let mut writer = BufWriter::new(file);
        encode(&mut writer, records, self.format, false)?;
        writer.flush()?;
        Ok(())
    }
}

impl TableSink for WarehouseSink {
    fn write(
        &self,
        destination: &Destination,
        records: &[JoinedRecord],
        mode: WriteMode,
    ) -> Result<WriteSummary> {
        let path = self.table_path(destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let exists = path.exists();
        match mode {
            WriteMode::Fail if exists => {
                bail!("destination {} already exists at {}", destination, path.display());
            }
            WriteMode::Fail => {
                self.write_new(&path, records, OverwriteBehavior::DisallowOverwrite)?
            }
            WriteMode::Append if exists => self.append(&path, records)?,
            _ => self.write_new(&path, records, OverwriteBehavior::AllowOverwrite)?,
        }

        info!(
            destination = %destination,
            rows = records.len(),
            mode = %mode,
            path = %path.display(),
            "table written"
        );

        Ok(WriteSummary {
            destination: destination.to_string(),
            rows: records.len(),
            mode,
            path: Some(path),
            written_at: Utc::now(),
        })
    }
}

/// Encode records; the CSV header is written only when `header` is set
pub(crate) fn encode<W: Write>(
    writer: &mut W,
    records: &[JoinedRecord],
    format: OutputFormat,
    header: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer);
            if header {
                csv_writer.write_record(JoinedRecord::COLUMNS)?;
            }
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut *writer, record)?;
                writer.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}
