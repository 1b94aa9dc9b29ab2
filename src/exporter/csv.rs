// file: src/exporter/csv.rs
// description: csv export of dashboard and catalog tables
// reference: review queue and catalog downloads

use crate::error::{PipelineError, Result};
use crate::exporter::{Table, timestamped_file_name};
use chrono::Local;
use csv::{Terminator, WriterBuilder};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

/// Render a table as CSV text with CRLF record endings.
pub fn to_csv(table: &Table) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PipelineError::Serialization(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| PipelineError::Serialization(format!("CSV is not UTF-8: {}", e)))
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Write `table` to `<prefix>_<timestamp>.csv` and return the path.
    pub fn export(&self, prefix: &str, table: &Table) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(timestamped_file_name(prefix, "csv", Local::now()));

        fs::write(&path, to_csv(table)?).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!("Exported {} rows to {}", table.len(), path.display());
        Ok(path)
    }
}
