// file: src/exporter/json.rs
// description: json export of dashboard and catalog tables

use crate::error::{PipelineError, Result};
use crate::exporter::{Table, timestamped_file_name};
use chrono::{Local, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Value>,
}

impl ExportManifest {
    pub fn from_table(table: &Table) -> Self {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = table
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect();

        Self {
            exported_at: Utc::now().to_rfc3339(),
            total_rows: table.len(),
            columns: table.headers.clone(),
            rows,
        }
    }
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir, pretty })
    }

    pub fn render(&self, table: &Table) -> Result<String> {
        let manifest = ExportManifest::from_table(table);
        let text = if self.pretty {
            serde_json::to_string_pretty(&manifest)?
        } else {
            serde_json::to_string(&manifest)?
        };
        Ok(text)
    }

    pub fn export(&self, prefix: &str, table: &Table) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(timestamped_file_name(prefix, "json", Local::now()));

        fs::write(&path, self.render(table)?).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!("Export complete: {} rows to {}", table.len(), path.display());
        Ok(path)
    }
}
