// file: src/exporter/mod.rs
// description: tabular export to csv and json files
// reference: internal module structure

pub mod csv;
pub mod json;

pub use self::csv::CsvExporter;
pub use json::JsonExporter;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Column headers plus string cells, the shape every export writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `<prefix>_<YYYYmmdd_HHMMSS>.<extension>`
pub fn timestamped_file_name(prefix: &str, extension: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), extension)
}
