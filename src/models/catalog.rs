// file: src/models/catalog.rs
// description: raw document catalog rows, document ids and processing status
// reference: RAW_DOCUMENT_CATALOG table layout

use crate::models::{DocumentType, Language};
use crate::warehouse::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Catalog key: `DOC_` followed by 12 upper-case hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("DOC_{}", hex[..12].to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Unknown(String),
}

impl ProcessingStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => ProcessingStatus::Pending,
            "PROCESSING" => ProcessingStatus::Processing,
            "COMPLETED" => ProcessingStatus::Completed,
            "FAILED" => ProcessingStatus::Failed,
            _ => ProcessingStatus::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProcessingStatus::Pending => "PENDING",
            ProcessingStatus::Processing => "PROCESSING",
            ProcessingStatus::Completed => "COMPLETED",
            ProcessingStatus::Failed => "FAILED",
            ProcessingStatus::Unknown(raw) => raw,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "⏳",
            ProcessingStatus::Processing => "🔄",
            ProcessingStatus::Completed => "✅",
            ProcessingStatus::Failed => "❌",
            ProcessingStatus::Unknown(_) => "❓",
        }
    }

    pub fn decorated(&self) -> String {
        format!("{} {}", self.emoji(), self.as_str())
    }
}

/// A new catalog row, written once right after the stage upload.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub document_id: DocumentId,
    pub document_type: DocumentType,
    pub file_name: String,
    pub file_size_bytes: u64,
    pub original_language: Language,
    pub upload_method: String,
    pub content_sha256: String,
}

impl CatalogEntry {
    /// Path relative to the stage root, e.g. `invoices/invoice_en_001.pdf`.
    pub fn stage_path(&self) -> String {
        format!(
            "{}/{}",
            self.document_type.stage_subdirectory(),
            self.file_name
        )
    }

    pub fn file_format(&self) -> &'static str {
        "PDF"
    }

    pub fn size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// A catalog row as listed back from the warehouse.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRecord {
    pub document_id: String,
    pub document_type: String,
    pub file_name: String,
    pub file_format: String,
    pub file_size_mb: Option<f64>,
    pub original_language: String,
    pub processing_status: ProcessingStatus,
    pub upload_date: Option<String>,
    pub last_processed_at: Option<String>,
}

impl CatalogRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            document_id: row.text("DOCUMENT_ID").unwrap_or_default(),
            document_type: row.text("DOCUMENT_TYPE").unwrap_or_default(),
            file_name: row.text("FILE_NAME").unwrap_or_default(),
            file_format: row.text("FILE_FORMAT").unwrap_or_default(),
            file_size_mb: row.float("FILE_SIZE_MB"),
            original_language: row.text("ORIGINAL_LANGUAGE").unwrap_or_default(),
            processing_status: ProcessingStatus::parse(
                &row.text("PROCESSING_STATUS").unwrap_or_default(),
            ),
            upload_date: row.text("UPLOAD_DATE"),
            last_processed_at: row.text("LAST_PROCESSED_AT"),
        }
    }
}
