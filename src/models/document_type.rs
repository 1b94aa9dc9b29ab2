// file: src/models/document_type.rs
// description: document type and review priority enumerations
// reference: catalog and insight table vocabularies

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document type as stored in the raw catalog (`INVOICE`, `CONTRACT`, ...).
///
/// The insight tables use a human label for the same types
/// (`Invoice`, `Royalty Statement`, ...), see [`DocumentType::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Invoice,
    RoyaltyStatement,
    Contract,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Invoice,
        DocumentType::RoyaltyStatement,
        DocumentType::Contract,
        DocumentType::Other,
    ];

    /// Types the extraction pipeline produces insights for.
    pub const INSIGHT_TYPES: [DocumentType; 3] = [
        DocumentType::Invoice,
        DocumentType::RoyaltyStatement,
        DocumentType::Contract,
    ];

    pub fn catalog_code(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "INVOICE",
            DocumentType::RoyaltyStatement => "ROYALTY_STATEMENT",
            DocumentType::Contract => "CONTRACT",
            DocumentType::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "Invoice",
            DocumentType::RoyaltyStatement => "Royalty Statement",
            DocumentType::Contract => "Contract",
            DocumentType::Other => "Other",
        }
    }

    /// Stage subdirectory uploads of this type land in.
    pub fn stage_subdirectory(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoices",
            DocumentType::RoyaltyStatement => "royalty",
            DocumentType::Contract => "contracts",
            DocumentType::Other => "other",
        }
    }

    /// Prefix of generated sample files; `None` for types with no template.
    pub fn file_prefix(&self) -> Option<&'static str> {
        match self {
            DocumentType::Invoice => Some("invoice"),
            DocumentType::RoyaltyStatement => Some("royalty"),
            DocumentType::Contract => Some("contract"),
            DocumentType::Other => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_code())
    }
}

impl FromStr for DocumentType {
    type Err = PipelineError;

    /// Accepts catalog codes, labels and file prefixes in any case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "INVOICE" => Ok(DocumentType::Invoice),
            "ROYALTY_STATEMENT" | "ROYALTY" => Ok(DocumentType::RoyaltyStatement),
            "CONTRACT" => Ok(DocumentType::Contract),
            "OTHER" => Ok(DocumentType::Other),
            _ => Err(PipelineError::Validation(format!(
                "Unknown document type: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Review queue ordering: High first, anything unknown last.
    pub fn rank(label: Option<&str>) -> u8 {
        match label {
            Some("High") => 1,
            Some("Medium") => 2,
            _ => 3,
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Priority::High => "#FF6B6B",
            Priority::Medium => "#FFA500",
            Priority::Low => "#4ECDC4",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(PipelineError::Validation(format!("Unknown priority: {}", s))),
        }
    }
}
