// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod catalog;
pub mod document_type;
pub mod insight;
pub mod language;

pub use catalog::{CatalogEntry, CatalogRecord, DocumentId, ProcessingStatus};
pub use document_type::{DocumentType, Priority};
pub use insight::{InsightRecord, ProcessingMetrics, ReviewItem};
pub use language::Language;
