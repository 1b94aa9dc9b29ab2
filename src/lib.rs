// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod exporter;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod upload;
pub mod utils;
pub mod warehouse;

pub use config::{
    Config, DashboardConfig, GeneratorConfig, ObjectsConfig, PipelineConfig, UploadConfig,
    WarehouseBackend, WarehouseConfig,
};
pub use dashboard::{Dashboard, DashboardFilter, DashboardSnapshot};
pub use error::{PipelineError, Result};
pub use exporter::{CsvExporter, JsonExporter, Table};
pub use generator::{GeneratedDocument, GenerationSummary, SampleGenerator};
pub use models::{
    CatalogEntry, CatalogRecord, DocumentId, DocumentType, InsightRecord, Language, Priority,
    ProcessingMetrics, ProcessingStatus, ReviewItem,
};
pub use pipeline::{ProgressTracker, RunStats};
pub use upload::{CatalogListing, UploadReport, Uploader};
pub use utils::Validator;
pub use warehouse::{QueryResult, Row, SqlBuilder, SqlSession};
