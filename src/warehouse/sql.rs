// file: src/warehouse/sql.rs
// description: SQL statement builders for catalog, insights, stage and pipeline
// reference: snowflake sql dialect (PUT, OBJECT_CONSTRUCT, variant paths)

use crate::config::{ObjectsConfig, PipelineConfig};
use crate::dashboard::DashboardFilter;
use crate::models::CatalogEntry;
use std::path::Path;

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `'a', 'b', 'c'`
pub fn literal_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| quote_literal(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Processing steps run by the AI pipeline, in order.
pub const PIPELINE_STEPS: [(&str, &str); 5] = [
    ("Parse documents (extract text and layout)", "01_parse_documents.sql"),
    ("Translate non-English content", "02_translate_content.sql"),
    ("Classify by document type and priority", "03_classify_documents.sql"),
    ("Extract entities (amounts, dates, names)", "04_extract_entities.sql"),
    ("Aggregate insights", "05_aggregate_insights.sql"),
];

const PRIORITY_PATH: &str = "metadata:priority_level::STRING";

#[derive(Debug, Clone)]
pub struct SqlBuilder {
    objects: ObjectsConfig,
}

impl SqlBuilder {
    pub fn new(objects: ObjectsConfig) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &ObjectsConfig {
        &self.objects
    }

    pub fn processing_metrics(&self) -> String {
        format!("SELECT * FROM {}", self.objects.metrics_ref())
    }

    pub fn insights(&self, filter: &DashboardFilter, limit: usize) -> String {
        let mut sql = format!(
            "SELECT
    insight_id,
    document_id,
    document_type,
    total_amount,
    currency,
    document_date,
    vendor_territory,
    confidence_score,
    requires_manual_review,
    {PRIORITY_PATH} AS priority_level,
    metadata:business_category::STRING AS business_category,
    processing_time_seconds,
    insight_created_at
FROM {}
WHERE 1=1",
            self.objects.insights_ref()
        );

        let types = filter.type_labels();
        if !types.is_empty() {
            sql.push_str(&format!(
                " AND document_type IN ({})",
                literal_list(&types)
            ));
        }

        let priorities = filter.priority_labels();
        if !priorities.is_empty() {
            sql.push_str(&format!(
                " AND {PRIORITY_PATH} IN ({})",
                literal_list(&priorities)
            ));
        }

        if filter.review_only {
            sql.push_str(" AND requires_manual_review = TRUE");
        }

        if let Some(from) = filter.date_from {
            sql.push_str(&format!(
                " AND document_date >= {}",
                quote_literal(&from.format("%Y-%m-%d").to_string())
            ));
        }

        if let Some(to) = filter.date_to {
            sql.push_str(&format!(
                " AND document_date <= {}",
                quote_literal(&to.format("%Y-%m-%d").to_string())
            ));
        }

        sql.push_str(&format!(
            " ORDER BY insight_created_at DESC LIMIT {}",
            limit
        ));
        sql
    }

    pub fn review_queue(&self, limit: usize) -> String {
        format!(
            "SELECT
    document_id,
    document_type,
    total_amount,
    vendor_territory,
    confidence_score,
    {PRIORITY_PATH} AS priority_level,
    insight_created_at
FROM {}
WHERE requires_manual_review = TRUE
ORDER BY
    CASE {PRIORITY_PATH}
        WHEN 'High' THEN 1
        WHEN 'Medium' THEN 2
        ELSE 3
    END,
    confidence_score ASC
LIMIT {}",
            self.objects.insights_ref(),
            limit
        )
    }

    pub fn catalog_listing(&self, limit: usize) -> String {
        format!(
            "SELECT
    document_id,
    document_type,
    file_name,
    file_format,
    ROUND(file_size_bytes / 1024.0 / 1024.0, 2) AS file_size_mb,
    original_language,
    processing_status,
    upload_date,
    last_processed_at
FROM {}
ORDER BY upload_date DESC
LIMIT {}",
            self.objects.catalog_ref(),
            limit
        )
    }

    /// `PUT` of one local file into a stage subdirectory.
    pub fn put_file(&self, local: &Path, subdirectory: &str) -> String {
        let local = local.to_string_lossy().replace('\\', "/");
        format!(
            "PUT {} {}/{}/ AUTO_COMPRESS=FALSE OVERWRITE=TRUE",
            quote_literal(&format!("file://{}", local)),
            self.objects.stage_ref(),
            subdirectory
        )
    }

    /// `PUT` of every pdf in a local directory into the stage root.
    pub fn put_directory_glob(&self, dir: &Path) -> String {
        let dir = dir.to_string_lossy().replace('\\', "/");
        format!(
            "PUT file://{}/*.pdf {} AUTO_COMPRESS=FALSE;",
            dir,
            self.objects.stage_ref()
        )
    }

    /// Catalog insert. `OBJECT_CONSTRUCT` is not accepted inside a `VALUES`
    /// clause, so the row is produced by a `SELECT`.
    pub fn insert_catalog_entry(&self, entry: &CatalogEntry) -> String {
        format!(
            "INSERT INTO {} (
    document_id,
    document_type,
    stage_name,
    file_path,
    file_name,
    file_format,
    file_size_bytes,
    original_language,
    processing_status,
    metadata
)
SELECT
    {},
    {},
    {},
    {},
    {},
    {},
    {},
    {},
    'PENDING',
    OBJECT_CONSTRUCT(
        'upload_method', {},
        'uploaded_at', CURRENT_TIMESTAMP()::STRING,
        'file_ready', TRUE,
        'content_sha256', {}
    )",
            self.objects.catalog_ref(),
            quote_literal(entry.document_id.as_str()),
            quote_literal(entry.document_type.catalog_code()),
            quote_literal(&self.objects.stage_ref()),
            quote_literal(&entry.stage_path()),
            quote_literal(&entry.file_name),
            quote_literal(entry.file_format()),
            entry.file_size_bytes,
            quote_literal(entry.original_language.code()),
            quote_literal(&entry.upload_method),
            quote_literal(&entry.content_sha256),
        )
    }

    /// Worksheet script that runs the AI processing steps and shows results.
    pub fn pipeline_script(&self, pipeline: &PipelineConfig) -> String {
        let location = pipeline.scripts_location.trim_end_matches('/');
        let mut script = format!(
            "-- Execute AI processing pipeline\nUSE ROLE {};\nUSE DATABASE {};\nUSE WAREHOUSE {};\n",
            pipeline.role, pipeline.database, pipeline.warehouse
        );

        for (idx, (description, file)) in PIPELINE_STEPS.iter().enumerate() {
            script.push_str(&format!(
                "\n-- {}. {}\nEXECUTE IMMEDIATE FROM {}/{};\n",
                idx + 1,
                description,
                location,
                file
            ));
        }

        script.push_str(&format!(
            "\n-- {}. View results\nSELECT * FROM {}\nORDER BY insight_created_at DESC\nLIMIT 20;\n",
            PIPELINE_STEPS.len() + 1,
            self.objects.insights_ref()
        ));

        script
    }
}
