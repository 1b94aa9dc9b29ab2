// file: src/models/insight.rs
// description: insight records, review queue items and pipeline metrics
// reference: FCT_DOCUMENT_INSIGHTS and V_PROCESSING_METRICS layouts

use crate::warehouse::Row;
use serde::Serialize;

/// Single-row summary from the processing metrics view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessingMetrics {
    pub pipeline_health_status: String,
    pub completion_percentage: f64,
    pub insight_documents: i64,
    pub raw_documents: i64,
    pub avg_overall_confidence: f64,
    pub documents_needing_review: i64,
    pub manual_review_percentage: f64,
    pub total_value_processed_usd: f64,
}

impl ProcessingMetrics {
    pub fn from_row(row: &Row) -> Self {
        Self {
            pipeline_health_status: row
                .text("PIPELINE_HEALTH_STATUS")
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            completion_percentage: row.float("COMPLETION_PERCENTAGE").unwrap_or(0.0),
            insight_documents: row.integer("INSIGHT_DOCUMENTS").unwrap_or(0),
            raw_documents: row.integer("RAW_DOCUMENTS").unwrap_or(0),
            avg_overall_confidence: row.float("AVG_OVERALL_CONFIDENCE").unwrap_or(0.0),
            documents_needing_review: row.integer("DOCUMENTS_NEEDING_REVIEW").unwrap_or(0),
            manual_review_percentage: row.float("MANUAL_REVIEW_PERCENTAGE").unwrap_or(0.0),
            total_value_processed_usd: row.float("TOTAL_VALUE_PROCESSED_USD").unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsightRecord {
    pub insight_id: Option<String>,
    pub document_id: String,
    pub document_type: String,
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    pub document_date: Option<String>,
    pub vendor_territory: Option<String>,
    pub confidence_score: Option<f64>,
    pub requires_manual_review: bool,
    pub priority_level: Option<String>,
    pub business_category: Option<String>,
    pub processing_time_seconds: Option<f64>,
    pub insight_created_at: Option<String>,
}

impl InsightRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            insight_id: row.text("INSIGHT_ID"),
            document_id: row.text("DOCUMENT_ID").unwrap_or_default(),
            document_type: row.text("DOCUMENT_TYPE").unwrap_or_default(),
            total_amount: row.float("TOTAL_AMOUNT"),
            currency: row.text("CURRENCY"),
            document_date: row.text("DOCUMENT_DATE"),
            vendor_territory: row.text("VENDOR_TERRITORY"),
            confidence_score: row.float("CONFIDENCE_SCORE"),
            requires_manual_review: row.boolean("REQUIRES_MANUAL_REVIEW").unwrap_or(false),
            priority_level: row.text("PRIORITY_LEVEL"),
            business_category: row.text("BUSINESS_CATEGORY"),
            processing_time_seconds: row.float("PROCESSING_TIME_SECONDS"),
            insight_created_at: row.text("INSIGHT_CREATED_AT"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewItem {
    pub document_id: String,
    pub document_type: String,
    pub total_amount: Option<f64>,
    pub vendor_territory: Option<String>,
    pub confidence_score: Option<f64>,
    pub priority_level: Option<String>,
    pub insight_created_at: Option<String>,
}

impl ReviewItem {
    pub fn from_row(row: &Row) -> Self {
        Self {
            document_id: row.text("DOCUMENT_ID").unwrap_or_default(),
            document_type: row.text("DOCUMENT_TYPE").unwrap_or_default(),
            total_amount: row.float("TOTAL_AMOUNT"),
            vendor_territory: row.text("VENDOR_TERRITORY"),
            confidence_score: row.float("CONFIDENCE_SCORE"),
            priority_level: row.text("PRIORITY_LEVEL"),
            insight_created_at: row.text("INSIGHT_CREATED_AT"),
        }
    }
}
