// file: src/dashboard/mod.rs
// description: insights dashboard backed by warehouse queries
// reference: internal module structure

pub mod analytics;
pub mod filter;
pub mod render;

pub use filter::DashboardFilter;

use crate::config::{DashboardConfig, ObjectsConfig};
use crate::error::Result;
use crate::exporter::Table;
use crate::models::{InsightRecord, ProcessingMetrics, ReviewItem};
use crate::warehouse::{SqlBuilder, SqlSession};
use tracing::{debug, info};

/// Everything one dashboard refresh reads from the warehouse.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub metrics: Option<ProcessingMetrics>,
    pub insights: Vec<InsightRecord>,
    pub review: Vec<ReviewItem>,
}

pub struct Dashboard<'a> {
    session: &'a dyn SqlSession,
    sql: SqlBuilder,
    config: DashboardConfig,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        session: &'a dyn SqlSession,
        objects: ObjectsConfig,
        config: DashboardConfig,
    ) -> Self {
        Self {
            session,
            sql: SqlBuilder::new(objects),
            config,
        }
    }

    pub async fn load(&self, filter: &DashboardFilter) -> Result<DashboardSnapshot> {
        let metrics = self
            .session
            .query(&self.sql.processing_metrics())
            .await?
            .first()
            .map(ProcessingMetrics::from_row);

        let insights_sql = self.sql.insights(filter, self.config.insights_limit);
        debug!("Insights query: {}", insights_sql);
        let insights: Vec<InsightRecord> = self
            .session
            .query(&insights_sql)
            .await?
            .rows
            .iter()
            .map(InsightRecord::from_row)
            .collect();

        let review: Vec<ReviewItem> = self
            .session
            .query(&self.sql.review_queue(self.config.review_limit))
            .await?
            .rows
            .iter()
            .map(ReviewItem::from_row)
            .collect();

        info!(
            "Dashboard loaded: {} insights, {} awaiting review",
            insights.len(),
            review.len()
        );

        Ok(DashboardSnapshot {
            metrics,
            insights,
            review,
        })
    }

    /// Full text report for one snapshot.
    pub fn render(&self, snapshot: &DashboardSnapshot) -> String {
        let width = self.config.chart_width;
        let mut out = Vec::new();

        out.push(render::section("Pipeline Health"));
        match &snapshot.metrics {
            Some(metrics) => out.push(render::render_kpis(&render::kpis(metrics))),
            None => out.push("  No processing metrics available.".to_string()),
        }

        out.push(render::section("Document Insights"));
        if snapshot.insights.is_empty() {
            out.push(render::NO_MATCHES.to_string());
        } else {
            out.push(render::insights_header(
                snapshot.insights.len(),
                self.config.insights_limit,
            ));
            out.push(render::render_table(&render::insights_table(
                &snapshot.insights,
            )));

            out.push(render::section("Analytics"));
            out.push("Value by Document Type".to_string());
            out.push(render::value_by_type_chart(&snapshot.insights, width));
            out.push("Documents by Priority".to_string());
            out.push(render::priority_chart(&snapshot.insights, width));
            out.push("Confidence Score Distribution".to_string());
            out.push(render::confidence_chart(&snapshot.insights, width));
        }

        out.push(render::section("Manual Review Queue"));
        if snapshot.review.is_empty() {
            out.push(render::REVIEW_QUEUE_EMPTY.to_string());
        } else {
            out.push(render::review_header(
                snapshot.review.len(),
                self.config.review_limit,
            ));
            out.push(render::render_table(&self.review_table(snapshot)));
        }

        out.join("\n")
    }

    pub fn review_table(&self, snapshot: &DashboardSnapshot) -> Table {
        render::review_table(&snapshot.review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Priority;
    use crate::warehouse::Row;
    use crate::warehouse::mock::RecordingSession;

    fn insight_row(doc_type: &str, amount: &str, priority: &str, confidence: &str) -> Row {
        Row::new()
            .with("DOCUMENT_ID", "DOC_ABCDEF123456")
            .with("DOCUMENT_TYPE", doc_type)
            .with("TOTAL_AMOUNT", amount)
            .with("VENDOR_TERRITORY", "Acme Corp")
            .with("CONFIDENCE_SCORE", confidence)
            .with("REQUIRES_MANUAL_REVIEW", "true")
            .with("PRIORITY_LEVEL", priority)
    }

    fn session() -> RecordingSession {
        RecordingSession::new()
            .respond(
                "V_PROCESSING_METRICS",
                vec![
                    Row::new()
                        .with("PIPELINE_HEALTH_STATUS", "HEALTHY")
                        .with("INSIGHT_DOCUMENTS", "2")
                        .with("RAW_DOCUMENTS", "3"),
                ],
            )
            .respond(
                "ORDER BY insight_created_at DESC",
                vec![
                    insight_row("Invoice", "14472.00", "High", "0.62"),
                    insight_row("Contract", "1200000", "Low", "0.97"),
                ],
            )
            .respond(
                "WHERE requires_manual_review = TRUE",
                vec![insight_row("Invoice", "14472.00", "High", "0.62")],
            )
    }

    #[tokio::test]
    async fn test_load_runs_three_queries() {
        let session = session();
        let config = Config::default_config();
        let dashboard = Dashboard::new(&session, config.objects, config.dashboard);

        let filter = DashboardFilter::from_selection(vec![], vec![Priority::High], true, None, None)
            .unwrap();
        let snapshot = dashboard.load(&filter).await.unwrap();

        assert_eq!(snapshot.metrics.unwrap().raw_documents, 3);
        assert_eq!(snapshot.insights.len(), 2);
        assert_eq!(snapshot.review.len(), 1);

        let statements = session.recorded();
        assert_eq!(statements.len(), 3);
        assert!(statements[1].contains("IN ('High')"));
        assert!(statements[1].contains("AND requires_manual_review = TRUE"));
        assert!(statements[1].ends_with("LIMIT 1000"));
        assert!(statements[2].ends_with("LIMIT 50"));
    }

    #[tokio::test]
    async fn test_render_sections() {
        let session = session();
        let config = Config::default_config();
        let dashboard = Dashboard::new(&session, config.objects, config.dashboard);
        let snapshot = dashboard.load(&DashboardFilter::default()).await.unwrap();

        let text = dashboard.render(&snapshot);
        assert!(text.contains("Showing 2 documents (max 1,000)"));
        assert!(text.contains("$14,472.00"));
        assert!(text.contains("62.00%"));
        assert!(text.contains("1 documents require manual review (showing top 50 by priority)"));
        assert!(text.contains("0.60-0.65"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let session = RecordingSession::new();
        let config = Config::default_config();
        let dashboard = Dashboard::new(&session, config.objects, config.dashboard);

        let text = dashboard.render(&DashboardSnapshot::default());
        assert!(text.contains(render::NO_MATCHES));
        assert!(text.contains(render::REVIEW_QUEUE_EMPTY));
        assert!(!text.contains("Analytics"));
    }
}
