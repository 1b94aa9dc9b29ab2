// file: src/upload/catalog.rs
// description: listing of the most recent catalog rows
// reference: document catalog view with status markers

use crate::error::Result;
use crate::exporter::Table;
use crate::models::CatalogRecord;
use crate::warehouse::{SqlBuilder, SqlSession};
use tracing::info;

const CATALOG_HEADERS: [&str; 9] = [
    "Document ID",
    "Type",
    "File Name",
    "Format",
    "Size (MB)",
    "Language",
    "Status",
    "Uploaded",
    "Last Processed",
];

pub struct CatalogListing<'a> {
    session: &'a dyn SqlSession,
    sql: &'a SqlBuilder,
    limit: usize,
}

impl<'a> CatalogListing<'a> {
    pub fn new(session: &'a dyn SqlSession, sql: &'a SqlBuilder, limit: usize) -> Self {
        Self {
            session,
            sql,
            limit,
        }
    }

    pub async fn fetch(&self) -> Result<Vec<CatalogRecord>> {
        let result = self.session.query(&self.sql.catalog_listing(self.limit)).await?;
        let records: Vec<CatalogRecord> = result.rows.iter().map(CatalogRecord::from_row).collect();
        info!("Fetched {} catalog rows", records.len());
        Ok(records)
    }

    pub fn header(count: usize) -> String {
        format!("Showing {} most recent documents", count)
    }
}

/// Display table; `decorate` adds the status emoji.
pub fn catalog_table(records: &[CatalogRecord], decorate: bool) -> Table {
    let mut table = Table::new(CATALOG_HEADERS);
    for record in records {
        let status = if decorate {
            record.processing_status.decorated()
        } else {
            record.processing_status.as_str().to_string()
        };
        table.push_row([
            record.document_id.clone(),
            record.document_type.clone(),
            record.file_name.clone(),
            record.file_format.clone(),
            record
                .file_size_mb
                .map(|mb| format!("{:.2}", mb))
                .unwrap_or_default(),
            record.original_language.clone(),
            status,
            record.upload_date.clone().unwrap_or_default(),
            record.last_processed_at.clone().unwrap_or_default(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::warehouse::Row;
    use crate::warehouse::mock::RecordingSession;
    use pretty_assertions::assert_eq;

    fn row(id: &str, status: &str) -> Row {
        Row::new()
            .with("DOCUMENT_ID", id)
            .with("DOCUMENT_TYPE", "INVOICE")
            .with("FILE_NAME", "invoice_en_001.pdf")
            .with("FILE_FORMAT", "PDF")
            .with("FILE_SIZE_MB", "0.01")
            .with("ORIGINAL_LANGUAGE", "en")
            .with("PROCESSING_STATUS", status)
            .with("UPLOAD_DATE", "2025-12-10 09:00:00")
    }

    #[tokio::test]
    async fn test_fetch_and_decorate() {
        let session = RecordingSession::new().respond(
            "RAW_DOCUMENT_CATALOG",
            vec![row("DOC_000000000001", "COMPLETED"), row("DOC_000000000002", "QUEUED")],
        );
        let sql = SqlBuilder::new(Config::default_config().objects);
        let listing = CatalogListing::new(&session, &sql, 50);

        let records = listing.fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(session.recorded()[0].ends_with("LIMIT 50"));

        let table = catalog_table(&records, true);
        assert_eq!(table.headers.len(), 9);
        assert_eq!(table.rows[0][6], "✅ COMPLETED");
        assert_eq!(table.rows[1][6], "❓ QUEUED");
        assert_eq!(table.rows[0][4], "0.01");
        assert_eq!(table.rows[0][8], "");

        let plain = catalog_table(&records, false);
        assert_eq!(plain.rows[0][6], "COMPLETED");
    }

    #[test]
    fn test_header() {
        assert_eq!(CatalogListing::header(7), "Showing 7 most recent documents");
    }
}
