// file: src/upload/mod.rs
// description: stage upload and catalog registration for local pdf files
// reference: per-file upload loop with success/failure summary

pub mod catalog;

pub use catalog::{CatalogListing, catalog_table};

use crate::config::UploadConfig;
use crate::error::{PipelineError, Result};
use crate::models::{CatalogEntry, DocumentId, DocumentType, Language};
use crate::pipeline::ProgressTracker;
use crate::utils::format::format_thousands;
use crate::utils::validation::Validator;
use crate::warehouse::{SqlBuilder, SqlSession};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// A file that reached the stage and the catalog.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub entry: CatalogEntry,
    pub statements: Vec<String>,
}

impl UploadedDocument {
    pub fn details(&self) -> Vec<String> {
        let entry = &self.entry;
        vec![
            format!("Document ID: {}", entry.document_id),
            format!("Type: {}", entry.document_type.catalog_code()),
            format!("Language: {}", entry.original_language.code()),
            format!(
                "Size: {} bytes ({:.2} MB)",
                format_thousands(entry.file_size_bytes as i64),
                entry.size_mb()
            ),
            format!("Stage Path: {}", entry.stage_path()),
        ]
    }
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub path: PathBuf,
    pub result: std::result::Result<UploadedDocument, String>,
}

impl UploadOutcome {
    pub fn display_name(&self) -> String {
        file_label(&self.path)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug, Default)]
pub struct UploadReport {
    pub total: usize,
    pub uploaded: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn any_uploaded(&self) -> bool {
        self.uploaded > 0
    }
}

/// Expand directories into the PDFs beneath them; plain paths pass through
/// untouched so that missing or non-PDF inputs are reported per file.
pub fn collect_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(false)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Skipping unreadable entry under {}: {}", input.display(), e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| Validator::validate_pdf_extension(path).is_ok())
                .collect();
            found.sort();
            debug!("Found {} PDFs under {}", found.len(), input.display());
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    files
}

/// Hash a file without holding it in memory.
fn sha256_file(path: &Path) -> Result<String> {
    let io_error = |source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_error)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(io_error)?;
    Ok(format!("{:x}", hasher.finalize()))
}

pub struct Uploader<'a> {
    session: Option<&'a dyn SqlSession>,
    sql: SqlBuilder,
    config: UploadConfig,
}

impl<'a> Uploader<'a> {
    pub fn new(session: &'a dyn SqlSession, sql: SqlBuilder, config: UploadConfig) -> Self {
        Self {
            session: Some(session),
            sql,
            config,
        }
    }

    /// Uploader without a warehouse session; only dry runs succeed.
    pub fn offline(sql: SqlBuilder, config: UploadConfig) -> Self {
        Self {
            session: None,
            sql,
            config,
        }
    }

    fn prepare(
        &self,
        path: &Path,
        document_type: DocumentType,
        language: Language,
    ) -> Result<(CatalogEntry, Vec<String>)> {
        let (file_name, size) =
            Validator::validate_upload_file(path, self.config.max_file_size_mb)?;

        let entry = CatalogEntry {
            document_id: DocumentId::generate(),
            document_type,
            file_name,
            file_size_bytes: size,
            original_language: language,
            upload_method: self.config.upload_method.clone(),
            content_sha256: sha256_file(path)?,
        };

        let statements = vec![
            self.sql.put_file(path, document_type.stage_subdirectory()),
            self.sql.insert_catalog_entry(&entry),
        ];

        Ok((entry, statements))
    }

    async fn upload_one(
        &self,
        path: &Path,
        document_type: DocumentType,
        language: Language,
        dry_run: bool,
    ) -> Result<UploadedDocument> {
        let (entry, statements) = self.prepare(path, document_type, language)?;

        if !dry_run {
            let session = self.session.ok_or_else(|| {
                PipelineError::Warehouse("No warehouse session for upload".to_string())
            })?;
            for statement in &statements {
                session.execute(statement).await?;
            }
        }

        Ok(UploadedDocument { entry, statements })
    }

    /// Upload every file, continuing past failures.
    pub async fn upload(
        &self,
        files: &[PathBuf],
        document_type: DocumentType,
        language: Language,
        dry_run: bool,
        tracker: &ProgressTracker,
    ) -> UploadReport {
        let mut report = UploadReport {
            total: files.len(),
            dry_run,
            ..Default::default()
        };

        for (idx, path) in files.iter().enumerate() {
            let name = file_label(path);
            tracker.start_file(&format!("{} ({}/{})", name, idx + 1, files.len()));

            match self.upload_one(path, document_type, language, dry_run).await {
                Ok(doc) => {
                    info!(
                        "{} cataloged as {} at {}",
                        doc.entry.file_name,
                        doc.entry.document_id,
                        doc.entry.stage_path()
                    );
                    tracker.file_completed(doc.entry.file_size_bytes);
                    report.uploaded += 1;
                    report.outcomes.push(UploadOutcome {
                        path: path.clone(),
                        result: Ok(doc),
                    });
                }
                Err(e) => {
                    error!("Failed to process {}: {}", name, e);
                    tracker.file_failed();
                    report.failed += 1;
                    report.outcomes.push(UploadOutcome {
                        path: path.clone(),
                        result: Err(e.to_string()),
                    });
                }
            }
        }

        tracker.finish();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::warehouse::mock::RecordingSession;
    use tempfile::TempDir;

    fn uploader(session: &RecordingSession) -> Uploader<'_> {
        let config = Config::default_config();
        Uploader::new(session, SqlBuilder::new(config.objects), config.upload)
    }

    fn write_pdf(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"%PDF-1.3\n%test\n").unwrap();
        path
    }

    #[test]
    fn test_sha256_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("abc.pdf");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(sha256_file(&temp.path().join("missing.pdf")).is_err());
    }

    #[test]
    fn test_collect_files_walks_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        write_pdf(temp.path(), "b.pdf");
        write_pdf(&nested, "a.PDF");
        fs::write(temp.path().join("notes.txt"), "x").unwrap();

        let files = collect_files(&[temp.path().to_path_buf(), PathBuf::from("/missing.pdf")]);
        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("b.pdf"));
        assert!(files[1].ends_with("nested/a.PDF"));
        assert_eq!(files[2], PathBuf::from("/missing.pdf"));
    }

    #[tokio::test]
    async fn test_upload_counts_failures_and_continues() {
        let temp = TempDir::new().unwrap();
        let good = write_pdf(temp.path(), "invoice_en_001.pdf");
        let also_good = write_pdf(temp.path(), "invoice_es_003.pdf");
        let not_pdf = temp.path().join("notes.txt");
        fs::write(&not_pdf, "x").unwrap();

        let session = RecordingSession::new();
        let uploader = uploader(&session);
        let tracker = ProgressTracker::hidden(3, "Uploading");

        let report = uploader
            .upload(
                &[good, not_pdf, also_good],
                DocumentType::Invoice,
                Language::Es,
                false,
                &tracker,
            )
            .await;

        assert_eq!(report.total, 3);
        assert_eq!(report.uploaded, 2);
        assert_eq!(report.failed, 1);
        assert!(report.outcomes[1].result.is_err());

        let statements = session.recorded();
        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("PUT 'file://"));
        assert!(statements[0].contains("DOCUMENT_STAGE/invoices/"));
        assert!(statements[1].contains("'invoices/invoice_en_001.pdf'"));
        assert!(statements[1].contains("'es'"));
        assert!(statements[1].contains("'INVOICE'"));

        let doc = report.outcomes[0].result.as_ref().unwrap();
        assert_eq!(doc.entry.file_size_bytes, 15);
        assert!(doc.details().contains(&"Stage Path: invoices/invoice_en_001.pdf".to_string()));
    }

    #[tokio::test]
    async fn test_insert_failure_is_per_file() {
        let temp = TempDir::new().unwrap();
        let first = write_pdf(temp.path(), "contract_de_005.pdf");

        let session = RecordingSession::new().fail_on("INSERT INTO");
        let uploader = uploader(&session);
        let tracker = ProgressTracker::hidden(1, "Uploading");

        let report = uploader
            .upload(&[first], DocumentType::Contract, Language::De, false, &tracker)
            .await;

        assert_eq!(report.uploaded, 0);
        assert_eq!(report.failed, 1);
        assert!(!report.any_uploaded());
        let message = report.outcomes[0].result.as_ref().unwrap_err();
        assert!(message.contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        let temp = TempDir::new().unwrap();
        let file = write_pdf(temp.path(), "royalty_pt_006.pdf");

        let session = RecordingSession::new();
        let uploader = uploader(&session);
        let tracker = ProgressTracker::hidden(1, "Uploading");

        let report = uploader
            .upload(&[file], DocumentType::RoyaltyStatement, Language::Pt, true, &tracker)
            .await;

        assert!(report.dry_run);
        assert_eq!(report.uploaded, 1);
        assert!(session.recorded().is_empty());
        let doc = report.outcomes[0].result.as_ref().unwrap();
        assert_eq!(doc.statements.len(), 2);
        assert!(doc.statements[0].contains("/royalty/"));
    }

    #[tokio::test]
    async fn test_offline_uploader_only_dry_runs() {
        let temp = TempDir::new().unwrap();
        let file = write_pdf(temp.path(), "invoice_de_005.pdf");
        let config = Config::default_config();
        let uploader = Uploader::offline(SqlBuilder::new(config.objects), config.upload);

        let tracker = ProgressTracker::hidden(1, "Uploading");
        let report = uploader
            .upload(std::slice::from_ref(&file), DocumentType::Invoice, Language::De, true, &tracker)
            .await;
        assert_eq!(report.uploaded, 1);
        let doc = report.outcomes[0].result.as_ref().unwrap();
        assert_eq!(doc.entry.content_sha256.len(), 64);

        let tracker = ProgressTracker::hidden(1, "Uploading");
        let report = uploader
            .upload(&[file], DocumentType::Invoice, Language::De, false, &tracker)
            .await;
        assert_eq!(report.failed, 1);
        assert!(
            report.outcomes[0]
                .result
                .as_ref()
                .unwrap_err()
                .contains("No warehouse session")
        );
    }
}
