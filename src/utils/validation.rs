// file: src/utils/validation.rs
// description: upload input validation helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

const BYTES_PER_MB: u64 = 1024 * 1024;

lazy_static! {
    // Names end up inside quoted SQL literals and stage paths.
    static ref SAFE_FILE_NAME: Regex = Regex::new(
        r#"^[^'"`\\/\x00-\x1f]+$"#
    ).expect("SAFE_FILE_NAME regex is valid");
}

pub struct Validator;

impl Validator {
    pub fn validate_pdf_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "File is not a PDF: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_file_name(path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                PipelineError::Validation(format!("Invalid file name: {}", path.display()))
            })?;

        if !SAFE_FILE_NAME.is_match(name) {
            return Err(PipelineError::Validation(format!(
                "File name contains quote or separator characters: {}",
                name
            )));
        }

        Ok(name.to_string())
    }

    /// Returns the file size in bytes.
    pub fn validate_file_size(path: &Path, max_mb: u64) -> Result<u64> {
        let metadata = fs::metadata(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let size = metadata.len();
        if size > max_mb.saturating_mul(BYTES_PER_MB) {
            return Err(PipelineError::Validation(format!(
                "{} is {:.1} MB, limit is {} MB",
                path.display(),
                size as f64 / BYTES_PER_MB as f64,
                max_mb
            )));
        }

        Ok(size)
    }

    /// All upload checks for a single file; returns (file name, size in bytes).
    pub fn validate_upload_file(path: &Path, max_mb: u64) -> Result<(String, u64)> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Self::validate_pdf_extension(path)?;
        let name = Self::validate_file_name(path)?;
        let size = Self::validate_file_size(path, max_mb)?;

        Ok((name, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        assert!(Validator::validate_pdf_extension(Path::new("a.pdf")).is_ok());
        assert!(Validator::validate_pdf_extension(Path::new("a.PDF")).is_ok());
        assert!(Validator::validate_pdf_extension(Path::new("a.Pdf")).is_ok());
        assert!(Validator::validate_pdf_extension(Path::new("a.docx")).is_err());
        assert!(Validator::validate_pdf_extension(Path::new("pdf")).is_err());
    }

    #[test]
    fn test_file_name_rejects_quotes() {
        assert_eq!(
            Validator::validate_file_name(Path::new("/tmp/invoice_en_001.pdf")).unwrap(),
            "invoice_en_001.pdf"
        );
        assert!(Validator::validate_file_name(Path::new("/tmp/o'brien.pdf")).is_err());
        assert!(Validator::validate_file_name(Path::new("/tmp/say\"hi\".pdf")).is_err());
        assert!(Validator::validate_file_name(Path::new("/tmp/back\\slash.pdf")).is_err());
    }

    #[test]
    fn test_upload_file_checks() {
        let temp = TempDir::new().unwrap();
        let pdf = temp.path().join("contract_de_005.pdf");
        fs::write(&pdf, b"%PDF-1.4 test").unwrap();

        let (name, size) = Validator::validate_upload_file(&pdf, 1).unwrap();
        assert_eq!(name, "contract_de_005.pdf");
        assert_eq!(size, 13);

        assert!(Validator::validate_upload_file(temp.path(), 1).is_err());
        assert!(Validator::validate_upload_file(&temp.path().join("missing.pdf"), 1).is_err());

        let txt = temp.path().join("notes.txt");
        fs::write(&txt, b"hello").unwrap();
        assert!(Validator::validate_upload_file(&txt, 1).is_err());
    }

    #[test]
    fn test_size_limit() {
        let temp = TempDir::new().unwrap();
        let pdf = temp.path().join("big.pdf");
        fs::write(&pdf, vec![0u8; (BYTES_PER_MB + 1) as usize]).unwrap();

        assert!(Validator::validate_file_size(&pdf, 1).is_err());
        assert!(Validator::validate_file_size(&pdf, 2).is_ok());
    }
}
