// file: src/generator/mod.rs
// description: synthetic multilingual sample document generator
// reference: internal module structure

pub mod canvas;
pub mod contract;
pub mod fonts;
pub mod invoice;
pub mod royalty;
pub mod templates;

pub use canvas::{Align, Cell, PdfCanvas};
pub use contract::Contract;
pub use invoice::{Invoice, InvoiceLine};
pub use royalty::{RoyaltyLine, RoyaltyStatement};

use crate::config::GeneratorConfig;
use crate::error::{PipelineError, Result};
use crate::models::{DocumentType, Language};
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Languages and sequence numbers generated for every document type.
pub const DEFAULT_DISTRIBUTION: [(Language, u32); 6] = [
    (Language::En, 1),
    (Language::En, 2),
    (Language::Es, 3),
    (Language::Es, 4),
    (Language::De, 5),
    (Language::Pt, 6),
];

/// `<prefix>_<lang>_<NNN>.pdf`
pub fn sample_file_name(doc_type: DocumentType, lang: Language, number: u32) -> Result<String> {
    let prefix = doc_type.file_prefix().ok_or_else(|| {
        PipelineError::Generation(format!("No sample template for {}", doc_type))
    })?;
    Ok(format!("{}_{}_{:03}.pdf", prefix, lang.code(), number))
}

#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub document_type: DocumentType,
    pub language: Language,
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    pub documents: Vec<GeneratedDocument>,
}

impl GenerationSummary {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn by_type(&self) -> BTreeMap<DocumentType, usize> {
        let mut counts = BTreeMap::new();
        for doc in &self.documents {
            *counts.entry(doc.document_type).or_insert(0) += 1;
        }
        counts
    }

    pub fn by_language(&self) -> BTreeMap<Language, usize> {
        let mut counts = BTreeMap::new();
        for doc in &self.documents {
            *counts.entry(doc.language).or_insert(0) += 1;
        }
        counts
    }
}

pub struct SampleGenerator {
    output_dir: PathBuf,
    rng: StdRng,
    today: NaiveDate,
}

impl SampleGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Self::with_date(config, Local::now().date_naive())
    }

    /// Generator with a fixed "today"; all relative dates derive from it.
    pub fn with_date(config: &GeneratorConfig, today: NaiveDate) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).map_err(|source| PipelineError::FileOperation {
            path: config.output_dir.clone(),
            source,
        })?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            output_dir: config.output_dir.clone(),
            rng,
            today,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn generate(
        &mut self,
        doc_type: DocumentType,
        lang: Language,
        number: u32,
    ) -> Result<GeneratedDocument> {
        let file_name = sample_file_name(doc_type, lang, number)?;

        let canvas = match doc_type {
            DocumentType::Invoice => {
                Invoice::sample(lang, number, self.today, &mut self.rng).render()?
            }
            DocumentType::RoyaltyStatement => {
                RoyaltyStatement::sample(lang, number, &mut self.rng)?.render()?
            }
            DocumentType::Contract => {
                Contract::sample(lang, number, self.today, &mut self.rng).render()?
            }
            DocumentType::Other => {
                return Err(PipelineError::Generation(
                    "Document type OTHER has no sample template".to_string(),
                ));
            }
        };

        if !templates::has_template(lang) {
            debug!("No {} template for {}, using English labels", lang, doc_type);
        }

        let path = self.output_dir.join(&file_name);
        let bytes = canvas.to_bytes()?;
        fs::write(&path, &bytes).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());

        Ok(GeneratedDocument {
            document_type: doc_type,
            language: lang,
            file_name,
            path,
            size_bytes: bytes.len() as u64,
        })
    }

    /// Generate every template type over `distribution`.
    pub fn generate_batch(
        &mut self,
        distribution: &[(Language, u32)],
        mut on_generated: impl FnMut(&GeneratedDocument),
    ) -> Result<GenerationSummary> {
        let mut summary = GenerationSummary::default();

        for doc_type in DocumentType::INSIGHT_TYPES {
            info!("Generating {} documents", doc_type.label());
            for &(lang, number) in distribution {
                let doc = self.generate(doc_type, lang, number)?;
                on_generated(&doc);
                summary.documents.push(doc);
            }
        }

        Ok(summary)
    }
}
