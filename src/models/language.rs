// file: src/models/language.rs
// description: document languages accepted by the uploader and generator
// reference: ISO 639-1 codes

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    De,
    Pt,
    Ru,
    Zh,
    Fr,
    Ja,
    Ko,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::En,
        Language::Es,
        Language::De,
        Language::Pt,
        Language::Ru,
        Language::Zh,
        Language::Fr,
        Language::Ja,
        Language::Ko,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Fr => "fr",
            Language::Ja => "ja",
            Language::Ko => "ko",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::De => "German",
            Language::Pt => "Portuguese",
            Language::Ru => "Russian",
            Language::Zh => "Chinese",
            Language::Fr => "French",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| PipelineError::Validation(format!("Unsupported language: {}", s)))
    }
}
