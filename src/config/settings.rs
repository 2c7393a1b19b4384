// src/config/settings.rs
//
// Scan configuration: detector kinds, entity allow-lists, model location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The three independent detection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    Regex,
    Ner,
    Analyzer,
}

impl DetectorKind {
    /// All strategies in declared (menu and execution) order.
    pub fn all() -> Vec<Self> {
        vec![Self::Regex, Self::Ner, Self::Analyzer]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Ner => "ner",
            Self::Analyzer => "analyzer",
        }
    }

    /// Capitalized name used in report headers and the selection menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Regex => "Regex",
            Self::Ner => "Ner",
            Self::Analyzer => "Analyzer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Regex => "fixed table of named patterns, approximate and recall-first",
            Self::Ner => "pretrained NER model (PERSON/GPE/ORG) via ONNX Runtime",
            Self::Analyzer => "recognizer engine with context scoring and checksums",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "regex" => Some(Self::Regex),
            "ner" => Some(Self::Ner),
            "analyzer" => Some(Self::Analyzer),
            _ => None,
        }
    }
}

/// Entity categories the analyzer engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    PhoneNumber,
    EmailAddress,
    CreditCard,
    UsSsn,
    UsPassport,
    CaSin,
}

impl EntityKind {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Person,
            Self::PhoneNumber,
            Self::EmailAddress,
            Self::CreditCard,
            Self::UsSsn,
            Self::UsPassport,
            Self::CaSin,
        ]
    }

    /// Label used on findings, e.g. "EMAIL_ADDRESS: jane@example.com".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::CreditCard => "CREDIT_CARD",
            Self::UsSsn => "US_SSN",
            Self::UsPassport => "US_PASSPORT",
            Self::CaSin => "CA_SIN",
        }
    }
}

/// Complete configuration for one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Input corpus file.
    pub corpus_path: PathBuf,
    /// Directory holding the NER model files (model.onnx + labels.json).
    pub model_dir: PathBuf,
    /// NER entity categories kept after inference.
    pub ner_entities: Vec<String>,
    /// Analyzer entity allow-list.
    pub analyzer_entities: Vec<EntityKind>,
    /// Recognizer language.
    pub language: String,
    /// Minimum analyzer score for a span to be reported.
    pub min_score: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("input_corpus.txt"),
            model_dir: Self::default_model_dir(),
            ner_entities: vec!["PERSON".into(), "GPE".into(), "ORG".into()],
            analyzer_entities: EntityKind::all(),
            language: "en".to_string(),
            min_score: 0.35,
        }
    }
}

impl ScanConfig {
    /// Default model location: `<user data dir>/piicheckr/models`.
    pub fn default_model_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("piicheckr")
            .join("models")
    }
}
