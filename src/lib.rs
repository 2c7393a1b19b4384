//! PiiCheckr - Scan text for personally identifiable information
//!
//! A PII scanning tool that runs three independent detection strategies
//! over a text corpus and reports findings per strategy.
//!
//! ## Strategies
//!
//! - **Regex**: a fixed table of named patterns (Email, Phone, SSN,
//!   Credit Card, Passport, Canadian SIN). Approximate, recall-first.
//! - **Ner**: a pretrained named-entity-recognition model run via ONNX
//!   Runtime, filtered to PERSON/GPE/ORG.
//! - **Analyzer**: a recognizer engine with context-aware scoring and
//!   checksum validation (Luhn, SSN area rules), configured with a fixed
//!   entity allow-list.
//!
//! Strategies are independent: no shared state, no cross-strategy
//! deduplication, and a failure in one degrades only that strategy's
//! result.
//!
//! ## Module Structure
//!
//! - `core` - corpus loading, the detector trait, and the three strategies
//! - `cli` - argument parsing, interactive selection, report formatting
//! - `config` - detector kinds, entity allow-lists, scan configuration
//! - `detection` - finding/report types and the detection error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use piicheckr::config::{DetectorKind, ScanConfig};
//! use piicheckr::core::{read_corpus, DetectorRegistry};
//! use piicheckr::detection::ScanReport;
//!
//! let config = ScanConfig::default();
//! let registry = DetectorRegistry::load(&config)?;
//!
//! let text = read_corpus(&config.corpus_path)?;
//! let outcomes = registry.run(&text, &[DetectorKind::Regex, DetectorKind::Analyzer]);
//! let report = ScanReport::new(config.corpus_path.display().to_string(), outcomes);
//!
//! println!("{} finding(s)", report.total_findings());
//! ```

// Core scanning functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

// Detection result types
pub mod detection;

// Re-export commonly used types at crate root for convenience
pub use config::{DetectorKind, EntityKind, ScanConfig};
pub use core::{
    AnalyzerDetector, AnalyzerEngine, DetectorRegistry, NerDetector, PiiDetector, RegexDetector,
};
pub use detection::{DetectError, Finding, ScanReport, StrategyOutcome};
