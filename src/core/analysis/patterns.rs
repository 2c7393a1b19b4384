//! Pattern-based detection: a fixed table of named regular expressions.
//!
//! The table is approximate. There is no checksum validation
//! and no anchoring beyond word boundaries; the passport pattern in
//! particular matches most 6-9 character uppercase alphanumeric tokens.
//! Every non-overlapping match becomes a finding labeled with its pattern
//! name.

use std::collections::BTreeSet;

use regex::Regex;

use super::super::detector::PiiDetector;
use crate::config::DetectorKind;
use crate::detection::{DetectError, Finding};

const PATTERN_TABLE: &[(&str, &str)] = &[
    ("Email", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
    (
        "Phone",
        r"\b(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
    ),
    ("SSN", r"\b\d{3}-\d{2}-\d{4}\b"),
    ("Credit Card", r"\b(?:\d[ -]*?){13,16}\b"),
    ("Passport", r"\b[A-Z0-9]{6,9}\b"),
    ("Canadian SIN", r"\b\d{3}-\d{3}-\d{3}\b"),
];

pub struct RegexDetector {
    patterns: Vec<(&'static str, Regex)>,
}

impl RegexDetector {
    /// Compile the pattern table. A pattern that fails to compile is a
    /// fatal startup error.
    pub fn new() -> Result<Self, DetectError> {
        let mut patterns = Vec::with_capacity(PATTERN_TABLE.len());
        for (name, pattern) in PATTERN_TABLE {
            let regex = Regex::new(pattern).map_err(|source| DetectError::Pattern {
                name: (*name).to_string(),
                source,
            })?;
            patterns.push((*name, regex));
        }
        Ok(Self { patterns })
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|(name, _)| *name).collect()
    }
}

impl PiiDetector for RegexDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Regex
    }

    fn detect(&self, text: &str) -> Result<BTreeSet<Finding>, DetectError> {
        let mut findings = BTreeSet::new();
        for (name, regex) in &self.patterns {
            for m in regex.find_iter(text) {
                findings.insert(Finding::new(*name, m.as_str()));
            }
        }
        Ok(findings)
    }
}
