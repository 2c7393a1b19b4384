//! Detection result types shared by all strategies.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DetectorKind;

/// One detected PII instance: an entity kind paired with the matched text.
///
/// Ordering is (label, value), so a `BTreeSet<Finding>` iterates in the
/// lexicographic order the report prints in. Duplicate matches collapse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Finding {
    pub label: String,
    pub value: String,
}

impl Finding {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Result of running a single strategy: success with a finding set, or
/// failure with a message. A failed strategy never aborts the run; it is
/// reported alongside the others with an empty set.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyOutcome {
    pub detector: DetectorKind,
    pub findings: BTreeSet<Finding>,
    pub error: Option<String>,
}

impl StrategyOutcome {
    pub fn success(detector: DetectorKind, findings: BTreeSet<Finding>) -> Self {
        Self {
            detector,
            findings,
            error: None,
        }
    }

    pub fn failure(detector: DetectorKind, message: impl Into<String>) -> Self {
        Self {
            detector,
            findings: BTreeSet::new(),
            error: Some(message.into()),
        }
    }

    pub fn found_any(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Complete report for one scan run. Discarded after display.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub corpus_path: String,
    pub outcomes: Vec<StrategyOutcome>,
}

impl ScanReport {
    pub fn new(corpus_path: impl Into<String>, outcomes: Vec<StrategyOutcome>) -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            started_at: Utc::now(),
            corpus_path: corpus_path.into(),
            outcomes,
        }
    }

    /// Total findings across all strategies (no cross-strategy dedup).
    pub fn total_findings(&self) -> usize {
        self.outcomes.iter().map(|o| o.findings.len()).sum()
    }

    pub fn failed_strategies(&self) -> impl Iterator<Item = &StrategyOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }
}
