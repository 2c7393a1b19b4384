// src/core/detector.rs
//
// Detector capability and the registry that runs selected strategies.

use std::collections::BTreeSet;

use anyhow::{Context, Result};

use super::analysis::{AnalyzerDetector, NerDetector, RegexDetector};
use crate::config::{DetectorKind, ScanConfig};
use crate::detection::{DetectError, Finding, StrategyOutcome};

/// One independent method of producing findings from text.
///
/// Implementations are stateless per call: `detect` takes the full corpus
/// and returns the complete finding set for that strategy.
pub trait PiiDetector {
    fn kind(&self) -> DetectorKind;

    fn detect(&self, text: &str) -> Result<BTreeSet<Finding>, DetectError>;
}

/// Holds one constructed detector per strategy, in declared order.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn PiiDetector>>,
}

impl DetectorRegistry {
    /// Construct all detectors up front. Any engine that fails to build
    /// (bad pattern, missing model files) aborts startup.
    pub fn load(config: &ScanConfig) -> Result<Self> {
        let regex = RegexDetector::new().context("failed to compile the pattern table")?;
        let ner = NerDetector::load(&config.model_dir, &config.ner_entities)
            .context("failed to load the NER model")?;
        let analyzer = AnalyzerDetector::new(
            &config.analyzer_entities,
            &config.language,
            config.min_score,
        )
        .context("failed to build the analyzer engine")?;

        Ok(Self::from_detectors(vec![
            Box::new(regex),
            Box::new(ner),
            Box::new(analyzer),
        ]))
    }

    /// Build a registry from pre-constructed detectors. Order is preserved.
    pub fn from_detectors(detectors: Vec<Box<dyn PiiDetector>>) -> Self {
        Self { detectors }
    }

    /// Available strategy kinds, in registration order.
    pub fn available(&self) -> Vec<DetectorKind> {
        self.detectors.iter().map(|d| d.kind()).collect()
    }

    /// Run the selected strategies in order, each independently over the
    /// full text. A strategy that errors degrades to an empty outcome with
    /// its message; the other strategies are unaffected.
    pub fn run(&self, text: &str, selection: &[DetectorKind]) -> Vec<StrategyOutcome> {
        let mut outcomes = Vec::with_capacity(selection.len());

        for kind in selection {
            let Some(detector) = self.detectors.iter().find(|d| d.kind() == *kind) else {
                log::warn!("no detector registered for '{}', skipping", kind.name());
                continue;
            };

            match detector.detect(text) {
                Ok(findings) => {
                    log::debug!("{} detector: {} finding(s)", kind.name(), findings.len());
                    outcomes.push(StrategyOutcome::success(*kind, findings));
                }
                Err(e) => {
                    log::warn!("{} detector failed: {e}", kind.name());
                    outcomes.push(StrategyOutcome::failure(*kind, e.to_string()));
                }
            }
        }

        outcomes
    }
}
