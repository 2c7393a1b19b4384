//! Analyzer-based detection: a recognizer engine with scoring.
//!
//! The engine holds one recognizer per configured entity, collects scored
//! spans over the whole text, drops spans under the score threshold, and
//! resolves overlaps in favor of the highest score. Finding values are the
//! source substrings sliced by the reported offsets.

use std::collections::BTreeSet;

use super::super::detector::PiiDetector;
use super::recognizers::{RecognizedSpan, Recognizer};
use crate::config::{DetectorKind, EntityKind};
use crate::detection::{DetectError, Finding};

#[derive(Debug)]
pub struct AnalyzerEngine {
    recognizers: Vec<Recognizer>,
    min_score: f32,
}

impl AnalyzerEngine {
    /// Build recognizers for the configured entities. Only "en" recognizer
    /// definitions exist; any other language is a construction error.
    pub fn new(
        entities: &[EntityKind],
        language: &str,
        min_score: f32,
    ) -> Result<Self, DetectError> {
        if language != "en" {
            return Err(DetectError::UnsupportedLanguage(language.to_string()));
        }

        let recognizers = entities
            .iter()
            .map(|entity| Recognizer::build(*entity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            recognizers,
            min_score,
        })
    }

    pub fn entities(&self) -> Vec<EntityKind> {
        self.recognizers.iter().map(Recognizer::entity).collect()
    }

    /// Run every recognizer, threshold the spans, resolve overlaps, and
    /// return the survivors sorted by start offset.
    pub fn analyze(&self, text: &str) -> Vec<RecognizedSpan> {
        let candidates: Vec<RecognizedSpan> = self
            .recognizers
            .iter()
            .flat_map(|r| r.recognize(text))
            .filter(|span| span.score >= self.min_score)
            .collect();

        resolve_overlaps(candidates)
    }
}

/// Keep the highest-scoring span wherever spans overlap; ties go to the
/// longer span. Survivors come back sorted by start offset.
fn resolve_overlaps(mut spans: Vec<RecognizedSpan>) -> Vec<RecognizedSpan> {
    spans.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then((b.end - b.start).cmp(&(a.end - a.start)))
            .then(a.start.cmp(&b.start))
    });

    let mut kept: Vec<RecognizedSpan> = Vec::new();
    for span in spans {
        let overlaps = kept
            .iter()
            .any(|k| span.start < k.end && k.start < span.end);
        if !overlaps {
            kept.push(span);
        }
    }

    kept.sort_by_key(|span| span.start);
    kept
}

/// The analyzer strategy: delegates to the engine and slices findings out
/// of the source text by the returned offsets.
pub struct AnalyzerDetector {
    engine: AnalyzerEngine,
}

impl AnalyzerDetector {
    pub fn new(
        entities: &[EntityKind],
        language: &str,
        min_score: f32,
    ) -> Result<Self, DetectError> {
        Ok(Self {
            engine: AnalyzerEngine::new(entities, language, min_score)?,
        })
    }
}

impl PiiDetector for AnalyzerDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Analyzer
    }

    fn detect(&self, text: &str) -> Result<BTreeSet<Finding>, DetectError> {
        let findings = self
            .engine
            .analyze(text)
            .into_iter()
            .map(|span| Finding::new(span.entity.label(), &text[span.start..span.end]))
            .collect();
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> AnalyzerDetector {
        AnalyzerDetector::new(&EntityKind::all(), "en", 0.35).unwrap()
    }

    #[test]
    fn test_rejects_unsupported_language() {
        let err = AnalyzerEngine::new(&EntityKind::all(), "de", 0.35).unwrap_err();
        assert!(matches!(err, DetectError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_findings_are_sliced_from_source() {
        let findings = detector()
            .detect("Email jane@example.com, SSN 123-45-6789.")
            .unwrap();

        assert!(findings.contains(&Finding::new("EMAIL_ADDRESS", "jane@example.com")));
        assert!(findings.contains(&Finding::new("US_SSN", "123-45-6789")));
    }

    #[test]
    fn test_threshold_hides_weak_spans() {
        // A bare 9-digit run scores 0.05: below threshold without context.
        let findings = detector().detect("tracking id 912803456 arrived").unwrap();
        assert!(!findings.iter().any(|f| f.label == "US_PASSPORT"));

        let findings = detector().detect("passport number 912803456").unwrap();
        assert!(findings.contains(&Finding::new("US_PASSPORT", "912803456")));
    }

    #[test]
    fn test_luhn_gate_on_credit_cards() {
        let findings = detector()
            .detect("visa card 4111 1111 1111 1111 expires soon")
            .unwrap();
        assert!(findings.contains(&Finding::new("CREDIT_CARD", "4111 1111 1111 1111")));

        let findings = detector()
            .detect("visa card 4111 1111 1111 1112 expires soon")
            .unwrap();
        assert!(!findings.iter().any(|f| f.label == "CREDIT_CARD"));
    }

    #[test]
    fn test_overlap_resolution_prefers_higher_score() {
        let spans = resolve_overlaps(vec![
            RecognizedSpan {
                entity: EntityKind::PhoneNumber,
                start: 10,
                end: 22,
                score: 0.4,
            },
            RecognizedSpan {
                entity: EntityKind::UsSsn,
                start: 10,
                end: 21,
                score: 0.85,
            },
            RecognizedSpan {
                entity: EntityKind::EmailAddress,
                start: 30,
                end: 46,
                score: 0.85,
            },
        ]);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].entity, EntityKind::UsSsn);
        assert_eq!(spans[1].entity, EntityKind::EmailAddress);
    }

    #[test]
    fn test_clean_text_yields_empty_set() {
        let findings = detector().detect("nothing sensitive here").unwrap();
        assert!(findings.is_empty());
    }
}
