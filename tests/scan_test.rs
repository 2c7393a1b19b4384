// tests/scan_test.rs
//
// End-to-end runs over the library API: corpus from disk, selection
// parsing, detection, and report formatting. The NER strategy needs model
// files, so these runs use the regex and analyzer strategies plus stubs.

use std::collections::BTreeSet;
use std::io::Write;

use piicheckr::cli::{format_report, parse_selection};
use piicheckr::config::{DetectorKind, EntityKind};
use piicheckr::detection::{DetectError, Finding, ScanReport, StrategyOutcome};
use piicheckr::{AnalyzerDetector, DetectorRegistry, PiiDetector, RegexDetector};

const CORPUS: &str = "\
Customer note from Dr. Alice Smith:
email jane.doe@example.com, phone 555-123-4567.
SSN on record: 123-45-6789. Visa card 4111 1111 1111 1111.
";

struct BrokenDetector;

impl PiiDetector for BrokenDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Ner
    }

    fn detect(&self, _text: &str) -> Result<BTreeSet<Finding>, DetectError> {
        Err(DetectError::Inference {
            reason: "model unavailable".to_string(),
        })
    }
}

fn registry() -> DetectorRegistry {
    DetectorRegistry::from_detectors(vec![
        Box::new(RegexDetector::new().unwrap()),
        Box::new(BrokenDetector),
        Box::new(AnalyzerDetector::new(&EntityKind::all(), "en", 0.35).unwrap()),
    ])
}

#[test]
fn test_scan_from_file_to_report() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{CORPUS}").unwrap();

    let text = piicheckr::core::read_corpus(file.path()).unwrap();
    let registry = registry();

    let selection = parse_selection("all", &registry.available()).unwrap();
    let outcomes = registry.run(&text, &selection);
    let report = ScanReport::new(file.path().display().to_string(), outcomes);

    assert_eq!(report.outcomes.len(), 3);

    let regex = &report.outcomes[0];
    assert!(regex
        .findings
        .contains(&Finding::new("Email", "jane.doe@example.com")));
    assert!(regex
        .findings
        .contains(&Finding::new("SSN", "123-45-6789")));

    let ner = &report.outcomes[1];
    assert!(ner.findings.is_empty());
    assert!(ner.error.as_deref().unwrap().contains("model unavailable"));

    let analyzer = &report.outcomes[2];
    assert!(analyzer
        .findings
        .contains(&Finding::new("EMAIL_ADDRESS", "jane.doe@example.com")));
    assert!(analyzer
        .findings
        .contains(&Finding::new("CREDIT_CARD", "4111 1111 1111 1111")));
}

#[test]
fn test_selected_strategies_run_independently() {
    let registry = registry();

    // The broken strategy fails every run; the others are unaffected.
    let outcomes = registry.run(CORPUS, &[DetectorKind::Ner, DetectorKind::Regex]);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].error.is_some());
    assert!(outcomes[1].error.is_none());
    assert!(outcomes[1].found_any());
}

#[test]
fn test_duplicate_selection_runs_once() {
    let registry = registry();

    let selection = parse_selection("1 1", &registry.available()).unwrap();
    assert_eq!(selection, vec![DetectorKind::Regex]);

    let outcomes = registry.run(CORPUS, &selection);
    assert_eq!(outcomes.len(), 1);
}

#[test]
fn test_report_renders_every_outcome() {
    let registry = registry();
    let outcomes = registry.run(
        CORPUS,
        &[DetectorKind::Regex, DetectorKind::Ner, DetectorKind::Analyzer],
    );
    let report = ScanReport::new("corpus.txt", outcomes);

    let rendered = format_report(&report, false);
    assert!(rendered.contains("Regex detector:"));
    assert!(rendered.contains("Ner detector:"));
    assert!(rendered.contains("Analyzer detector:"));
    assert!(rendered.contains("detection failed: inference failed: model unavailable"));
    assert!(rendered.contains("Email: jane.doe@example.com"));
}

#[test]
fn test_clean_corpus_reports_no_pii() {
    let registry = DetectorRegistry::from_detectors(vec![Box::new(RegexDetector::new().unwrap())]);
    let outcomes = registry.run(
        "the quick brown fox jumps over the lazy dog",
        &[DetectorKind::Regex],
    );
    let report = ScanReport::new("clean.txt", outcomes);

    assert_eq!(report.total_findings(), 0);
    assert!(format_report(&report, false).contains("No PII detected."));
}

#[test]
fn test_json_report_is_machine_readable() {
    let mut findings = BTreeSet::new();
    findings.insert(Finding::new("Email", "jane@example.com"));
    let report = ScanReport::new(
        "corpus.txt",
        vec![StrategyOutcome::success(DetectorKind::Regex, findings)],
    );

    let json = serde_json::to_string_pretty(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["corpus_path"], "corpus.txt");
    assert_eq!(value["outcomes"][0]["detector"], "regex");
    assert_eq!(value["outcomes"][0]["findings"][0]["label"], "Email");
    assert!(value["scan_id"].is_string());
}
