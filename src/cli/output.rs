//! Report formatting for CLI output.

use crate::detection::{ScanReport, StrategyOutcome};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Format the full report for the terminal.
pub fn format_report(report: &ScanReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{BOLD}=== PII Detection Results ==={RESET}\n"));
    if verbose {
        output.push_str(&format!(
            "{DIM}scan {} of '{}' started {}{RESET}\n",
            report.scan_id,
            report.corpus_path,
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ));
    }

    for outcome in &report.outcomes {
        output.push_str(&format_outcome(outcome));
    }

    output.push_str(&format_summary(report));
    output
}

fn format_outcome(outcome: &StrategyOutcome) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{BOLD}{} detector:{RESET}\n",
        outcome.detector.display_name()
    ));

    if let Some(message) = &outcome.error {
        output.push_str(&format!("  {RED}! detection failed: {message}{RESET}\n"));
        return output;
    }

    if outcome.findings.is_empty() {
        output.push_str(&format!("  {GREEN}No PII detected.{RESET}\n"));
    } else {
        // BTreeSet iteration is already (label, value) sorted.
        for finding in &outcome.findings {
            output.push_str(&format!("  {YELLOW}-{RESET} {finding}\n"));
        }
    }

    output
}

/// Closing summary: finding counts per strategy and in total.
pub fn format_summary(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{BOLD}Summary:{RESET}\n"));
    for outcome in &report.outcomes {
        match &outcome.error {
            Some(_) => output.push_str(&format!(
                "  {}: {RED}failed{RESET}\n",
                outcome.detector.name()
            )),
            None => output.push_str(&format!(
                "  {}: {} finding(s)\n",
                outcome.detector.name(),
                outcome.findings.len()
            )),
        }
    }
    output.push_str(&format!(
        "  {} finding(s) across {} strategies\n",
        report.total_findings(),
        report.outcomes.len()
    ));

    output
}
