//! Interactive detector selection.
//!
//! Presents a numbered menu and keeps re-prompting until the line parses:
//! either 'all' or space-separated 1-based indices. Duplicate indices
//! deduplicate, preserving first-occurrence order, so each strategy runs at
//! most once.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use thiserror::Error;

use crate::config::DetectorKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("nothing was entered")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} is out of range (valid: 1-{1})")]
    OutOfRange(usize, usize),

    #[error("unknown detector '{0}'")]
    UnknownName(String),
}

/// Prompt on stdin until a valid selection is entered. A closed stdin
/// aborts the run.
pub fn prompt_selection(available: &[DetectorKind]) -> Result<Vec<DetectorKind>> {
    println!("\nSelect PII detection strategies:");
    for (i, kind) in available.iter().enumerate() {
        println!("  {}. {}", i + 1, kind.display_name());
    }
    println!("Enter the numbers to run (e.g. '1 3'), or 'all':");

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        let bytes = stdin.lock().read_line(&mut line)?;
        if bytes == 0 {
            bail!("selection aborted: stdin closed");
        }

        match parse_selection(&line, available) {
            Ok(selection) => return Ok(selection),
            Err(e) => {
                println!("Invalid selection: {e}. Enter numbers separated by spaces, or 'all'.")
            }
        }
    }
}

/// Parse one selection line against the available detectors.
pub fn parse_selection(
    input: &str,
    available: &[DetectorKind],
) -> Result<Vec<DetectorKind>, SelectionError> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(SelectionError::Empty);
    }
    if input == "all" {
        return Ok(available.to_vec());
    }

    let mut selected = Vec::new();
    for token in input.split_whitespace() {
        let index: usize = token
            .parse()
            .map_err(|_| SelectionError::NotANumber(token.to_string()))?;
        if index == 0 || index > available.len() {
            return Err(SelectionError::OutOfRange(index, available.len()));
        }
        let kind = available[index - 1];
        if !selected.contains(&kind) {
            selected.push(kind);
        }
    }
    Ok(selected)
}

/// Parse a `--detectors` flag value: comma/space-separated names, or 'all'.
/// Same dedup policy as the interactive path.
pub fn parse_detector_list(
    spec: &str,
    available: &[DetectorKind],
) -> Result<Vec<DetectorKind>, SelectionError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(SelectionError::Empty);
    }
    if spec.eq_ignore_ascii_case("all") {
        return Ok(available.to_vec());
    }

    let mut selected = Vec::new();
    for token in spec.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let kind = DetectorKind::from_name(token)
            .filter(|k| available.contains(k))
            .ok_or_else(|| SelectionError::UnknownName(token.to_string()))?;
        if !selected.contains(&kind) {
            selected.push(kind);
        }
    }
    if selected.is_empty() {
        return Err(SelectionError::Empty);
    }
    Ok(selected)
}
