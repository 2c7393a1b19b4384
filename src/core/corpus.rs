//! Corpus loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the entire corpus file as UTF-8 text.
///
/// A missing or unreadable file is an error; the run halts before any
/// selection or detection happens.
pub fn read_corpus(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file '{}'", path.display()))?;

    if text.is_empty() {
        log::warn!("corpus file '{}' is empty", path.display());
    }

    Ok(text)
}
