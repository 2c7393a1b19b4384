//! Error taxonomy for detection.
//!
//! Engine construction errors are fatal at startup and bubble through
//! `anyhow` in the binary. `DetectError` values returned from a single
//! `detect` call are caught by the orchestrator and degrade that strategy
//! to an empty, error-annotated result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to load model from '{path}': {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("inference failed: {reason}")]
    Inference { reason: String },

    #[error("invalid pattern '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported language '{0}' (only \"en\" recognizers are configured)")]
    UnsupportedLanguage(String),
}
