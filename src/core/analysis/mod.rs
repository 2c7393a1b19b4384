//! The three detection strategies.

mod analyzer;
mod ner;
mod patterns;
mod recognizers;

pub use analyzer::{AnalyzerDetector, AnalyzerEngine};
pub use ner::NerDetector;
pub use patterns::RegexDetector;
pub use recognizers::{luhn_valid, RecognizedSpan, Recognizer};
