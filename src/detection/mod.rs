//! Detection result and error types.

mod error;
mod result;

pub use error::DetectError;
pub use result::{Finding, ScanReport, StrategyOutcome};
