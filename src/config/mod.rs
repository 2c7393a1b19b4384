//! Configuration module for PiiCheckr

mod settings;

pub use settings::{DetectorKind, EntityKind, ScanConfig};
