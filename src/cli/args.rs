//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DetectorKind;

#[derive(Parser, Debug)]
#[command(name = "piicheckr")]
#[command(about = "Scan text for PII using regex, NER-model, and analyzer strategies")]
#[command(version)]
pub struct Args {
    /// Input corpus file (plain UTF-8 text)
    #[arg(short, long, default_value = "input_corpus.txt")]
    pub input: PathBuf,

    /// Detectors to run (comma/space-separated names, or 'all'); skips the
    /// interactive menu
    #[arg(short, long)]
    pub detectors: Option<String>,

    /// Directory containing the NER model files (model.onnx + labels.json)
    #[arg(long, env = "PIICHECKR_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Minimum analyzer score for a finding to be reported
    #[arg(long, default_value_t = 0.35)]
    pub min_score: f32,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// List available detectors and exit
    #[arg(long)]
    pub list_detectors: bool,
}

/// Print the available detectors.
pub fn print_detectors() {
    println!("Available detectors:\n");
    for kind in DetectorKind::all() {
        println!("  {:<10} {}", kind.name(), kind.description());
    }
}
