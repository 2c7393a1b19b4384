// src/main.rs
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colorful::Colorful;

use piicheckr::cli::{self, Args};
use piicheckr::config::ScanConfig;
use piicheckr::core::{read_corpus, DetectorRegistry};
use piicheckr::detection::ScanReport;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_detectors {
        cli::print_detectors();
        return Ok(());
    }

    let config = ScanConfig {
        corpus_path: args.input.clone(),
        model_dir: args
            .model_dir
            .clone()
            .unwrap_or_else(ScanConfig::default_model_dir),
        min_score: args.min_score,
        ..ScanConfig::default()
    };

    // All engines are constructed up front; a detector that cannot be
    // built aborts the run before anything is scanned.
    let registry = DetectorRegistry::load(&config).context("failed to initialize detectors")?;

    let corpus = read_corpus(&config.corpus_path)?;
    println!(
        "Loaded {} ({} bytes)",
        config.corpus_path.display().to_string().cyan(),
        corpus.len()
    );

    let selection = match &args.detectors {
        Some(spec) => cli::parse_detector_list(spec, &registry.available())
            .map_err(|e| anyhow!("invalid --detectors value: {e}"))?,
        None => cli::prompt_selection(&registry.available())?,
    };

    if selection.is_empty() {
        println!("{}", "No detectors selected.".yellow());
        return Ok(());
    }

    let outcomes = registry.run(&corpus, &selection);
    let report = ScanReport::new(config.corpus_path.display().to_string(), outcomes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", cli::format_report(&report, args.verbose));
    }

    Ok(())
}
