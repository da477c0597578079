//! Batch ingestion: raw transaction CSV in, clean canonical CSV out.

use anyhow::{Context, Result};
use clap::Parser;
use price_trends::{CleanDataset, PipelineConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clean_data", about = "Normalize and validate a raw condo price file")]
struct Cli {
    /// Raw CSV with the source (German) column names
    input: PathBuf,
    /// Where to write the clean CSV
    output: PathBuf,
    /// Pipeline configuration file (defaults to the built-in Zurich config)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = PipelineConfig::load_or_builtin(cli.config.as_ref())
        .context("Failed to load pipeline configuration")?;

    let (dataset, summary) = CleanDataset::ingest_csv(&cli.input, &config.schema)
        .with_context(|| format!("Failed to ingest {}", cli.input.display()))?;

    dataset
        .write_csv(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    log::info!(
        "Wrote {} clean rows to {} ({})",
        dataset.len(),
        cli.output.display(),
        summary
    );
    Ok(())
}
