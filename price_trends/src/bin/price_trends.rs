//! Query a clean dataset for per-area price trends and forecasts.

use anyhow::{Context, Result};
use clap::Parser;
use price_trends::utils::format_chf;
use price_trends::{CleanDataset, ForecastHorizon, PipelineConfig, TrendOutcome, TrendService};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "price_trends", about = "Price per m² trends and forecasts by area")]
struct Cli {
    /// Clean CSV written by `clean_data`
    data: PathBuf,
    /// Area to query (defaults to the citywide total)
    #[arg(long)]
    area: Option<String>,
    /// Forecast this many years past the last observed year
    #[arg(long, conflicts_with = "target_year")]
    years: Option<u32>,
    /// Forecast these calendar years instead
    #[arg(long = "target-year")]
    target_year: Vec<i32>,
    /// List the selectable areas and exit
    #[arg(long)]
    list_areas: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Pipeline configuration file (defaults to the built-in Zurich config)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = PipelineConfig::load_or_builtin(cli.config.as_ref())
        .context("Failed to load pipeline configuration")?;
    let dataset = CleanDataset::from_clean_csv(&cli.data)
        .with_context(|| format!("Failed to load {}", cli.data.display()))?;
    let service = TrendService::new(&dataset, &config.areas);

    if cli.list_areas {
        for area in service.list_selectable_areas() {
            println!("{}", area.display());
        }
        return Ok(());
    }

    let horizon = if !cli.target_year.is_empty() {
        ForecastHorizon::Years(cli.target_year.clone())
    } else if let Some(years) = cli.years {
        ForecastHorizon::YearsAfterLast(years)
    } else {
        config.forecast.horizon()
    };

    let area = cli.area.unwrap_or_else(|| config.areas.citywide.clone());
    let outcome = service.compute_trend_series(&area, &horizon)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        TrendOutcome::Forecasted(series) => {
            println!("{}", series.area());
            println!("{:<6} {:>14}", "Year", "Avg CHF/m²");
            for point in series.historical() {
                println!("{:<6} {:>14}", point.year, format_chf(point.mean_price_per_m2));
            }
            for point in series.forecast() {
                println!(
                    "Predicted price per m² for {}: {}",
                    point.year,
                    format_chf(point.predicted_price_per_m2)
                );
            }
        }
        TrendOutcome::InsufficientData { area, .. } => {
            eprintln!("Warning: not enough data to predict trends for {}.", area);
        }
    }

    Ok(())
}
