//! # Price Trends
//!
//! Ingestion, aggregation and linear trend forecasting for condo
//! transaction prices by administrative area.
//!
//! ## Pipeline
//!
//! - **Ingestion** (once): raw German-headed CSV is normalized to canonical
//!   field names, numeric fields are parsed, and records with non-positive
//!   prices or fewer than three units are dropped. The result is an
//!   immutable [`CleanDataset`].
//! - **Query** (per area): records are scoped to an area (the citywide label
//!   selects everything), averaged per year, fitted with a least-squares
//!   line and extended with forecast years.
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_trends::{CleanDataset, ForecastHorizon, PipelineConfig, TrendOutcome, TrendService};
//!
//! let config = PipelineConfig::builtin()?;
//! let (dataset, summary) = CleanDataset::ingest_csv("zurich-condos.csv", &config.schema)?;
//! println!("{}", summary);
//!
//! let service = TrendService::new(&dataset, &config.areas);
//! for area in service.list_selectable_areas() {
//!     match service.compute_trend_series(&area.label, &ForecastHorizon::default())? {
//!         TrendOutcome::Forecasted(series) => println!("{}", series.to_json()?),
//!         TrendOutcome::InsufficientData { area, .. } => println!("{}: not enough data", area),
//!     }
//! }
//! # Ok::<(), price_trends::ForecastError>(())
//! ```

pub mod aggregate;
pub mod areas;
pub mod coercion;
pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod models;
pub mod query;
pub mod schema;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::aggregate::TrendPoint;
pub use crate::areas::{AreaHierarchy, SelectableArea};
pub use crate::config::PipelineConfig;
pub use crate::dataset::{CleanDataset, IngestionSummary};
pub use crate::error::ForecastError;
pub use crate::forecast::{ForecastHorizon, ForecastPoint, TrendSeries};
pub use crate::models::linear_trend::{LinearTrend, TrendModel};
pub use crate::models::{ForecastModel, TrainedForecastModel};
pub use crate::query::{TrendOutcome, TrendService};
pub use crate::validation::CleanRecord;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
