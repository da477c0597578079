//! Per-area trend queries
//!
//! A query moves through scoping, aggregation and fitting and ends either
//! with a forecast series or with an insufficient-data signal. Every stage
//! only reads the shared dataset, so queries for different areas can run
//! in parallel.

use crate::aggregate::aggregate_by_year;
use crate::areas::{resolve, selectable_areas, AreaHierarchy, SelectableArea};
use crate::dataset::CleanDataset;
use crate::error::Result;
use crate::forecast::{forecast_series, ForecastHorizon, TrendSeries};
use crate::models::linear_trend::LinearTrend;
use crate::models::{Estimate, ForecastModel};
use rayon::prelude::*;
use serde::Serialize;

/// Terminal state of a trend query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendOutcome {
    /// A line was fitted and evaluated
    Forecasted(TrendSeries),
    /// Fewer than two distinct years; nothing was fitted
    InsufficientData {
        /// Area the query was made for
        area: String,
        /// Distinct years found for the area
        distinct_years: usize,
    },
}

impl TrendOutcome {
    /// The series, if a forecast was produced
    pub fn series(&self) -> Option<&TrendSeries> {
        match self {
            TrendOutcome::Forecasted(series) => Some(series),
            TrendOutcome::InsufficientData { .. } => None,
        }
    }
}

/// Query interface over a clean dataset
#[derive(Debug, Clone)]
pub struct TrendService<'a> {
    dataset: &'a CleanDataset,
    hierarchy: &'a AreaHierarchy,
    model: LinearTrend,
}

impl<'a> TrendService<'a> {
    /// Create a service reading from `dataset`
    pub fn new(dataset: &'a CleanDataset, hierarchy: &'a AreaHierarchy) -> Self {
        Self {
            dataset,
            hierarchy,
            model: LinearTrend::new(),
        }
    }

    /// Areas that have records, citywide first, then hierarchy order
    pub fn list_selectable_areas(&self) -> Vec<SelectableArea> {
        selectable_areas(self.hierarchy, self.dataset)
    }

    /// Compute the trend series for one area
    pub fn compute_trend_series(
        &self,
        area: &str,
        horizon: &ForecastHorizon,
    ) -> Result<TrendOutcome> {
        let records = resolve(area, self.hierarchy, self.dataset)?;
        log::debug!("{}: scoped {} records", area, records.len());

        let points = aggregate_by_year(records);
        log::debug!("{}: aggregated {} yearly points", area, points.len());

        match self.model.train(&points)? {
            Estimate::Fitted(model) => {
                log::debug!(
                    "{}: fitted slope {:.2}, intercept {:.2}",
                    area,
                    model.slope(),
                    model.intercept()
                );
                let series = forecast_series(area, points, &model, horizon)?;
                Ok(TrendOutcome::Forecasted(series))
            }
            Estimate::InsufficientData { distinct_years } => {
                log::warn!(
                    "{}: not enough data to fit a trend ({} distinct years)",
                    area,
                    distinct_years
                );
                Ok(TrendOutcome::InsufficientData {
                    area: area.to_string(),
                    distinct_years,
                })
            }
        }
    }

    /// Compute every selectable area in parallel, in selection order
    pub fn precompute_all(&self, horizon: &ForecastHorizon) -> Result<Vec<(String, TrendOutcome)>> {
        self.list_selectable_areas()
            .into_par_iter()
            .map(|area| {
                let outcome = self.compute_trend_series(&area.label, horizon)?;
                Ok((area.label, outcome))
            })
            .collect()
    }
}
