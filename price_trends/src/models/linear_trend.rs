//! Ordinary least-squares trend line over calendar years

use crate::aggregate::TrendPoint;
use crate::error::Result;
use crate::models::{Estimate, ForecastModel, TrainedForecastModel};
use serde::Serialize;
use trend_math::regression::{distinct_count, MIN_DISTINCT_POINTS};
use trend_math::LinearFit;

/// Degree-1 least-squares trend estimator
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
}

/// Fitted trend line `price = slope * year + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendModel {
    slope: f64,
    intercept: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    r_squared: Option<f64>,
    last_observed_year: i32,
}

impl LinearTrend {
    /// Create a new least-squares trend estimator
    pub fn new() -> Self {
        Self {
            name: "Linear Trend (OLS)".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrendModel;

    fn train(&self, points: &[TrendPoint]) -> Result<Estimate<Self::Trained>> {
        let years: Vec<f64> = points.iter().map(|p| f64::from(p.year)).collect();
        let prices: Vec<f64> = points.iter().map(|p| p.mean_price_per_m2).collect();

        let distinct_years = distinct_count(&years);
        if distinct_years < MIN_DISTINCT_POINTS {
            return Ok(Estimate::InsufficientData { distinct_years });
        }

        let fit = LinearFit::fit(&years, &prices)?;
        let last_observed_year = points.iter().map(|p| p.year).max().unwrap_or_default();

        Ok(Estimate::Fitted(TrendModel {
            slope: fit.slope(),
            intercept: fit.intercept(),
            r_squared: fit.r_squared(),
            last_observed_year,
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrendModel {
    /// Price change per year
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value of the line at year 0
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination over the training series
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }
}

impl TrainedForecastModel for TrendModel {
    fn predict(&self, year: i32) -> f64 {
        LinearFit::from_coefficients(self.slope, self.intercept).predict(f64::from(year))
    }

    fn last_observed_year(&self) -> i32 {
        self.last_observed_year
    }

    fn name(&self) -> &str {
        "Linear Trend (OLS)"
    }
}
