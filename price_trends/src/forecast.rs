//! Forecast points and the combined trend series

use crate::aggregate::TrendPoint;
use crate::error::{ForecastError, Result};
use crate::models::TrainedForecastModel;
use serde::{Deserialize, Serialize};

/// Number of years forecast past the last observation by default
pub const DEFAULT_YEARS_AHEAD: u32 = 2;

/// Largest horizon accepted by [`ForecastHorizon::YearsAfterLast`]
pub const MAX_YEARS_AHEAD: u32 = 100;

/// Which future years to evaluate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastHorizon {
    /// The `n` years following the last observed year of the series
    YearsAfterLast(u32),
    /// Explicit calendar years
    Years(Vec<i32>),
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        ForecastHorizon::YearsAfterLast(DEFAULT_YEARS_AHEAD)
    }
}

impl ForecastHorizon {
    /// Target years for a series ending in `last_year`, ascending and
    /// strictly after it
    pub fn target_years(&self, last_year: i32) -> Result<Vec<i32>> {
        match self {
            ForecastHorizon::YearsAfterLast(n) => {
                if *n > MAX_YEARS_AHEAD {
                    return Err(ForecastError::ValidationError(format!(
                        "Forecast horizon {} exceeds {} years",
                        n, MAX_YEARS_AHEAD
                    )));
                }
                (1..=*n as i32)
                    .map(|offset| {
                        last_year.checked_add(offset).ok_or_else(|| {
                            ForecastError::ValidationError(format!(
                                "Forecast year {} + {} is out of range",
                                last_year, offset
                            ))
                        })
                    })
                    .collect()
            }
            ForecastHorizon::Years(years) => {
                let mut years = years.clone();
                years.sort_unstable();
                years.dedup();
                if let Some(&first) = years.first() {
                    if first <= last_year {
                        return Err(ForecastError::ValidationError(format!(
                            "Forecast year {} is not after the last observed year {}",
                            first, last_year
                        )));
                    }
                }
                Ok(years)
            }
        }
    }
}

/// Price predicted by the trend line for a future year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar year
    pub year: i32,
    /// Trend line value in that year
    pub predicted_price_per_m2: f64,
}

/// Whether a series point was observed or predicted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Historical,
    Forecast,
}

/// One point of a [`TrendSeries`] in chart order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub price_per_m2: f64,
    pub kind: PointKind,
}

/// Historical yearly means followed by forecast values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    area: String,
    historical: Vec<TrendPoint>,
    forecast: Vec<ForecastPoint>,
}

impl TrendSeries {
    /// Combine the two halves, checking year order and that they do not overlap
    pub fn new(
        area: impl Into<String>,
        historical: Vec<TrendPoint>,
        forecast: Vec<ForecastPoint>,
    ) -> Result<Self> {
        let years: Vec<i32> = historical
            .iter()
            .map(|p| p.year)
            .chain(forecast.iter().map(|p| p.year))
            .collect();
        if years.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ForecastError::ValidationError(
                "Series years must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            area: area.into(),
            historical,
            forecast,
        })
    }

    /// Area the series was computed for
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Observed yearly means
    pub fn historical(&self) -> &[TrendPoint] {
        &self.historical
    }

    /// Predicted values
    pub fn forecast(&self) -> &[ForecastPoint] {
        &self.forecast
    }

    /// All points, historical first
    pub fn points(&self) -> Vec<SeriesPoint> {
        self.historical
            .iter()
            .map(|p| SeriesPoint {
                year: p.year,
                price_per_m2: p.mean_price_per_m2,
                kind: PointKind::Historical,
            })
            .chain(self.forecast.iter().map(|p| SeriesPoint {
                year: p.year,
                price_per_m2: p.predicted_price_per_m2,
                kind: PointKind::Forecast,
            }))
            .collect()
    }

    /// Total number of points
    pub fn len(&self) -> usize {
        self.historical.len() + self.forecast.len()
    }

    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the series to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Evaluate `model` over `horizon` and append the values to `historical`
pub fn forecast_series<M: TrainedForecastModel>(
    area: &str,
    historical: Vec<TrendPoint>,
    model: &M,
    horizon: &ForecastHorizon,
) -> Result<TrendSeries> {
    let last_year = historical
        .last()
        .map(|p| p.year)
        .unwrap_or_else(|| model.last_observed_year());

    let forecast = horizon
        .target_years(last_year)?
        .into_iter()
        .map(|year| ForecastPoint {
            year,
            predicted_price_per_m2: model.predict(year),
        })
        .collect();

    TrendSeries::new(area, historical, forecast)
}
