//! Trend models fitted to yearly price series

use crate::aggregate::TrendPoint;
use crate::error::Result;
use std::fmt::Debug;

/// Outcome of training a model on a series
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate<T> {
    /// The series determined the model
    Fitted(T),
    /// Too few distinct years to fit; no model was built
    InsufficientData {
        /// Distinct years available in the series
        distinct_years: usize,
    },
}

impl<T> Estimate<T> {
    /// The fitted model, if any
    pub fn fitted(self) -> Option<T> {
        match self {
            Estimate::Fitted(model) => Some(model),
            Estimate::InsufficientData { .. } => None,
        }
    }
}

/// Trained trend model
pub trait TrainedForecastModel: Debug {
    /// Value of the trend in `year`
    fn predict(&self, year: i32) -> f64;

    /// Last year of the series the model was trained on
    fn last_observed_year(&self) -> i32;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Trend model that can be trained on a yearly series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a series sorted by year
    fn train(&self, points: &[TrendPoint]) -> Result<Estimate<Self::Trained>>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear_trend;
