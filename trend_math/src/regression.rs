//! Ordinary least-squares line fitting
//!
//! Fits `y = slope * x + intercept` to paired observations by minimizing
//! the sum of squared vertical residuals. Sums are taken over values
//! centered on their means, which keeps calendar-year inputs (x ≈ 2000)
//! well conditioned.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of distinct x values needed to determine a line
pub const MIN_DISTINCT_POINTS: usize = 2;

/// A fitted degree-1 least-squares line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    r_squared: Option<f64>,
}

impl LinearFit {
    /// Fit a line through the paired `xs`/`ys` observations
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x and y lengths differ ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }

        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Observations must be finite".to_string(),
            ));
        }

        let distinct = distinct_count(xs);
        if distinct < MIN_DISTINCT_POINTS {
            return Err(MathError::InsufficientData(format!(
                "Need at least {} distinct x values, have {}",
                MIN_DISTINCT_POINTS, distinct
            )));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < f64::EPSILON {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - (slope * x + intercept)).powi(2);
        }

        // Undefined when every y is equal
        let r_squared = if ss_total.abs() < f64::EPSILON {
            None
        } else {
            Some(1.0 - ss_residual / ss_total)
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    /// Build a line from known coefficients
    pub fn from_coefficients(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            r_squared: None,
        }
    }

    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Change in y per unit of x
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value of the line at x = 0
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination over the fitted observations
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }
}

/// Number of distinct values in `xs`
pub fn distinct_count(xs: &[f64]) -> usize {
    let mut sorted: Vec<f64> = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
