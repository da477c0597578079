//! # Trend Math
//!
//! Numeric building blocks for price trend estimation.
//! This crate provides the least-squares line fit used to project
//! yearly price series forward.

use thiserror::Error;

pub mod regression;

pub use regression::LinearFit;

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;
