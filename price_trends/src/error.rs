//! Error types for the price_trends crate

use thiserror::Error;

/// Custom error types for the price_trends crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed tabular input or output
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Invalid or incomplete pipeline configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Input columns do not match the expected schema
    #[error("Schema mismatch: missing columns {}", .missing.join(", "))]
    SchemaMismatch {
        /// Expected column names that were not found
        missing: Vec<String>,
    },

    /// Area label that is not selectable for the loaded dataset
    #[error("Unknown area: {0}")]
    UnknownArea(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from the trend math crate
    #[error("Math error: {0}")]
    MathError(#[from] trend_math::MathError),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
