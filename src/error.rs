//! Error types for the price_forecast crate

use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Too few observations to produce any forecast
    #[error("insufficient data: found {observed} {unit}, need at least {required}")]
    InsufficientData {
        /// Number of observations actually available
        observed: usize,
        /// Minimum recommended for the requested granularity
        required: usize,
        /// Period unit label ("days", "weeks", "months", "periods")
        unit: &'static str,
    },

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// Shorthand for the insufficient-data variant with a generic unit.
    pub(crate) fn too_short(observed: usize, required: usize) -> Self {
        ForecastError::InsufficientData {
            observed,
            required,
            unit: "periods",
        }
    }
}
