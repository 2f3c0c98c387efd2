//! Error types for the forecast_demand crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the forecast_demand crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Requested ensemble could not be combined from the surviving results
    #[error("Ensemble unavailable: {0}")]
    EnsembleUnavailable(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] agri_math::MathError),

    /// Error from series construction
    #[error("Series error: {0}")]
    SeriesError(#[from] demand_core::SeriesError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from serializing results
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
