//! # Agri Math
//!
//! Mathematical kernels for demand forecasting models.
//! This crate provides the numeric building blocks used by the
//! forecasting producers: descriptive statistics, moving averages,
//! exponential smoothing, autoregression and least-squares regression.

use thiserror::Error;

// Kernel modules
pub mod autoregressive;
pub mod moving_averages;
pub mod regression;
pub mod smoothing;
pub mod stats;

/// Errors that can occur in forecasting-related calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
