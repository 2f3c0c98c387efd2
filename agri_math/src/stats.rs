//! Descriptive statistics for demand series

use crate::{MathError, Result};

/// Arithmetic mean of a slice of values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute mean of an empty slice".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (Bessel-corrected, divisor n-1)
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(
            "Sample standard deviation needs at least 2 values".to_string(),
        ));
    }

    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();

    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Population standard deviation (divisor n)
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Population standard deviation needs at least 1 value".to_string(),
        ));
    }

    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();

    Ok((sum_sq / values.len() as f64).sqrt())
}

/// Autocovariances of a series up to `max_lag` (inclusive), divisor n
pub fn autocovariances(values: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    if values.len() <= max_lag {
        return Err(MathError::InsufficientData(format!(
            "Autocovariance up to lag {} needs more than {} values",
            max_lag, max_lag
        )));
    }

    let n = values.len();
    let m = mean(values)?;

    let mut covariances = Vec::with_capacity(max_lag + 1);
    for lag in 0..=max_lag {
        let mut sum = 0.0;
        for t in 0..n - lag {
            sum += (values[t] - m) * (values[t + lag] - m);
        }
        covariances.push(sum / n as f64);
    }

    Ok(covariances)
}
