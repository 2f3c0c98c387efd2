//! Exponential smoothing with optional additive seasonality

use crate::{MathError, Result};

/// Smooth a series down to its final level.
///
/// Classic simple exponential smoothing: the level is initialized with the
/// first observation and updated as `alpha * value + (1 - alpha) * level`.
pub fn smooth_level(values: &[f64], alpha: f64) -> Result<f64> {
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(MathError::InvalidInput(
            "Alpha must be between 0 and 1".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot smooth an empty series".to_string(),
        ));
    }

    let mut level = values[0];
    for &value in &values[1..] {
        level = alpha * value + (1.0 - alpha) * level;
    }

    Ok(level)
}

/// Additive seasonal indices for a fixed period.
///
/// Index `p` is the mean deviation from the overall series mean across all
/// observations at phase `p`. Indices are re-centered so they sum to zero.
/// Requires at least two full periods of data.
pub fn seasonal_indices(values: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(MathError::InvalidInput(
            "Seasonal period must be positive".to_string(),
        ));
    }
    if values.len() < 2 * period {
        return Err(MathError::InsufficientData(format!(
            "Seasonal indices for period {} need at least {} values, got {}",
            period,
            2 * period,
            values.len()
        )));
    }

    let overall = crate::stats::mean(values)?;

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, &value) in values.iter().enumerate() {
        sums[i % period] += value - overall;
        counts[i % period] += 1;
    }

    let mut indices: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(s, &c)| s / c as f64)
        .collect();

    // Re-center so the indices carry no net offset
    let offset = indices.iter().sum::<f64>() / period as f64;
    for index in &mut indices {
        *index -= offset;
    }

    Ok(indices)
}
