//! Autoregressive fitting and forecasting on differenced series

use crate::{MathError, Result};

/// First differences of a series
pub fn difference(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }

    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Fit AR(`order`) coefficients with the Yule-Walker equations,
/// solved by Levinson-Durbin recursion.
///
/// A series with (near-)zero variance yields all-zero coefficients, so a
/// constant input forecasts a flat continuation instead of failing.
pub fn yule_walker(values: &[f64], order: usize) -> Result<Vec<f64>> {
    if order == 0 {
        return Err(MathError::InvalidInput(
            "AR order must be positive".to_string(),
        ));
    }
    if values.len() <= order {
        return Err(MathError::InsufficientData(format!(
            "AR({}) fit needs more than {} values, got {}",
            order,
            order,
            values.len()
        )));
    }

    let covariances = crate::stats::autocovariances(values, order)?;
    if covariances[0].abs() < 1e-12 {
        return Ok(vec![0.0; order]);
    }

    // Levinson-Durbin recursion
    let mut coefficients = vec![0.0; order];
    let mut previous = vec![0.0; order];
    let mut error = covariances[0];

    for k in 1..=order {
        let mut acc = covariances[k];
        for j in 1..k {
            acc -= previous[j - 1] * covariances[k - j];
        }

        if error.abs() < 1e-12 {
            return Err(MathError::CalculationError(
                "Levinson-Durbin recursion became degenerate".to_string(),
            ));
        }
        let reflection = acc / error;

        coefficients[k - 1] = reflection;
        for j in 1..k {
            coefficients[j - 1] = previous[j - 1] - reflection * previous[k - 1 - j];
        }

        error *= 1.0 - reflection * reflection;
        previous[..k].copy_from_slice(&coefficients[..k]);
    }

    Ok(coefficients)
}

/// Iterated AR forecast: each step feeds the previous forecast back in.
///
/// `coefficients[i]` multiplies the value `i + 1` steps back.
pub fn forecast_ar(history: &[f64], coefficients: &[f64], horizon: usize) -> Vec<f64> {
    if history.is_empty() || coefficients.is_empty() {
        return vec![0.0; horizon];
    }

    let p = coefficients.len();
    let mut window = history[history.len().saturating_sub(p)..].to_vec();
    let mut forecasts = Vec::with_capacity(horizon);

    for _ in 0..horizon {
        let mut next = 0.0;
        for (i, &coefficient) in coefficients.iter().enumerate() {
            if i < window.len() {
                next += coefficient * window[window.len() - 1 - i];
            }
        }

        window.push(next);
        forecasts.push(next);
    }

    forecasts
}

/// Undo one order of differencing: cumulative sums starting at `last_value`
pub fn integrate(last_value: f64, differences: &[f64]) -> Vec<f64> {
    let mut level = last_value;
    differences
        .iter()
        .map(|d| {
            level += d;
            level
        })
        .collect()
}
