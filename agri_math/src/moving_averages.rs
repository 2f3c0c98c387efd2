//! Moving average calculations over the tail of a series

use crate::{MathError, Result};

/// Simple moving average of the last `window` values
pub fn simple_moving_average(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window size must be positive".to_string(),
        ));
    }
    if values.len() < window {
        return Err(MathError::InsufficientData(format!(
            "Simple moving average needs at least {} values, got {}",
            window,
            values.len()
        )));
    }

    let tail = &values[values.len() - window..];
    Ok(tail.iter().sum::<f64>() / window as f64)
}

/// Weighted moving average of the last `window` values.
///
/// Weights are 1..=window (most recent value weighted highest),
/// normalized to sum to 1.
pub fn weighted_moving_average(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window size must be positive".to_string(),
        ));
    }
    if values.len() < window {
        return Err(MathError::InsufficientData(format!(
            "Weighted moving average needs at least {} values, got {}",
            window,
            values.len()
        )));
    }

    let tail = &values[values.len() - window..];
    let weight_sum: f64 = (1..=window).map(|w| w as f64).sum();

    let weighted: f64 = tail
        .iter()
        .enumerate()
        .map(|(i, v)| v * (i + 1) as f64 / weight_sum)
        .sum();

    Ok(weighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_moving_average() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(simple_moving_average(&values, 3).unwrap(), 4.0);
        assert_eq!(simple_moving_average(&values, 5).unwrap(), 3.0);
    }

    #[test]
    fn test_sma_errors() {
        let values = vec![1.0, 2.0];
        assert!(simple_moving_average(&values, 0).is_err());
        assert!(simple_moving_average(&values, 3).is_err());
    }

    #[test]
    fn test_weighted_moving_average() {
        // Weights 1,2,3 over [1,2,3]: (1*1 + 2*2 + 3*3) / 6 = 14/6
        let values = vec![1.0, 2.0, 3.0];
        let wma = weighted_moving_average(&values, 3).unwrap();
        assert!((wma - 14.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_wma_favors_recent_values() {
        let rising = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = simple_moving_average(&rising, 5).unwrap();
        let wma = weighted_moving_average(&rising, 5).unwrap();
        assert!(wma > sma);
    }

    #[test]
    fn test_constant_series() {
        let values = vec![50.0; 7];
        assert_eq!(simple_moving_average(&values, 7).unwrap(), 50.0);
        assert!((weighted_moving_average(&values, 7).unwrap() - 50.0).abs() < 1e-10);
    }
}
