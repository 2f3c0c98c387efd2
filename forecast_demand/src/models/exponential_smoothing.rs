//! Exponential smoothing producer with weekly seasonality

use crate::error::{ForecastError, Result};
use crate::models::{symmetric_bounds, DemandModel, ForecastResult, ModelId};
use agri_math::{smoothing, stats};
use demand_core::DemandSeries;

/// Weekly seasonal cycle, in days
const SEASONAL_PERIOD: usize = 7;

/// Minimum history for plain level smoothing
const MIN_HISTORY: usize = 7;

/// Minimum history for seasonal fitting: two full weekly cycles
const MIN_SEASONAL_HISTORY: usize = 14;

/// Exponential smoothing producer.
///
/// Smooths the price level and, when at least two full weeks of history are
/// available, adds additive weekly seasonal indices to each forecasted day.
/// Shorter histories degrade to a flat forecast at the smoothed level.
#[derive(Debug, Clone, Copy)]
pub struct EsModel {
    alpha: f64,
}

impl EsModel {
    /// Create a producer with a custom smoothing factor
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::ValidationError(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        Ok(Self { alpha })
    }
}

impl Default for EsModel {
    fn default() -> Self {
        Self { alpha: 0.3 }
    }
}

impl DemandModel for EsModel {
    fn id(&self) -> ModelId {
        ModelId::Es
    }

    fn min_observations(&self) -> usize {
        MIN_HISTORY
    }

    fn produce(
        &self,
        series: &DemandSeries,
        horizon: usize,
        want_confidence: bool,
    ) -> Result<ForecastResult> {
        self.check_history(series)?;

        let prices = series.prices();
        let n = prices.len();

        let values = if n >= MIN_SEASONAL_HISTORY {
            let seasonal = smoothing::seasonal_indices(&prices, SEASONAL_PERIOD)?;
            let deseasonalized: Vec<f64> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| p - seasonal[i % SEASONAL_PERIOD])
                .collect();
            let level = smoothing::smooth_level(&deseasonalized, self.alpha)?;

            (0..horizon)
                .map(|step| level + seasonal[(n + step) % SEASONAL_PERIOD])
                .collect()
        } else {
            let level = smoothing::smooth_level(&prices, self.alpha)?;
            vec![level; horizon]
        };

        if !want_confidence {
            return Ok(ForecastResult::new(values, self.id().name()));
        }

        let half_width = stats::sample_std_dev(&prices)?;
        let (lower, upper) = symmetric_bounds(&values, half_width);
        Ok(ForecastResult::with_bounds(
            values,
            lower,
            upper,
            self.id().name(),
        ))
    }
}
