//! Autoregressive producer on differenced prices

use crate::error::Result;
use crate::models::{symmetric_bounds, DemandModel, ForecastResult, ModelId};
use agri_math::{autoregressive, stats};
use demand_core::DemandSeries;

/// Autoregressive order applied to the differenced series
const AR_ORDER: usize = 5;

/// Minimum history for a stable AR fit
const MIN_HISTORY: usize = 10;

/// Autoregressive producer.
///
/// Differences the price series once, fits AR coefficients with the
/// Yule-Walker equations, iterates the difference forecast forward and
/// integrates back from the last observed price.
#[derive(Debug, Clone, Copy)]
pub struct ArimaModel {
    order: usize,
}

impl ArimaModel {
    /// Create a producer with a custom autoregressive order
    pub fn new(order: usize) -> Self {
        Self { order: order.max(1) }
    }
}

impl Default for ArimaModel {
    fn default() -> Self {
        Self { order: AR_ORDER }
    }
}

impl DemandModel for ArimaModel {
    fn id(&self) -> ModelId {
        ModelId::Arima
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
        let differences = autoregressive::difference(&prices);

        // The order cannot exceed what the differenced series supports
        let order = self.order.min(differences.len().saturating_sub(1)).max(1);
        let coefficients = autoregressive::yule_walker(&differences, order)?;

        let forecast_differences =
            autoregressive::forecast_ar(&differences, &coefficients, horizon);
        let last_price = prices[prices.len() - 1];
        let values = autoregressive::integrate(last_price, &forecast_differences);

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
