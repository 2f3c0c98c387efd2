//! Moving average producers

use crate::error::Result;
use crate::models::{symmetric_bounds, DemandModel, ForecastResult, ModelId};
use agri_math::{moving_averages, stats};
use demand_core::DemandSeries;

/// Averaging window, in days
const MA_WINDOW: usize = 7;

/// Fraction of the price standard deviation used as the SMA band half-width
const SMA_BAND: f64 = 0.5;

/// Fraction of the price standard deviation used as the WMA band half-width
const WMA_BAND: f64 = 0.3;

/// Simple moving average producer: a flat forecast at the mean of the most
/// recent window of prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmaModel;

impl DemandModel for SmaModel {
    fn id(&self) -> ModelId {
        ModelId::Sma
    }

    fn min_observations(&self) -> usize {
        MA_WINDOW
    }

    fn produce(
        &self,
        series: &DemandSeries,
        horizon: usize,
        want_confidence: bool,
    ) -> Result<ForecastResult> {
        self.check_history(series)?;

        let prices = series.prices();
        let window = MA_WINDOW.min(prices.len());
        let value = moving_averages::simple_moving_average(&prices, window)?;
        let values = vec![value; horizon];

        if !want_confidence {
            return Ok(ForecastResult::new(values, self.id().name()));
        }

        let half_width = SMA_BAND * stats::sample_std_dev(&prices)?;
        let (lower, upper) = symmetric_bounds(&values, half_width);
        Ok(ForecastResult::with_bounds(
            values,
            lower,
            upper,
            self.id().name(),
        ))
    }
}

/// Weighted moving average producer: like SMA, but the most recent prices
/// carry linearly increasing weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct WmaModel;

impl DemandModel for WmaModel {
    fn id(&self) -> ModelId {
        ModelId::Wma
    }

    fn min_observations(&self) -> usize {
        MA_WINDOW
    }

    fn produce(
        &self,
        series: &DemandSeries,
        horizon: usize,
        want_confidence: bool,
    ) -> Result<ForecastResult> {
        self.check_history(series)?;

        let prices = series.prices();
        let window = MA_WINDOW.min(prices.len());
        let value = moving_averages::weighted_moving_average(&prices, window)?;
        let values = vec![value; horizon];

        if !want_confidence {
            return Ok(ForecastResult::new(values, self.id().name()));
        }

        let half_width = WMA_BAND * stats::sample_std_dev(&prices)?;
        let (lower, upper) = symmetric_bounds(&values, half_width);
        Ok(ForecastResult::with_bounds(
            values,
            lower,
            upper,
            self.id().name(),
        ))
    }
}
