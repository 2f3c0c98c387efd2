//! Learned regression producer over calendar and NDVI features

use crate::error::Result;
use crate::models::{DemandModel, ForecastResult, ModelId};
use crate::utils::future_dates;
use agri_math::{regression, stats};
use chrono::{Datelike, NaiveDate};
use demand_core::DemandSeries;

/// Minimum history for fitting
const MIN_HISTORY: usize = 10;

/// Minimum rows carrying an NDVI reading before the feature is used
const NDVI_MIN_ROWS: usize = 5;

/// NDVI look-back window for projecting the feature forward, in days
const NDVI_TREND_WINDOW: usize = 7;

/// Learned regression producer.
///
/// Unlike the price-based producers, this model predicts demanded
/// *quantity*: it fits a least-squares regression of quantity on a linear
/// trend, a cyclical day-of-week encoding and, when enough observations
/// carry one, the NDVI vegetation index. Future NDVI is held at the recent
/// window mean. Predictions are clamped to be non-negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionModel;

impl RegressionModel {
    fn feature_row(index: usize, date: NaiveDate, ndvi: Option<f64>) -> Vec<f64> {
        let weekday = date.weekday().num_days_from_monday() as f64;
        let angle = weekday * std::f64::consts::TAU / 7.0;

        let mut row = vec![1.0, index as f64, angle.sin(), angle.cos()];
        if let Some(value) = ndvi {
            row.push(value);
        }
        row
    }
}

impl DemandModel for RegressionModel {
    fn id(&self) -> ModelId {
        ModelId::Regression
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

        let observations = series.observations();
        let ndvi_rows = observations.iter().filter(|o| o.ndvi.is_some()).count();
        let use_ndvi = ndvi_rows >= NDVI_MIN_ROWS;

        // Training rows: observations lacking NDVI are skipped only when
        // the feature is in play
        let mut rows = Vec::with_capacity(observations.len());
        let mut targets = Vec::with_capacity(observations.len());
        for (index, observation) in observations.iter().enumerate() {
            if use_ndvi && observation.ndvi.is_none() {
                continue;
            }
            let ndvi = if use_ndvi { observation.ndvi } else { None };
            rows.push(Self::feature_row(index, observation.date, ndvi));
            targets.push(observation.quantity);
        }

        let coefficients = regression::least_squares(&rows, &targets)?;

        // Project NDVI forward at its recent window mean
        let future_ndvi = if use_ndvi {
            let recent: Vec<f64> = observations
                .iter()
                .rev()
                .filter_map(|o| o.ndvi)
                .take(NDVI_TREND_WINDOW)
                .collect();
            Some(stats::mean(&recent)?)
        } else {
            None
        };

        let n = observations.len();
        let last_date = observations[n - 1].date;
        let values: Vec<f64> = future_dates(last_date, horizon)
            .into_iter()
            .enumerate()
            .map(|(step, date)| {
                let row = Self::feature_row(n + step, date, future_ndvi);
                regression::predict(&coefficients, &row).max(0.0)
            })
            .collect();

        if !want_confidence {
            return Ok(ForecastResult::new(values, self.id().name()));
        }

        let half_width = stats::sample_std_dev(&series.quantities())?;
        let lower = values.iter().map(|v| (v - half_width).max(0.0)).collect();
        let upper = values.iter().map(|v| v + half_width).collect();
        Ok(ForecastResult::with_bounds(
            values,
            lower,
            upper,
            self.id().name(),
        ))
    }
}
