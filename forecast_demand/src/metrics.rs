//! Metrics derived from an assembled forecast

use crate::engine::ForecastDataPoint;
use crate::utils::round1;
use agri_math::stats;
use demand_core::DemandSeries;
use serde::{Deserialize, Serialize};

/// Direction of the forecast relative to history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Key figures comparing the forecast with the historical series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastMetrics {
    /// Mean of the forecasted values
    pub avg_forecast: f64,
    /// Mean of the historical prices
    pub avg_historical: f64,
    /// Whether the forecast sits above or below history
    pub trend: Trend,
    /// Absolute percent change from the historical mean
    pub change_percent: f64,
}

/// Compare an assembled forecast with the historical series.
///
/// Returns `None` when either side is empty.
pub fn forecast_metrics(
    points: &[ForecastDataPoint],
    series: &DemandSeries,
) -> Option<ForecastMetrics> {
    let forecast_values: Vec<f64> = points.iter().map(|p| p.predicted_value).collect();
    let avg_forecast = stats::mean(&forecast_values).ok()?;
    let avg_historical = stats::mean(&series.prices()).ok()?;

    let trend = if avg_forecast > avg_historical {
        Trend::Increasing
    } else {
        Trend::Decreasing
    };
    let change_percent = ((avg_forecast - avg_historical) / avg_historical * 100.0).abs();

    Some(ForecastMetrics {
        avg_forecast,
        avg_historical,
        trend,
        change_percent,
    })
}

/// Overall confidence score for an assembled forecast, in [0, 100].
///
/// Each data point with both bounds and a nonzero prediction contributes
/// `100 - 50 * (upper - lower) / predicted`, clamped to [0, 100]; the score
/// is their mean, rounded to one decimal place. `None` means the confidence
/// is undetermined (no point qualified), which is distinct from a zero
/// score.
pub fn overall_confidence(points: &[ForecastDataPoint]) -> Option<f64> {
    let mut scores = Vec::with_capacity(points.len());

    for point in points {
        if let (Some(lower), Some(upper)) = (point.confidence_lower, point.confidence_upper) {
            if point.predicted_value != 0.0 {
                let relative_width = (upper - lower) / point.predicted_value;
                let score = (100.0 - relative_width * 50.0).clamp(0.0, 100.0);
                scores.push(score);
            }
        }
    }

    stats::mean(&scores).ok().map(round1)
}
