//! Revenue projection derived from an assembled forecast

use crate::engine::ForecastDataPoint;
use crate::utils::round2;
use agri_math::stats;
use chrono::NaiveDate;
use demand_core::DemandSeries;
use serde::{Deserialize, Serialize};

/// Projected revenue for one forecasted day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjection {
    /// Projection date
    pub date: NaiveDate,
    /// Projected units sold
    pub projected_quantity: f64,
    /// Selling price per unit
    pub selling_price: f64,
    /// Projected revenue for the day
    pub projected_revenue: f64,
    /// Lower revenue confidence bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_lower: Option<f64>,
    /// Upper revenue confidence bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_upper: Option<f64>,
}

/// Project revenue for every forecasted day.
///
/// Quantity forecasting is out of scope, so the historical mean quantity
/// stands in for every future day; only the price side is modeled. Bounds
/// on the source data point are scaled by the projected quantity. An empty
/// historical series yields an empty projection; this never fails.
pub fn project_revenue(
    points: &[ForecastDataPoint],
    selling_price: f64,
    series: &DemandSeries,
) -> Vec<RevenueProjection> {
    let quantity = match stats::mean(&series.quantities()) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };

    points
        .iter()
        .map(|point| RevenueProjection {
            date: point.date,
            projected_quantity: round2(quantity),
            selling_price: round2(selling_price),
            projected_revenue: round2(quantity * selling_price),
            confidence_lower: point.confidence_lower.map(|v| round2(v * quantity)),
            confidence_upper: point.confidence_upper.map(|v| round2(v * quantity)),
        })
        .collect()
}
