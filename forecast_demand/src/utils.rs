//! Utility functions for the forecast_demand crate

use chrono::{Duration, NaiveDate};

/// Calendar dates for the forecast horizon: one per day, starting the day
/// after `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as i64)
        .map(|offset| last_date + Duration::days(offset))
        .collect()
}

/// Round to two decimal places (reported values and bounds)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (confidence scores)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
