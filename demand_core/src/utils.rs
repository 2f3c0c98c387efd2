//! Utility functions for generating demand series
//!
//! Contains synthetic data generators used by examples and tests.

use crate::{DemandObservation, DemandSeries};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Generate a synthetic daily demand series.
///
/// Prices random-walk around `base_price` with the given relative
/// `volatility`; quantities wander around `base_quantity`. Dates start at
/// 2024-01-01 and increase by one day per observation.
///
/// # Arguments
/// * `days` - Number of daily observations to generate
/// * `base_price` - Starting price per unit
/// * `base_quantity` - Typical units demanded per day
/// * `volatility` - Relative day-to-day movement (e.g. 0.05 for 5%)
pub fn generate_demand_series(
    days: usize,
    base_price: f64,
    base_quantity: f64,
    volatility: f64,
) -> DemandSeries {
    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let mut price = base_price;
    let mut observations = Vec::with_capacity(days);

    for i in 0..days {
        let date = start + Duration::days(i as i64);

        // Random price movement, floored away from zero
        let movement = price * volatility * (rng.gen::<f64>() - 0.5);
        price = (price + movement).max(base_price * 0.1);

        let quantity =
            (base_quantity * (1.0 + volatility * (rng.gen::<f64>() - 0.5))).max(1.0);

        // Seasonal-looking vegetation index in [0.2, 0.8]
        let ndvi = 0.5 + 0.3 * ((i as f64) * std::f64::consts::TAU / 365.0).sin();

        observations.push(DemandObservation {
            date,
            quantity,
            price,
            ndvi: Some(ndvi),
        });
    }

    DemandSeries::new(observations).expect("generated observations are ordered and positive")
}

/// Generate a series with a constant price, useful for flat-forecast checks
pub fn constant_price_series(days: usize, price: f64, quantity: f64) -> DemandSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let observations = (0..days)
        .map(|i| DemandObservation::new(start + Duration::days(i as i64), quantity, price))
        .collect();

    DemandSeries::new(observations).expect("constant observations are ordered and positive")
}
