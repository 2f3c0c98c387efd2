//! # Demand Core
//!
//! `demand_core` provides the domain data types shared by the agricultural
//! demand forecasting crates: daily demand observations, validated demand
//! series and forecast scenarios.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::NaiveDate;
//! use demand_core::{DemandObservation, DemandSeries, Scenario};
//!
//! let observations = vec![
//!     DemandObservation::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 120.0, 50.0),
//!     DemandObservation::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 115.0, 51.0),
//!     DemandObservation::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 130.0, 49.5),
//! ];
//!
//! let series = DemandSeries::new(observations).unwrap();
//! let optimistic = Scenario::Optimistic.adjust(&series);
//! assert!((optimistic.prices()[0] - 55.0).abs() < 1e-9);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Utility functions
pub mod utils;

/// Errors that can occur when building demand series
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Unordered series: {0}")]
    UnorderedSeries(String),
}

/// One day of observed demand for a commodity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandObservation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Units demanded
    pub quantity: f64,
    /// Price per unit
    pub price: f64,
    /// Optional NDVI vegetation-index reading for the growing region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndvi: Option<f64>,
}

impl DemandObservation {
    /// Create an observation without an NDVI reading
    pub fn new(date: NaiveDate, quantity: f64, price: f64) -> Self {
        Self {
            date,
            quantity,
            price,
            ndvi: None,
        }
    }

    /// Create an observation carrying an NDVI reading
    pub fn with_ndvi(date: NaiveDate, quantity: f64, price: f64, ndvi: f64) -> Self {
        Self {
            date,
            quantity,
            price,
            ndvi: Some(ndvi),
        }
    }
}

/// An ordered series of daily demand observations.
///
/// Construction validates that dates are strictly increasing and that
/// quantities and prices are positive finite numbers. Once built, a series
/// is never mutated; transformations produce new series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSeries {
    observations: Vec<DemandObservation>,
}

impl DemandSeries {
    /// Build a series from observations, validating ordering and values
    pub fn new(observations: Vec<DemandObservation>) -> Result<Self, SeriesError> {
        for observation in &observations {
            if !observation.quantity.is_finite() || observation.quantity <= 0.0 {
                return Err(SeriesError::InvalidObservation(format!(
                    "Quantity must be a positive number, got {} on {}",
                    observation.quantity, observation.date
                )));
            }
            if !observation.price.is_finite() || observation.price <= 0.0 {
                return Err(SeriesError::InvalidObservation(format!(
                    "Price must be a positive number, got {} on {}",
                    observation.price, observation.date
                )));
            }
        }

        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::UnorderedSeries(format!(
                    "Dates must be strictly increasing, got {} after {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Build a series from observations already known to satisfy the
    /// invariants (used by in-crate transformations)
    fn from_validated(observations: Vec<DemandObservation>) -> Self {
        Self { observations }
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The observations in date order
    pub fn observations(&self) -> &[DemandObservation] {
        &self.observations
    }

    /// All prices in date order
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }

    /// All quantities in date order
    pub fn quantities(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.quantity).collect()
    }

    /// Date of the first observation
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Date of the last observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Whether every observation carries an NDVI reading
    pub fn has_full_ndvi(&self) -> bool {
        !self.observations.is_empty() && self.observations.iter().all(|o| o.ndvi.is_some())
    }
}

/// Forecast scenario applied to historical prices before modeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Prices raised by 10%
    Optimistic,
    /// Prices lowered by 10%
    Pessimistic,
    /// Prices unchanged
    Realistic,
}

impl Scenario {
    /// Resolve a scenario tag, case-insensitively.
    ///
    /// Unrecognized tags resolve to `Realistic` so forward-compatible
    /// client requests never fail on the scenario field.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "optimistic" => Scenario::Optimistic,
            "pessimistic" => Scenario::Pessimistic,
            _ => Scenario::Realistic,
        }
    }

    /// Price multiplier for this scenario
    pub fn multiplier(self) -> f64 {
        match self {
            Scenario::Optimistic => 1.10,
            Scenario::Pessimistic => 0.90,
            Scenario::Realistic => 1.00,
        }
    }

    /// Produce a new series with every price scaled by the scenario
    /// multiplier. Quantities, dates and NDVI readings are untouched; the
    /// input series is never mutated.
    pub fn adjust(self, series: &DemandSeries) -> DemandSeries {
        let multiplier = self.multiplier();
        let adjusted = series
            .observations()
            .iter()
            .map(|o| DemandObservation {
                date: o.date,
                quantity: o.quantity,
                price: o.price * multiplier,
                ndvi: o.ndvi,
            })
            .collect();

        DemandSeries::from_validated(adjusted)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Realistic
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Scenario::Optimistic => "optimistic",
            Scenario::Pessimistic => "pessimistic",
            Scenario::Realistic => "realistic",
        };
        write!(f, "{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(day: u32, price: f64) -> DemandObservation {
        DemandObservation::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            100.0,
            price,
        )
    }

    #[test]
    fn test_series_validation() {
        let series =
            DemandSeries::new(vec![observation(1, 50.0), observation(2, 51.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.prices(), vec![50.0, 51.0]);
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let result = DemandSeries::new(vec![observation(2, 50.0), observation(1, 51.0)]);
        assert!(matches!(result, Err(SeriesError::UnorderedSeries(_))));

        let result = DemandSeries::new(vec![observation(1, 50.0), observation(1, 51.0)]);
        assert!(matches!(result, Err(SeriesError::UnorderedSeries(_))));
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let result = DemandSeries::new(vec![observation(1, 0.0)]);
        assert!(matches!(result, Err(SeriesError::InvalidObservation(_))));

        let mut bad_quantity = observation(1, 50.0);
        bad_quantity.quantity = -3.0;
        assert!(DemandSeries::new(vec![bad_quantity]).is_err());
    }

    #[test]
    fn test_scenario_tags() {
        assert_eq!(Scenario::from_tag("OPTIMISTIC"), Scenario::Optimistic);
        assert_eq!(Scenario::from_tag("pessimistic"), Scenario::Pessimistic);
        assert_eq!(Scenario::from_tag("realistic"), Scenario::Realistic);
        assert_eq!(Scenario::from_tag("no-such-tag"), Scenario::Realistic);
    }

    #[test]
    fn test_scenario_adjustment() {
        let series =
            DemandSeries::new(vec![observation(1, 50.0), observation(2, 60.0)]).unwrap();

        let optimistic = Scenario::Optimistic.adjust(&series);
        for (adjusted, original) in optimistic.prices().iter().zip(series.prices()) {
            assert!((adjusted - original * 1.10).abs() < 1e-9);
        }
        // Quantities untouched, input series unchanged
        assert_eq!(optimistic.quantities(), series.quantities());
        assert_eq!(series.prices(), vec![50.0, 60.0]);

        let pessimistic = Scenario::Pessimistic.adjust(&series);
        for (adjusted, original) in pessimistic.prices().iter().zip(series.prices()) {
            assert!((adjusted - original * 0.90).abs() < 1e-9);
        }

        let realistic = Scenario::Realistic.adjust(&series);
        assert_eq!(realistic.prices(), series.prices());
    }

    #[test]
    fn test_full_ndvi_detection() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let with = DemandSeries::new(vec![DemandObservation::with_ndvi(date, 10.0, 5.0, 0.6)])
            .unwrap();
        assert!(with.has_full_ndvi());

        let without = DemandSeries::new(vec![DemandObservation::new(date, 10.0, 5.0)]).unwrap();
        assert!(!without.has_full_ndvi());
    }
}
