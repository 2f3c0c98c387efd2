//! Forecasting model producers for demand series

use crate::error::{ForecastError, Result};
use demand_core::DemandSeries;
use std::fmt::Debug;

pub mod autoregressive;
pub mod exponential_smoothing;
pub mod moving_average;
pub mod regression;

pub use autoregressive::ArimaModel;
pub use exponential_smoothing::EsModel;
pub use moving_average::{SmaModel, WmaModel};
pub use regression::RegressionModel;

/// Model name attached to a combined ensemble result
pub const ENSEMBLE_NAME: &str = "Ensemble";

/// Model name attached to the degenerate fallback result
pub const FALLBACK_NAME: &str = "Fallback";

/// Request tag that asks for ensemble combination.
///
/// This is a post-processing directive, never a producer: the dispatcher
/// skips it and the engine combines surviving results afterwards.
pub const ENSEMBLE_TAG: &str = "ensemble";

/// Forecast produced by a single model (or by combination/fallback)
#[derive(Debug, Clone)]
pub struct ForecastResult {
    /// Forecasted values, one per future day
    pub values: Vec<f64>,
    /// Lower confidence bounds, same length as values when present
    pub confidence_lower: Option<Vec<f64>>,
    /// Upper confidence bounds, same length as values when present
    pub confidence_upper: Option<Vec<f64>>,
    /// Name of the model that produced this forecast
    pub model_name: String,
}

impl ForecastResult {
    /// Create a result without confidence bounds
    pub fn new(values: Vec<f64>, model_name: impl Into<String>) -> Self {
        Self {
            values,
            confidence_lower: None,
            confidence_upper: None,
            model_name: model_name.into(),
        }
    }

    /// Create a result with confidence bounds
    pub fn with_bounds(
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            values,
            confidence_lower: Some(lower),
            confidence_upper: Some(upper),
            model_name: model_name.into(),
        }
    }

    /// Number of forecasted days
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the result carries no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether both confidence bounds are present
    pub fn has_bounds(&self) -> bool {
        self.confidence_lower.is_some() && self.confidence_upper.is_some()
    }
}

/// Identifiers of the registered model producers.
///
/// The derive(Ord) declaration order doubles as the canonical model order:
/// when no ensemble is available, the representative result is the first
/// surviving model in this order, independent of dispatch completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelId {
    /// Simple moving average
    Sma,
    /// Weighted moving average
    Wma,
    /// Exponential smoothing with weekly seasonality
    Es,
    /// Autoregressive model on differenced prices
    Arima,
    /// Learned regression over calendar and NDVI features
    Regression,
}

impl ModelId {
    /// Every registered model, in canonical order
    pub const ALL: [ModelId; 5] = [
        ModelId::Sma,
        ModelId::Wma,
        ModelId::Es,
        ModelId::Arima,
        ModelId::Regression,
    ];

    /// Resolve a request tag, case-insensitively.
    ///
    /// Returns `None` for unknown tags and for the `"ensemble"` directive;
    /// callers decide whether to skip or handle those.
    pub fn parse(tag: &str) -> Option<ModelId> {
        match tag.to_lowercase().as_str() {
            "sma" => Some(ModelId::Sma),
            "wma" => Some(ModelId::Wma),
            "es" => Some(ModelId::Es),
            "arima" => Some(ModelId::Arima),
            "regression" => Some(ModelId::Regression),
            _ => None,
        }
    }

    /// Display name used in results and `models_used`
    pub fn name(self) -> &'static str {
        match self {
            ModelId::Sma => "SMA",
            ModelId::Wma => "WMA",
            ModelId::Es => "ES",
            ModelId::Arima => "ARIMA",
            ModelId::Regression => "Regression",
        }
    }

    /// Build the producer registered for this identifier
    pub fn producer(self) -> Box<dyn DemandModel> {
        match self {
            ModelId::Sma => Box::new(SmaModel),
            ModelId::Wma => Box::new(WmaModel),
            ModelId::Es => Box::new(EsModel::default()),
            ModelId::Arima => Box::new(ArimaModel::default()),
            ModelId::Regression => Box::new(RegressionModel),
        }
    }
}

/// A forecasting model producer.
///
/// Producers are pure functions of their inputs: they share no mutable
/// state and can run concurrently on independent copies of a series.
pub trait DemandModel: Debug + Send + Sync {
    /// Identifier this producer is registered under
    fn id(&self) -> ModelId;

    /// Minimum history length this producer can work with
    fn min_observations(&self) -> usize;

    /// Forecast `horizon` days ahead from the given series
    fn produce(
        &self,
        series: &DemandSeries,
        horizon: usize,
        want_confidence: bool,
    ) -> Result<ForecastResult>;

    /// Reject series shorter than this producer's minimum window
    fn check_history(&self, series: &DemandSeries) -> Result<()> {
        if series.len() < self.min_observations() {
            return Err(ForecastError::ValidationError(format!(
                "Insufficient data for {}. Need at least {} observations, got {}.",
                self.id().name(),
                self.min_observations(),
                series.len()
            )));
        }
        Ok(())
    }
}

/// Symmetric confidence band around each forecast value
pub(crate) fn symmetric_bounds(values: &[f64], half_width: f64) -> (Vec<f64>, Vec<f64>) {
    let lower = values.iter().map(|v| v - half_width).collect();
    let upper = values.iter().map(|v| v + half_width).collect();
    (lower, upper)
}
