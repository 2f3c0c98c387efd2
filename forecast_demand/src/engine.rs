//! Ensemble forecast orchestration
//!
//! The engine runs the requested model producers concurrently on a bounded
//! worker pool, tolerates individual model failures, falls back to a
//! degenerate flat forecast when every model fails, optionally combines
//! surviving results into an ensemble, and assembles one calendar-anchored
//! data point per forecasted day.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use demand_core::{DemandSeries, Scenario};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, MAX_FORECAST_DAYS, MIN_HISTORY_POINTS};
use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, ModelId, ENSEMBLE_NAME, ENSEMBLE_TAG, FALLBACK_NAME};
use crate::utils::{future_dates, round2};
use agri_math::stats;

/// Band half-width multiplier for the fallback forecast
const FALLBACK_BAND_MULTIPLIER: f64 = 2.0;

/// Relative band width used when the deviation is degenerate
const FALLBACK_DEGENERATE_FRACTION: f64 = 0.1;

/// A forecast request: which models to run and how far ahead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Requested model tags (case-insensitive; `"ensemble"` asks for
    /// combination, unknown tags are skipped)
    pub models: Vec<String>,
    /// Number of days to forecast, 1..=365
    pub horizon: usize,
    /// Whether to include confidence bounds
    pub want_confidence: bool,
    /// Price scenario applied before modeling
    pub scenario: Scenario,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            models: vec![ENSEMBLE_TAG.to_string()],
            horizon: 7,
            want_confidence: true,
            scenario: Scenario::Realistic,
        }
    }
}

/// One forecasted day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDataPoint {
    /// Forecast date
    pub date: NaiveDate,
    /// Predicted demand/price, rounded to 2 decimal places
    pub predicted_value: f64,
    /// Lower confidence bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_lower: Option<f64>,
    /// Upper confidence bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_upper: Option<f64>,
    /// Model that generated this prediction
    pub model_used: String,
}

/// Result of one orchestration call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutcome {
    /// One data point per forecasted day, dates strictly increasing
    pub forecast_data: Vec<ForecastDataPoint>,
    /// Names of every model that contributed, including `"Ensemble"` and
    /// `"Fallback"` when those paths engaged
    pub models_used: Vec<String>,
    /// Scenario the forecast was generated under
    pub scenario: Scenario,
}

/// The ensemble forecast orchestrator.
///
/// Holds the process-wide worker pool; create it once at service start and
/// share it across calls. Each call operates only on call-local copies of
/// its input, so concurrent calls are safe.
#[derive(Debug)]
pub struct ForecastEngine {
    pool: Arc<Semaphore>,
    config: EngineConfig,
}

impl ForecastEngine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let pool = Arc::new(Semaphore::new(config.worker_pool_size.max(1)));
        Self { pool, config }
    }

    /// Create an engine with the default pool size and timeout
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Generate a forecast for the given series.
    ///
    /// Fails only on contract violations (series shorter than 3 points,
    /// horizon outside 1..=365). Model failures, total failure and an
    /// uncombinable ensemble all degrade gracefully instead.
    pub async fn generate_forecast(
        &self,
        series: &DemandSeries,
        request: &ForecastRequest,
    ) -> Result<ForecastOutcome> {
        if series.len() < MIN_HISTORY_POINTS {
            return Err(ForecastError::DataError(format!(
                "Insufficient historical data. Need at least {} data points, got {}.",
                MIN_HISTORY_POINTS,
                series.len()
            )));
        }
        if request.horizon < 1 || request.horizon > MAX_FORECAST_DAYS {
            return Err(ForecastError::ValidationError(format!(
                "Forecast horizon must be between 1 and {} days, got {}",
                MAX_FORECAST_DAYS, request.horizon
            )));
        }

        info!(
            horizon = request.horizon,
            scenario = %request.scenario,
            models = ?request.models,
            "generating forecast"
        );

        let adjusted = request.scenario.adjust(series);
        let (resolved, ensemble_requested) = resolve_models(&request.models);

        let survivors = self
            .dispatch(&adjusted, request.horizon, request.want_confidence, &resolved)
            .await;

        let fallback = if survivors.is_empty() {
            warn!("no model produced a usable forecast, using fallback");
            Some(fallback_forecast(
                &adjusted,
                request.horizon,
                request.want_confidence,
            ))
        } else {
            None
        };

        let ensemble = if ensemble_requested && !survivors.is_empty() {
            match combine_ensemble(&survivors, request.horizon, request.want_confidence) {
                Ok(result) => Some(result),
                Err(err) => {
                    warn!(error = %err, "ensemble unavailable, degrading to a single model");
                    None
                }
            }
        } else {
            None
        };

        let mut models_used: Vec<String> =
            survivors.keys().map(|id| id.name().to_string()).collect();
        if fallback.is_some() {
            models_used.push(FALLBACK_NAME.to_string());
        }
        if ensemble.is_some() {
            models_used.push(ENSEMBLE_NAME.to_string());
        }

        // Representative: the ensemble when combined, else the first
        // survivor in canonical model order, else the fallback
        let representative = ensemble
            .as_ref()
            .or_else(|| survivors.values().next())
            .or(fallback.as_ref())
            .ok_or_else(|| {
                ForecastError::ForecastingError("No forecast result available".to_string())
            })?;

        let last_date = adjusted.last_date().ok_or_else(|| {
            ForecastError::DataError("Series has no observations".to_string())
        })?;
        let forecast_data = assemble_forecast(representative, last_date, request.horizon)?;

        Ok(ForecastOutcome {
            forecast_data,
            models_used,
            scenario: request.scenario,
        })
    }

    /// Run the resolved producers concurrently, each on its own copy of the
    /// adjusted series, and collect the surviving results.
    ///
    /// Every task is gated by the shared worker pool and bounded by the
    /// configured timeout. A producer error, panic, timeout or empty result
    /// discards only that producer's output.
    async fn dispatch(
        &self,
        series: &DemandSeries,
        horizon: usize,
        want_confidence: bool,
        resolved: &[ModelId],
    ) -> BTreeMap<ModelId, ForecastResult> {
        let mut tasks: JoinSet<(ModelId, Result<ForecastResult>)> = JoinSet::new();

        for &id in resolved {
            let task_series = series.clone();
            let pool = Arc::clone(&self.pool);
            let timeout = self.config.model_timeout;

            tasks.spawn(async move {
                let _permit = match pool.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            id,
                            Err(ForecastError::ForecastingError(
                                "Worker pool is closed".to_string(),
                            )),
                        )
                    }
                };

                let produced = tokio::time::timeout(
                    timeout,
                    tokio::task::spawn_blocking(move || {
                        id.producer().produce(&task_series, horizon, want_confidence)
                    }),
                )
                .await;

                let result = match produced {
                    Err(_) => Err(ForecastError::ForecastingError(format!(
                        "{} exceeded the {}s model timeout",
                        id.name(),
                        timeout.as_secs()
                    ))),
                    Ok(Err(join_error)) => Err(ForecastError::ForecastingError(format!(
                        "{} task aborted: {}",
                        id.name(),
                        join_error
                    ))),
                    Ok(Ok(result)) => result,
                };

                (id, result)
            });
        }

        let mut survivors = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(result))) => {
                    if result.is_empty() {
                        warn!(model = id.name(), "model returned an empty forecast, discarding");
                    } else {
                        survivors.insert(id, result);
                    }
                }
                Ok((id, Err(err))) => {
                    warn!(model = id.name(), error = %err, "model failed");
                }
                Err(join_error) => {
                    warn!(error = %join_error, "model task failed to join");
                }
            }
        }

        survivors
    }
}

/// Resolve request tags into registered model identifiers.
///
/// Tags are matched case-insensitively and deduplicated into canonical
/// order. `"ensemble"` sets the returned flag instead of resolving to a
/// producer; unknown tags are skipped silently so forward-compatible
/// client requests never fail.
pub fn resolve_models(tags: &[String]) -> (Vec<ModelId>, bool) {
    let mut ensemble_requested = false;
    let mut resolved = BTreeSet::new();

    for tag in tags {
        if tag.eq_ignore_ascii_case(ENSEMBLE_TAG) {
            ensemble_requested = true;
            continue;
        }
        match ModelId::parse(tag) {
            Some(id) => {
                resolved.insert(id);
            }
            None => debug!(tag = %tag, "unknown model tag skipped"),
        }
    }

    (resolved.into_iter().collect(), ensemble_requested)
}

/// Degenerate flat forecast at the mean price, used when every model
/// failed. This is the terminal safety net: it never fails.
///
/// The band half-width is twice the sample deviation; when the deviation is
/// unavailable or zero (fewer than 2 points, constant prices) it is 10% of
/// the mean instead. A non-finite mean yields a fixed sentinel result.
pub fn fallback_forecast(
    series: &DemandSeries,
    horizon: usize,
    want_confidence: bool,
) -> ForecastResult {
    let prices = series.prices();

    let mean = match stats::mean(&prices) {
        Ok(value) if value.is_finite() => value,
        _ => return sentinel_forecast(horizon, want_confidence),
    };

    let values = vec![mean; horizon];
    if !want_confidence {
        return ForecastResult::new(values, FALLBACK_NAME);
    }

    let half_width = match stats::sample_std_dev(&prices) {
        Ok(sd) if sd.is_finite() && sd > 0.0 => FALLBACK_BAND_MULTIPLIER * sd,
        _ => mean.abs() * FALLBACK_DEGENERATE_FRACTION,
    };

    let lower = values.iter().map(|v| v - half_width).collect();
    let upper = values.iter().map(|v| v + half_width).collect();
    ForecastResult::with_bounds(values, lower, upper, FALLBACK_NAME)
}

fn sentinel_forecast(horizon: usize, want_confidence: bool) -> ForecastResult {
    let values = vec![100.0; horizon];
    if !want_confidence {
        return ForecastResult::new(values, FALLBACK_NAME);
    }
    ForecastResult::with_bounds(
        values,
        vec![80.0; horizon],
        vec![120.0; horizon],
        FALLBACK_NAME,
    )
}

/// Combine surviving results into an ensemble forecast.
///
/// The per-day value is the arithmetic mean over results that cover the
/// whole horizon; shorter results are excluded entirely. Bounds are the
/// per-day mean over results carrying full-length bounds; when none do,
/// a uniform band of one population deviation of the ensemble values is
/// applied to every day.
pub fn combine_ensemble(
    results: &BTreeMap<ModelId, ForecastResult>,
    horizon: usize,
    want_confidence: bool,
) -> Result<ForecastResult> {
    let qualifying: Vec<&ForecastResult> = results
        .values()
        .filter(|r| r.values.len() >= horizon)
        .collect();

    if qualifying.is_empty() {
        return Err(ForecastError::EnsembleUnavailable(
            "No surviving result covers the requested horizon".to_string(),
        ));
    }

    let count = qualifying.len() as f64;
    let values: Vec<f64> = (0..horizon)
        .map(|day| qualifying.iter().map(|r| r.values[day]).sum::<f64>() / count)
        .collect();

    if !want_confidence {
        return Ok(ForecastResult::new(values, ENSEMBLE_NAME));
    }

    let bounded: Vec<(&[f64], &[f64])> = qualifying
        .iter()
        .filter_map(|r| match (&r.confidence_lower, &r.confidence_upper) {
            (Some(lower), Some(upper)) if lower.len() >= horizon && upper.len() >= horizon => {
                Some((lower.as_slice(), upper.as_slice()))
            }
            _ => None,
        })
        .collect();

    let (lower, upper) = if bounded.is_empty() {
        let spread = stats::population_std_dev(&values).unwrap_or(0.0);
        (
            values.iter().map(|v| v - spread).collect(),
            values.iter().map(|v| v + spread).collect(),
        )
    } else {
        let bound_count = bounded.len() as f64;
        (
            (0..horizon)
                .map(|day| bounded.iter().map(|(l, _)| l[day]).sum::<f64>() / bound_count)
                .collect(),
            (0..horizon)
                .map(|day| bounded.iter().map(|(_, u)| u[day]).sum::<f64>() / bound_count)
                .collect(),
        )
    };

    Ok(ForecastResult::with_bounds(
        values,
        lower,
        upper,
        ENSEMBLE_NAME,
    ))
}

/// Turn the representative result into calendar-anchored data points, one
/// per day starting the day after `last_date`.
pub fn assemble_forecast(
    representative: &ForecastResult,
    last_date: NaiveDate,
    horizon: usize,
) -> Result<Vec<ForecastDataPoint>> {
    if representative.values.len() < horizon {
        return Err(ForecastError::ForecastingError(format!(
            "{} result covers {} of {} requested days",
            representative.model_name,
            representative.values.len(),
            horizon
        )));
    }

    let points = future_dates(last_date, horizon)
        .into_iter()
        .enumerate()
        .map(|(day, date)| ForecastDataPoint {
            date,
            predicted_value: round2(representative.values[day]),
            confidence_lower: representative
                .confidence_lower
                .as_ref()
                .and_then(|bounds| bounds.get(day))
                .map(|v| round2(*v)),
            confidence_upper: representative
                .confidence_upper
                .as_ref()
                .and_then(|bounds| bounds.get(day))
                .map(|v| round2(*v)),
            model_used: representative.model_name.clone(),
        })
        .collect();

    Ok(points)
}
