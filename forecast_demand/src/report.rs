//! Full forecast report composition
//!
//! Bundles the orchestrator outcome with the derived artifacts (revenue
//! projection, narrative summary, overall confidence) the way a request
//! handler would return them to a client.

use chrono::{DateTime, Utc};
use demand_core::{DemandSeries, Scenario};
use serde::{Deserialize, Serialize};

use crate::engine::{ForecastDataPoint, ForecastEngine, ForecastRequest};
use crate::error::Result;
use crate::metrics::overall_confidence;
use crate::revenue::{project_revenue, RevenueProjection};
use crate::summary::generate_summary;

/// A report request: the forecast parameters plus report-level options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Product the forecast is for
    pub product_id: String,
    /// Forecast parameters handed to the engine
    pub forecast: ForecastRequest,
    /// Selling price per unit; enables the revenue projection when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
}

/// Context recorded alongside the forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Number of historical observations used
    pub data_points: usize,
    /// Forecast horizon in days
    pub forecast_horizon: usize,
    /// Product the forecast is for
    pub product_id: String,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

/// A complete forecast report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    /// One data point per forecasted day
    pub forecast_data: Vec<ForecastDataPoint>,
    /// Revenue projection, present when a selling price was provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_projection: Option<Vec<RevenueProjection>>,
    /// Models that contributed to the forecast
    pub models_used: Vec<String>,
    /// Markdown narrative summary
    pub summary: String,
    /// Overall confidence score in [0, 100], absent when undetermined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Scenario the forecast was generated under
    pub scenario: Scenario,
    /// Report context
    pub metadata: ReportMetadata,
}

impl ForecastReport {
    /// Serialize the report as a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run the engine and derive the full report from its outcome.
///
/// The engine owns concurrency and failure semantics; everything here is a
/// pure derivation over the assembled forecast.
pub async fn compose_report(
    engine: &ForecastEngine,
    series: &DemandSeries,
    request: &ReportRequest,
) -> Result<ForecastReport> {
    let outcome = engine.generate_forecast(series, &request.forecast).await?;

    let revenue_projection = request
        .selling_price
        .filter(|price| *price > 0.0)
        .map(|price| project_revenue(&outcome.forecast_data, price, series));

    let summary = generate_summary(
        &outcome.forecast_data,
        series,
        &outcome.models_used,
        outcome.scenario,
    );
    let confidence = overall_confidence(&outcome.forecast_data);

    Ok(ForecastReport {
        metadata: ReportMetadata {
            data_points: series.len(),
            forecast_horizon: request.forecast.horizon,
            product_id: request.product_id.clone(),
            generated_at: Utc::now(),
        },
        forecast_data: outcome.forecast_data,
        revenue_projection,
        models_used: outcome.models_used,
        summary,
        confidence,
        scenario: outcome.scenario,
    })
}
