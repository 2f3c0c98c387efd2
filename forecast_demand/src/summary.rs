//! Narrative summary of a forecast, rendered as Markdown

use crate::engine::ForecastDataPoint;
use crate::metrics::{forecast_metrics, ForecastMetrics, Trend};
use demand_core::{DemandSeries, Scenario};

/// Render a Markdown summary of the forecast: overview, key metrics,
/// analysis and a trend-dependent recommendation.
pub fn generate_summary(
    points: &[ForecastDataPoint],
    series: &DemandSeries,
    models_used: &[String],
    scenario: Scenario,
) -> String {
    let metrics = match forecast_metrics(points, series) {
        Some(metrics) => metrics,
        None => return "Forecast summary generation failed.".to_string(),
    };

    format!(
        "# Price Forecast Summary\n\n{}\n\n{}\n\n{}\n\n{}",
        overview_section(&metrics, points.len(), scenario),
        metrics_section(&metrics, points.len(), models_used),
        analysis_section(),
        recommendations_section(metrics.trend),
    )
}

fn overview_section(metrics: &ForecastMetrics, days: usize, scenario: Scenario) -> String {
    format!(
        "## Overview\nBased on historical demand data, the forecast shows a **{}** trend \
         over the next {} days using {} scenario.",
        metrics.trend, days, scenario
    )
}

fn metrics_section(metrics: &ForecastMetrics, days: usize, models_used: &[String]) -> String {
    format!(
        "## Key Metrics\n\
         - **Average Historical Price**: ${:.2}\n\
         - **Average Forecasted Price**: ${:.2}\n\
         - **Expected Change**: {:.1}% {}\n\
         - **Models Used**: {}\n\
         - **Forecast Horizon**: {} days",
        metrics.avg_historical,
        metrics.avg_forecast,
        metrics.change_percent,
        metrics.trend,
        models_used.join(", "),
        days
    )
}

fn analysis_section() -> &'static str {
    "## Analysis\nThe forecast combines multiple statistical and machine learning models \
     to provide reliable predictions. Confidence intervals are included to help assess \
     prediction uncertainty."
}

fn recommendations_section(trend: Trend) -> String {
    let recommendation = match trend {
        Trend::Increasing => "Consider increasing inventory to meet potential higher demand.",
        Trend::Decreasing => "Monitor market conditions closely as prices may decline.",
    };

    format!(
        "## Recommendations\n{}\nTrack actual prices against this forecast and adjust \
         strategies accordingly.",
        recommendation
    )
}
