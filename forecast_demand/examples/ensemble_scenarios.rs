use demand_core::utils::generate_demand_series;
use demand_core::Scenario;
use forecast_demand::{compose_report, ForecastEngine, ForecastRequest, ReportRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Demand: Ensemble Across Scenarios");
    println!("==========================================\n");

    let series = generate_demand_series(120, 48.0, 150.0, 0.06);
    let engine = ForecastEngine::with_defaults();

    for scenario in [
        Scenario::Pessimistic,
        Scenario::Realistic,
        Scenario::Optimistic,
    ] {
        let request = ReportRequest {
            product_id: "urea-46".to_string(),
            forecast: ForecastRequest {
                models: vec![
                    "sma".into(),
                    "wma".into(),
                    "es".into(),
                    "arima".into(),
                    "ensemble".into(),
                ],
                horizon: 30,
                want_confidence: true,
                scenario,
            },
            selling_price: Some(55.0),
        };

        let report = compose_report(&engine, &series, &request).await?;

        let first = &report.forecast_data[0];
        let last = &report.forecast_data[report.forecast_data.len() - 1];
        println!("--- scenario: {} ---", scenario);
        println!("models used:  {}", report.models_used.join(", "));
        println!(
            "day 1: {:.2}  day 30: {:.2}  confidence: {}",
            first.predicted_value,
            last.predicted_value,
            report
                .confidence
                .map(|c| format!("{:.1}", c))
                .unwrap_or_else(|| "n/a".to_string())
        );
        if let Some(revenue) = &report.revenue_projection {
            println!("projected revenue, day 1: {:.2}", revenue[0].projected_revenue);
        }
        println!();
    }

    // A full report serializes to JSON for downstream consumers
    let request = ReportRequest {
        product_id: "urea-46".to_string(),
        forecast: ForecastRequest::default(),
        selling_price: None,
    };
    let report = compose_report(&engine, &series, &request).await?;
    println!("report JSON (truncated): {:.200}...", report.to_json()?);

    Ok(())
}
