use demand_core::utils::generate_demand_series;
use demand_core::Scenario;
use forecast_demand::{ForecastEngine, ForecastRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Demand: Basic Forecasting Example");
    println!("==========================================\n");

    // Create sample data
    println!("Creating sample demand data...");
    let series = generate_demand_series(90, 52.0, 120.0, 0.04);
    println!("Sample data created: {} daily observations\n", series.len());

    // Run two moving-average models concurrently
    let engine = ForecastEngine::with_defaults();
    let request = ForecastRequest {
        models: vec!["sma".into(), "wma".into()],
        horizon: 14,
        want_confidence: true,
        scenario: Scenario::Realistic,
    };

    println!("Generating 14-day forecast...");
    let outcome = engine.generate_forecast(&series, &request).await?;

    println!("Models used: {}", outcome.models_used.join(", "));
    for point in &outcome.forecast_data {
        match (point.confidence_lower, point.confidence_upper) {
            (Some(lower), Some(upper)) => println!(
                "{}  {:>8.2}  [{:.2}, {:.2}]  ({})",
                point.date, point.predicted_value, lower, upper, point.model_used
            ),
            _ => println!(
                "{}  {:>8.2}  ({})",
                point.date, point.predicted_value, point.model_used
            ),
        }
    }

    println!("\nForecasting complete!");
    Ok(())
}
