use std::io::Write;

use demand_core::utils::generate_demand_series;
use demand_core::Scenario;
use forecast_demand::metrics::overall_confidence;
use forecast_demand::revenue::project_revenue;
use forecast_demand::summary::generate_summary;
use forecast_demand::{
    compose_report, DataLoader, ForecastEngine, ForecastRequest, ReportRequest,
};
use tempfile::NamedTempFile;

// Helper function to create a simple CSV dataset
fn create_sample_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "date,quantity,price").unwrap();
    writeln!(file, "2024-01-01,120,100.0").unwrap();
    writeln!(file, "2024-01-02,122,102.0").unwrap();
    writeln!(file, "2024-01-03,118,101.0").unwrap();
    writeln!(file, "2024-01-04,125,103.0").unwrap();
    writeln!(file, "2024-01-05,121,102.0").unwrap();
    writeln!(file, "2024-01-06,119,104.0").unwrap();
    writeln!(file, "2024-01-07,123,103.0").unwrap();
    writeln!(file, "2024-01-08,126,105.0").unwrap();
    writeln!(file, "2024-01-09,124,104.0").unwrap();
    writeln!(file, "2024-01-10,127,106.0").unwrap();

    file
}

#[tokio::test]
async fn test_full_forecast_workflow() {
    // 1. Load data from CSV
    let data_file = create_sample_csv();
    let series = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(series.len(), 10);

    // 2. Run the engine with several models plus ensemble combination
    let engine = ForecastEngine::with_defaults();
    let request = ForecastRequest {
        models: vec![
            "sma".into(),
            "wma".into(),
            "es".into(),
            "arima".into(),
            "ensemble".into(),
        ],
        horizon: 7,
        want_confidence: true,
        scenario: Scenario::Realistic,
    };
    let outcome = engine.generate_forecast(&series, &request).await.unwrap();

    // 3. Every requested producer survived and the ensemble was combined
    assert_eq!(
        outcome.models_used,
        vec![
            "SMA".to_string(),
            "WMA".to_string(),
            "ES".to_string(),
            "ARIMA".to_string(),
            "Ensemble".to_string(),
        ]
    );
    assert_eq!(outcome.forecast_data.len(), 7);
    assert!(outcome
        .forecast_data
        .iter()
        .all(|p| p.model_used == "Ensemble"));

    // 4. Dates increase one day at a time from the last historical date
    let mut previous = series.last_date().unwrap();
    for point in &outcome.forecast_data {
        assert_eq!((point.date - previous).num_days(), 1);
        previous = point.date;
    }

    // 5. Derived artifacts
    let confidence = overall_confidence(&outcome.forecast_data);
    let score = confidence.unwrap();
    assert!((0.0..=100.0).contains(&score));

    let revenue = project_revenue(&outcome.forecast_data, 110.0, &series);
    assert_eq!(revenue.len(), 7);
    assert!(revenue.iter().all(|r| r.projected_revenue > 0.0));

    let summary = generate_summary(
        &outcome.forecast_data,
        &series,
        &outcome.models_used,
        outcome.scenario,
    );
    assert!(summary.starts_with("# Price Forecast Summary"));
    assert!(summary.contains("## Key Metrics"));
    assert!(summary.contains("SMA, WMA, ES, ARIMA, Ensemble"));
}

#[tokio::test]
async fn test_report_composition_and_serialization() {
    let series = generate_demand_series(60, 48.0, 140.0, 0.05);
    let engine = ForecastEngine::with_defaults();

    let request = ReportRequest {
        product_id: "npk-15-15-15".to_string(),
        forecast: ForecastRequest {
            models: vec!["sma".into(), "es".into(), "ensemble".into()],
            horizon: 14,
            want_confidence: true,
            scenario: Scenario::Optimistic,
        },
        selling_price: Some(52.0),
    };

    let report = compose_report(&engine, &series, &request).await.unwrap();

    assert_eq!(report.forecast_data.len(), 14);
    assert_eq!(report.scenario, Scenario::Optimistic);
    assert_eq!(report.metadata.data_points, 60);
    assert_eq!(report.metadata.forecast_horizon, 14);
    assert_eq!(report.metadata.product_id, "npk-15-15-15");
    assert!(report.revenue_projection.is_some());
    assert!(report.confidence.is_some());

    let json = report.to_json().unwrap();
    assert!(json.contains("\"forecast_data\""));
    assert!(json.contains("\"models_used\""));
    assert!(json.contains("\"scenario\":\"optimistic\""));
}

#[tokio::test]
async fn test_report_without_selling_price_skips_revenue() {
    let series = generate_demand_series(30, 50.0, 100.0, 0.03);
    let engine = ForecastEngine::with_defaults();

    let request = ReportRequest {
        product_id: "urea-46".to_string(),
        forecast: ForecastRequest::default(),
        selling_price: None,
    };

    let report = compose_report(&engine, &series, &request).await.unwrap();
    assert!(report.revenue_projection.is_none());
    // The default request asks only for "ensemble": with no producers to
    // combine, the fallback path engages
    assert_eq!(report.models_used, vec!["Fallback".to_string()]);
}

#[tokio::test]
async fn test_engine_is_reusable_across_calls() {
    let series = generate_demand_series(40, 45.0, 110.0, 0.04);
    let engine = ForecastEngine::with_defaults();

    for scenario in [
        Scenario::Optimistic,
        Scenario::Pessimistic,
        Scenario::Realistic,
    ] {
        let request = ForecastRequest {
            models: vec!["sma".into(), "wma".into()],
            horizon: 5,
            want_confidence: false,
            scenario,
        };
        let outcome = engine.generate_forecast(&series, &request).await.unwrap();
        assert_eq!(outcome.forecast_data.len(), 5);
        assert_eq!(outcome.scenario, scenario);
    }
}
