use chrono::{Duration, NaiveDate};
use demand_core::{DemandObservation, DemandSeries};
use forecast_demand::models::{
    ArimaModel, DemandModel, EsModel, ModelId, RegressionModel, SmaModel, WmaModel,
};
use forecast_demand::ForecastError;
use rstest::rstest;

fn series_from_prices(prices: &[f64]) -> DemandSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let observations = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            DemandObservation::new(start + Duration::days(i as i64), 100.0, price)
        })
        .collect();
    DemandSeries::new(observations).unwrap()
}

fn series_from_quantities(quantities: &[f64]) -> DemandSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let observations = quantities
        .iter()
        .enumerate()
        .map(|(i, &quantity)| {
            DemandObservation::new(start + Duration::days(i as i64), quantity, 50.0)
        })
        .collect();
    DemandSeries::new(observations).unwrap()
}

#[test]
fn test_sma_flat_forecast_at_window_mean() {
    // Last 7 of 10 prices: 4..=10, mean 7
    let prices: Vec<f64> = (1..=10).map(|p| p as f64).collect();
    let series = series_from_prices(&prices);

    let result = SmaModel.produce(&series, 5, false).unwrap();
    assert_eq!(result.model_name, "SMA");
    assert_eq!(result.values.len(), 5);
    assert!(result.values.iter().all(|v| (*v - 7.0).abs() < 1e-10));
    assert!(!result.has_bounds());
}

#[test]
fn test_sma_constant_series() {
    let series = series_from_prices(&[50.0; 10]);
    let result = SmaModel.produce(&series, 5, true).unwrap();

    assert!(result.values.iter().all(|v| *v == 50.0));
    // Zero variance collapses the band onto the forecast
    assert_eq!(result.confidence_lower.unwrap(), vec![50.0; 5]);
    assert_eq!(result.confidence_upper.unwrap(), vec![50.0; 5]);
}

#[test]
fn test_wma_weights_recent_prices_higher() {
    let prices: Vec<f64> = (1..=10).map(|p| p as f64).collect();
    let series = series_from_prices(&prices);

    let sma = SmaModel.produce(&series, 1, false).unwrap();
    let wma = WmaModel.produce(&series, 1, false).unwrap();
    assert_eq!(wma.model_name, "WMA");
    assert!(wma.values[0] > sma.values[0]);
}

#[test]
fn test_wma_exact_weighting() {
    // Weights 1..=7 over prices 1..=7: sum(w*p) / 28 = 140 / 28 = 5
    let prices: Vec<f64> = (1..=7).map(|p| p as f64).collect();
    let series = series_from_prices(&prices);

    let result = WmaModel.produce(&series, 3, false).unwrap();
    assert!(result.values.iter().all(|v| (*v - 5.0).abs() < 1e-10));
}

#[test]
fn test_es_level_on_short_history() {
    // 10 points: below the seasonal threshold, flat at the smoothed level
    let series = series_from_prices(&[50.0; 10]);
    let result = EsModel::default().produce(&series, 4, false).unwrap();

    assert_eq!(result.model_name, "ES");
    assert!(result.values.iter().all(|v| (*v - 50.0).abs() < 1e-10));
}

#[test]
fn test_es_continues_weekly_pattern() {
    // Three exact weekly cycles: Mondays +7, Thursdays -7, flat otherwise
    let pattern = [7.0, 0.0, 0.0, -7.0, 0.0, 0.0, 0.0];
    let prices: Vec<f64> = (0..21).map(|i| 50.0 + pattern[i % 7]).collect();
    let series = series_from_prices(&prices);

    let result = EsModel::default().produce(&series, 7, false).unwrap();
    for (step, value) in result.values.iter().enumerate() {
        let expected = 50.0 + pattern[(21 + step) % 7];
        assert!(
            (value - expected).abs() < 1e-8,
            "step {}: {} != {}",
            step,
            value,
            expected
        );
    }
}

#[test]
fn test_es_rejects_invalid_alpha() {
    assert!(EsModel::new(0.0).is_err());
    assert!(EsModel::new(1.0).is_err());
    assert!(EsModel::new(0.5).is_ok());
}

#[test]
fn test_arima_constant_series_stays_flat() {
    let series = series_from_prices(&[50.0; 12]);
    let result = ArimaModel::default().produce(&series, 6, false).unwrap();

    assert_eq!(result.model_name, "ARIMA");
    assert!(result.values.iter().all(|v| (*v - 50.0).abs() < 1e-10));
}

#[test]
fn test_arima_bounds_use_price_deviation() {
    let prices = [
        50.0, 51.0, 49.5, 52.0, 50.5, 53.0, 51.5, 49.0, 52.5, 50.0, 53.5, 51.0,
    ];
    let series = series_from_prices(&prices);

    let result = ArimaModel::default().produce(&series, 3, true).unwrap();
    let lower = result.confidence_lower.as_ref().unwrap();
    let upper = result.confidence_upper.as_ref().unwrap();
    for i in 0..3 {
        assert!(lower[i] < result.values[i]);
        assert!(upper[i] > result.values[i]);
        // Band is symmetric around the forecast
        let mid = (lower[i] + upper[i]) / 2.0;
        assert!((mid - result.values[i]).abs() < 1e-10);
    }
}

#[test]
fn test_regression_extends_linear_demand() {
    // Quantity grows by 2 per day; the fit should extend the line
    let quantities: Vec<f64> = (0..14).map(|t| 100.0 + 2.0 * t as f64).collect();
    let series = series_from_quantities(&quantities);

    let result = RegressionModel.produce(&series, 3, false).unwrap();
    assert_eq!(result.model_name, "Regression");
    for (step, value) in result.values.iter().enumerate() {
        let expected = 100.0 + 2.0 * (14 + step) as f64;
        assert!(
            (value - expected).abs() < 1e-6,
            "step {}: {} != {}",
            step,
            value,
            expected
        );
    }
}

#[test]
fn test_regression_clamps_negative_predictions() {
    // Steeply falling demand runs the extension below zero
    let quantities: Vec<f64> = (0..10).map(|t| 100.0 - 9.9 * t as f64).collect();
    let series = series_from_quantities(&quantities);

    let result = RegressionModel.produce(&series, 6, true).unwrap();
    assert!(result.values.iter().all(|v| *v >= 0.0));
    assert_eq!(*result.values.last().unwrap(), 0.0);
    assert!(result
        .confidence_lower
        .unwrap()
        .iter()
        .all(|v| *v >= 0.0));
}

#[rstest]
#[case(ModelId::Sma, 6)]
#[case(ModelId::Wma, 6)]
#[case(ModelId::Es, 6)]
#[case(ModelId::Arima, 9)]
#[case(ModelId::Regression, 9)]
fn test_insufficient_history_is_a_validation_error(#[case] id: ModelId, #[case] days: usize) {
    let prices: Vec<f64> = (0..days).map(|i| 50.0 + i as f64).collect();
    let series = series_from_prices(&prices);

    let result = id.producer().produce(&series, 5, false);
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[rstest]
#[case("sma", Some(ModelId::Sma))]
#[case("SMA", Some(ModelId::Sma))]
#[case("Wma", Some(ModelId::Wma))]
#[case("es", Some(ModelId::Es))]
#[case("arima", Some(ModelId::Arima))]
#[case("regression", Some(ModelId::Regression))]
#[case("ensemble", None)]
#[case("doesnotexist", None)]
fn test_model_tag_parsing(#[case] tag: &str, #[case] expected: Option<ModelId>) {
    assert_eq!(ModelId::parse(tag), expected);
}

#[test]
fn test_canonical_order_matches_declaration() {
    let mut shuffled = vec![ModelId::Regression, ModelId::Es, ModelId::Sma];
    shuffled.sort();
    assert_eq!(shuffled, vec![ModelId::Sma, ModelId::Es, ModelId::Regression]);
}
