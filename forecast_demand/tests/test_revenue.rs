use chrono::{Duration, NaiveDate};
use demand_core::{DemandObservation, DemandSeries};
use forecast_demand::revenue::project_revenue;
use forecast_demand::ForecastDataPoint;
use pretty_assertions::assert_eq;

fn series_with_quantities(quantities: &[f64]) -> DemandSeries {
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

fn point(value: f64, lower: Option<f64>, upper: Option<f64>) -> ForecastDataPoint {
    ForecastDataPoint {
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        predicted_value: value,
        confidence_lower: lower,
        confidence_upper: upper,
        model_used: "SMA".to_string(),
    }
}

#[test]
fn test_projection_uses_historical_mean_quantity() {
    let series = series_with_quantities(&[100.0, 120.0, 140.0]);
    let points = vec![point(50.0, None, None), point(52.0, None, None)];

    let projection = project_revenue(&points, 55.0, &series);
    assert_eq!(projection.len(), 2);

    for row in &projection {
        assert_eq!(row.projected_quantity, 120.00);
        assert_eq!(row.selling_price, 55.00);
        assert_eq!(row.projected_revenue, 6600.00);
    }
}

#[test]
fn test_projection_scales_bounds_by_quantity() {
    let series = series_with_quantities(&[100.0, 100.0]);
    let points = vec![point(50.0, Some(45.0), Some(55.0))];

    let projection = project_revenue(&points, 60.0, &series);
    assert_eq!(projection[0].confidence_lower, Some(4500.00));
    assert_eq!(projection[0].confidence_upper, Some(5500.00));
}

#[test]
fn test_projection_keeps_point_dates() {
    let series = series_with_quantities(&[80.0]);
    let mut first = point(50.0, None, None);
    first.date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    let projection = project_revenue(&[first], 10.0, &series);
    assert_eq!(
        projection[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    );
    assert_eq!(projection[0].confidence_lower, None);
}

#[test]
fn test_empty_history_yields_empty_projection() {
    let empty = DemandSeries::new(Vec::new()).unwrap();
    let points = vec![point(50.0, None, None)];

    assert!(project_revenue(&points, 55.0, &empty).is_empty());
}

#[test]
fn test_no_points_yields_empty_projection() {
    let series = series_with_quantities(&[100.0]);
    assert!(project_revenue(&[], 55.0, &series).is_empty());
}
