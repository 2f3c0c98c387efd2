//! Demand series loading from tabular data

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use demand_core::{DemandObservation, DemandSeries};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Date format accepted in text columns
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loader turning CSV files or DataFrames into demand series.
///
/// Columns are detected by name: a date column (`date`, `time`,
/// `timestamp`), a quantity column (`quantity`, `demand`, `qty`), a price
/// column (`price`) and an optional NDVI column (`ndvi`).
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a demand series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<DemandSeries> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Build a demand series from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<DemandSeries> {
        let date_column = Self::detect_column(&df, &["date", "time", "timestamp"])
            .ok_or_else(|| ForecastError::DataError("No date column found in data".to_string()))?;
        let quantity_column = Self::detect_column(&df, &["quantity", "demand", "qty"])
            .ok_or_else(|| {
                ForecastError::DataError("No quantity column found in data".to_string())
            })?;
        let price_column = Self::detect_column(&df, &["price"])
            .ok_or_else(|| ForecastError::DataError("No price column found in data".to_string()))?;
        let ndvi_column = Self::detect_column(&df, &["ndvi"]);

        let dates = Self::column_as_dates(&df, &date_column)?;
        let quantities = Self::column_as_required_f64(&df, &quantity_column)?;
        let prices = Self::column_as_required_f64(&df, &price_column)?;
        let ndvi = match &ndvi_column {
            Some(name) => Self::column_as_optional_f64(&df, name)?,
            None => vec![None; dates.len()],
        };

        if dates.len() != quantities.len() || dates.len() != prices.len() {
            return Err(ForecastError::DataError(
                "Date, quantity and price columns differ in length".to_string(),
            ));
        }

        let observations = dates
            .into_iter()
            .zip(quantities)
            .zip(prices)
            .zip(ndvi)
            .map(|(((date, quantity), price), ndvi)| DemandObservation {
                date,
                quantity,
                price,
                ndvi,
            })
            .collect();

        Ok(DemandSeries::new(observations)?)
    }

    /// First column whose lowercase name contains any of the keys
    fn detect_column(df: &DataFrame, keys: &[&str]) -> Option<String> {
        df.get_column_names().iter().find_map(|name| {
            let lower = name.to_lowercase();
            keys.iter()
                .any(|key| lower.contains(key))
                .then(|| name.to_string())
        })
    }

    /// Read a column of calendar dates, accepting text, date and datetime
    /// representations
    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column_name).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", column_name, e))
        })?;

        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .map(|value| {
                    let text = value.ok_or_else(|| {
                        ForecastError::DataError(format!(
                            "Column '{}' contains a missing date",
                            column_name
                        ))
                    })?;
                    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
                        ForecastError::DataError(format!(
                            "Cannot parse date '{}' in column '{}': {}",
                            text, column_name, e
                        ))
                    })
                })
                .collect(),
            DataType::Date => col
                .date()?
                .into_iter()
                .map(|value| {
                    let days = value.ok_or_else(|| {
                        ForecastError::DataError(format!(
                            "Column '{}' contains a missing date",
                            column_name
                        ))
                    })?;
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .and_then(|epoch| {
                            epoch.checked_add_signed(chrono::Duration::days(days as i64))
                        })
                        .ok_or_else(|| {
                            ForecastError::DataError(format!(
                                "Date value {} in column '{}' is out of range",
                                days, column_name
                            ))
                        })
                })
                .collect(),
            other => Err(ForecastError::DataError(format!(
                "Column '{}' has unsupported date type {:?}",
                column_name, other
            ))),
        }
    }

    /// Read a numeric column, rejecting missing values
    fn column_as_required_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
        Self::column_as_optional_f64(df, column_name)?
            .into_iter()
            .map(|value| {
                value.ok_or_else(|| {
                    ForecastError::DataError(format!(
                        "Column '{}' contains missing values",
                        column_name
                    ))
                })
            })
            .collect()
    }

    /// Read a numeric column, preserving missing values
    fn column_as_optional_f64(df: &DataFrame, column_name: &str) -> Result<Vec<Option<f64>>> {
        let col = df.column(column_name).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", column_name, e))
        })?;

        match col.dtype() {
            DataType::Float64 => Ok(col.f64()?.into_iter().collect()),
            DataType::Float32 => Ok(col
                .f32()?
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::Int64 => Ok(col
                .i64()?
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::Int32 => Ok(col
                .i32()?
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            other => Err(ForecastError::DataError(format!(
                "Column '{}' cannot be converted to f64 from {:?}",
                column_name, other
            ))),
        }
    }
}
