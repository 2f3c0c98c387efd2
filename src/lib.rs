//! # AgriCast
//!
//! `agri_cast_workspace` ties together the agricultural demand forecasting
//! crates: [`demand_core`] for the domain data types, [`agri_math`] for the
//! numeric kernels and [`forecast_demand`] for the concurrent ensemble
//! forecast engine.
//!
//! ## Example
//!
//! ```no_run
//! use demand_core::utils::generate_demand_series;
//! use forecast_demand::{ForecastEngine, ForecastRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), forecast_demand::ForecastError> {
//! let series = generate_demand_series(30, 50.0, 120.0, 0.05);
//! let engine = ForecastEngine::with_defaults();
//! let outcome = engine
//!     .generate_forecast(&series, &ForecastRequest::default())
//!     .await?;
//! assert_eq!(outcome.forecast_data.len(), 7);
//! # Ok(())
//! # }
//! ```

pub use agri_math;
pub use demand_core;
pub use forecast_demand;
