//! # Forecast Demand
//!
//! A Rust library for agricultural commodity demand forecasting with
//! concurrently dispatched ensemble models.
//!
//! ## Features
//!
//! - Demand series handling (daily quantity/price observations with an
//!   optional NDVI vegetation signal)
//! - Forecasting producers (simple and weighted moving averages,
//!   exponential smoothing with weekly seasonality, an autoregressive
//!   model, a learned regression over calendar and NDVI features)
//! - Concurrent dispatch on a bounded worker pool with per-model timeouts
//!   and failure isolation
//! - Ensemble combination with a degenerate fallback when every model fails
//! - Derived artifacts: confidence score, revenue projection, Markdown
//!   summary and a composable report
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_core::{utils::generate_demand_series, Scenario};
//! use forecast_demand::{ForecastEngine, ForecastRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), forecast_demand::ForecastError> {
//! let series = generate_demand_series(60, 50.0, 120.0, 0.05);
//! let engine = ForecastEngine::with_defaults();
//!
//! let request = ForecastRequest {
//!     models: vec!["sma".into(), "es".into(), "ensemble".into()],
//!     horizon: 14,
//!     want_confidence: true,
//!     scenario: Scenario::Realistic,
//! };
//!
//! let outcome = engine.generate_forecast(&series, &request).await?;
//! println!("models used: {:?}", outcome.models_used);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod report;
pub mod revenue;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use crate::config::EngineConfig;
pub use crate::data::DataLoader;
pub use crate::engine::{
    ForecastDataPoint, ForecastEngine, ForecastOutcome, ForecastRequest,
};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{DemandModel, ForecastResult, ModelId};
pub use crate::report::{compose_report, ForecastReport, ReportRequest};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
