//! Engine configuration and service-wide limits

use std::time::Duration;

/// Largest accepted forecast horizon, in days
pub const MAX_FORECAST_DAYS: usize = 365;

/// Minimum number of historical observations the engine accepts
pub const MIN_HISTORY_POINTS: usize = 3;

/// Configuration for the forecast engine's worker pool.
///
/// The pool is created once with the engine and shared across all
/// orchestration calls for the life of the process; its size is a fixed
/// constant, independent of how many models a request asks for.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of model tasks allowed to run concurrently
    pub worker_pool_size: usize,
    /// Upper bound on a single model task's run time
    pub model_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_pool_size: 4,
            model_timeout: Duration::from_secs(30),
        }
    }
}
