//! Pipeline configuration.

use std::time::Duration;

use co2cast_forecast::{
    DEFAULT_FIT_BUDGET, DEFAULT_HORIZON, DEFAULT_SEASONAL_PERIOD, ForecastConfig,
};
use co2cast_types::Granularity;
use serde::{Deserialize, Serialize};

/// Settings shared by every request of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of buckets to forecast.
    pub horizon: usize,
    /// Buckets per seasonal cycle.
    pub seasonal_period: usize,
    /// A series needs strictly more resampled points than this to be forecast.
    pub min_points: usize,
    /// Wall-clock budget for one model fit.
    pub fit_budget: Duration,
    /// Granularity of downloadable forecasts.
    pub download_granularity: Granularity,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            min_points: 12,
            fit_budget: DEFAULT_FIT_BUDGET,
            download_granularity: Granularity::Monthly,
        }
    }
}

impl PipelineConfig {
    /// Returns the forecaster settings derived from this config.
    #[must_use]
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            horizon: self.horizon,
            seasonal_period: self.seasonal_period,
            fit_budget: self.fit_budget,
            ..ForecastConfig::default()
        }
    }
}
