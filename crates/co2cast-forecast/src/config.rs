//! Forecaster configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of forecast steps.
pub const DEFAULT_HORIZON: usize = 30;

/// Default buckets per seasonal cycle.
pub const DEFAULT_SEASONAL_PERIOD: usize = 12;

/// Default wall-clock budget for one fit.
pub const DEFAULT_FIT_BUDGET: Duration = Duration::from_secs(5);

/// Settings of a forecaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of buckets to forecast.
    pub horizon: usize,
    /// Buckets per seasonal cycle.
    pub seasonal_period: usize,
    /// Wall-clock budget for fitting.
    pub fit_budget: Duration,
    /// Parameter search settings.
    pub optimizer: OptimizerConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            fit_budget: DEFAULT_FIT_BUDGET,
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Returns the config with a different horizon.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Returns the config with a different fit budget.
    #[must_use]
    pub const fn with_fit_budget(mut self, fit_budget: Duration) -> Self {
        self.fit_budget = fit_budget;
        self
    }
}

/// Stopping rules of the simplex search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Iteration limit; reaching it is a fit failure.
    pub max_iterations: usize,
    /// Absolute tolerance on the spread of objective values.
    pub ftol_abs: f64,
    /// Relative tolerance on the spread of objective values.
    pub ftol_rel: f64,
    /// Tolerance on the simplex diameter.
    pub xtol: f64,
    /// Edge length of the initial simplex.
    pub initial_step: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            ftol_abs: 1e-10,
            ftol_rel: 1e-8,
            xtol: 1e-6,
            initial_step: 0.5,
        }
    }
}
