//! Seasonal exponential smoothing forecasts for co2cast.
//!
//! - [`Forecaster`] - Fits ETS(A,A,A) to a series and extends it
//! - [`FittedEts`] - A fitted model with diagnostics
//! - [`Optimizer`] / [`NelderMead`] - Parameter search
//! - [`ForecastConfig`] / [`OptimizerConfig`] - Tuning knobs

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod ets;
mod forecaster;
mod init;
mod optimizer;

pub use config::{
    DEFAULT_FIT_BUDGET, DEFAULT_HORIZON, DEFAULT_SEASONAL_PERIOD, ForecastConfig, OptimizerConfig,
};
pub use ets::{EtsParams, EtsStates, FittedEts};
pub use forecaster::Forecaster;
pub use init::initial_states;
pub use optimizer::{Deadline, Minimum, NelderMead, Optimizer};
