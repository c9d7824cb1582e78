//! Resample, summarize and forecast pipeline for co2cast.
//!
//! - [`Pipeline`] - Builds views and downloadable forecasts for a location
//! - [`PipelineConfig`] - Horizon, seasonality, data threshold and fit budget
//! - [`View`] / [`ViewState`] - The assembled result of one request

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pipeline;
mod view;

pub use config::PipelineConfig;
pub use pipeline::{Pipeline, latest_reading};
pub use view::{View, ViewState};
