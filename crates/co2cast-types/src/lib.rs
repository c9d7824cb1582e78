//! Core types for the co2cast emission forecasting pipeline.
//!
//! This crate provides the data structures shared across co2cast:
//!
//! - [`Observation`] - A dated row of numeric measurements
//! - [`Series`] - Date-ordered observations of one survey location
//! - [`Granularity`] - Calendar bucket width used for resampling
//! - [`SummaryResult`] - Descriptive statistics per numeric field
//! - [`ForecastResult`] - Dated point forecasts
//! - [`LatestReading`] - Most recent bucket value of a series

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod forecast;
mod granularity;
mod series;
mod summary;

pub use error::{Co2castError, ForecastError, ForecastErrorKind, Result};
pub use forecast::{ForecastPoint, ForecastResult, LatestReading};
pub use granularity::{Granularity, GranularityParseError};
pub use series::{CO2_FIELD, Observation, Series};
pub use summary::{FieldSummary, Statistic, SummaryResult};
