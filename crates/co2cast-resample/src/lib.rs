//! Calendar resampling for co2cast.
//!
//! This crate turns irregular per-location series into one row per calendar
//! bucket:
//!
//! - [`Resampler`] - Streaming bucket aggregator
//! - [`resample`] - Resamples a whole series in one call

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod resampler;

pub use resampler::{Resampler, resample};
