//! Descriptive statistics for co2cast emission series.
//!
//! - [`summarize`] - Statistics of every numeric field of a series
//! - [`describe`] - Statistics of a slice of values
//! - [`quantile`] - Linear-interpolation quantile of sorted values

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod summary;

pub use summary::{describe, quantile, summarize};
