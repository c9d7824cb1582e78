//! In-memory emission dataset store for co2cast.
//!
//! - [`SeriesStore`] - Immutable dataset indexed by survey location
//! - [`IngestConfig`] - Column layout of the source CSV
//! - [`load_csv`] / [`read_csv`] - Build a store from CSV input
//!
//! # Example
//!
//! ```no_run
//! use co2cast_store::{IngestConfig, load_csv};
//!
//! # async fn run() -> co2cast_types::Result<()> {
//! let store = load_csv("stationary_df.csv", &IngestConfig::default()).await?;
//! let store = store.install()?;
//! let series = store.get_series("Lagos Harbor");
//! println!("{} rows", series.len());
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ingest;
mod store;

pub use ingest::{IngestConfig, load_csv, read_csv};
pub use store::SeriesStore;
