//! CO2 emission resampling, statistics and seasonal forecasting.
//!
//! This is a facade crate that re-exports functionality from the co2cast
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use co2cast_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let store = load_csv("stationary_df.csv", &IngestConfig::default()).await?;
//!     let store = store.install()?;
//!
//!     let pipeline = Pipeline::new(store);
//!     let view = pipeline.build_view("Lagos Harbor", Granularity::Monthly);
//!     println!("latest: {}", view.latest_reading);
//!
//!     let forecast = pipeline.build_downloadable_forecast("Lagos Harbor")?;
//!     CsvFormatter::new().write_forecast(&forecast, std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use co2cast_types::*;

// Re-export dataset loading
pub use co2cast_store::{IngestConfig, SeriesStore, load_csv, read_csv};

// Re-export the processing stages
pub use co2cast_forecast::{
    Deadline, EtsParams, EtsStates, FittedEts, ForecastConfig, Forecaster, Minimum, NelderMead,
    Optimizer, OptimizerConfig,
};
pub use co2cast_resample::{Resampler, resample};
pub use co2cast_stats::{describe, quantile, summarize};

// Re-export orchestration
pub use co2cast_pipeline::{Pipeline, PipelineConfig, View, ViewState, latest_reading};

// Re-export formatters
#[cfg(feature = "format")]
pub use co2cast_format::{
    CsvFormatter, FORECAST_FILE_NAME, FormatError, Formatter, JsonFormatter, JsonStyle,
    OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use co2cast_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use co2cast_lib::prelude::*;
/// ```
pub mod prelude {
    pub use co2cast_types::{
        CO2_FIELD, Co2castError, ForecastError, ForecastErrorKind, ForecastPoint, ForecastResult,
        Granularity, LatestReading, Observation, Result, Series, SummaryResult,
    };

    pub use co2cast_store::{IngestConfig, SeriesStore, load_csv};

    pub use co2cast_forecast::{ForecastConfig, Forecaster};
    pub use co2cast_resample::resample;
    pub use co2cast_stats::summarize;

    pub use co2cast_pipeline::{Pipeline, PipelineConfig, View, ViewState};

    #[cfg(feature = "format")]
    pub use co2cast_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use co2cast_format::ParquetFormatter;
}
