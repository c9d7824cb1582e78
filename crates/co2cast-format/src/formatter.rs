//! Output format abstraction.

use co2cast_types::{ForecastResult, Series};
use std::io::Write;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter};

/// Default file name of a downloaded forecast.
pub const FORECAST_FILE_NAME: &str = "forecasted_data.csv";

/// Output format identifier.
///
/// Dispatches to the matching [`Formatter`] so callers can pick a format at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson, Self::Parquet]
    }

    /// Writes a forecast in this format.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Unsupported`] for Parquet when the `parquet`
    /// feature is disabled, or the formatter's error.
    pub fn write_forecast<W: Write + Send>(
        self,
        forecast: &ForecastResult,
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_forecast(forecast, writer),
            Self::Json => JsonFormatter::new().write_forecast(forecast, writer),
            Self::Ndjson => JsonFormatter::ndjson().write_forecast(forecast, writer),
            #[cfg(feature = "parquet")]
            Self::Parquet => crate::ParquetFormatter::new().write_forecast(forecast, writer),
            #[cfg(not(feature = "parquet"))]
            Self::Parquet => Err(FormatError::Unsupported(self)),
        }
    }

    /// Writes the rows of a series in this format.
    ///
    /// # Errors
    ///
    /// Same as [`OutputFormat::write_forecast`].
    pub fn write_series<W: Write + Send>(self, series: &Series, writer: W) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_series(series, writer),
            Self::Json => JsonFormatter::new().write_series(series, writer),
            Self::Ndjson => JsonFormatter::ndjson().write_series(series, writer),
            #[cfg(feature = "parquet")]
            Self::Parquet => crate::ParquetFormatter::new().write_series(series, writer),
            #[cfg(not(feature = "parquet"))]
            Self::Parquet => Err(FormatError::Unsupported(self)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Format not compiled into this build.
    #[error("{0} support not compiled in")]
    Unsupported(OutputFormat),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes forecast points to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_forecast<W: Write + Send>(
        &self,
        forecast: &ForecastResult,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes the observations of a series to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_series<W: Write + Send>(&self, series: &Series, writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
