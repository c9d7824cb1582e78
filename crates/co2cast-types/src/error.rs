//! Error types for co2cast.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for co2cast operations.
pub type Result<T> = std::result::Result<T, Co2castError>;

/// Errors that can occur while loading data or building forecasts.
#[derive(Error, Debug)]
pub enum Co2castError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required column is absent from the dataset header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A timestamp cell could not be parsed as a calendar date.
    #[error("Invalid date '{value}' on line {line}")]
    InvalidDate {
        /// Line number in the source file.
        line: u64,
        /// The offending cell content.
        value: String,
    },

    /// Too few resampled points to fit a forecast.
    #[error(
        "Not enough data for forecasting {location}: {points} points, need more than {required}"
    )]
    InsufficientData {
        /// The location that was requested.
        location: String,
        /// Number of resampled points available.
        points: usize,
        /// Point count that must be exceeded.
        required: usize,
    },

    /// Model fitting failed.
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// The process-wide dataset was installed twice.
    #[error("Dataset already loaded")]
    AlreadyLoaded,
}

/// Errors raised by the forecaster.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The series has zero variance, so the error variance cannot be estimated.
    #[error("Degenerate series: zero variance makes the model fit ill-posed")]
    Degenerate,

    /// Fewer observations than the model needs.
    #[error("Need at least {required} observations to fit, got {actual}")]
    TooShort {
        /// Minimum observations needed.
        required: usize,
        /// Observations supplied.
        actual: usize,
    },

    /// The fitted model produced non-finite states or forecasts.
    #[error("Model produced non-finite values")]
    NonFinite,

    /// The optimizer exhausted its iteration limit.
    #[error("Optimizer did not converge after {iterations} iterations")]
    NonConvergence {
        /// Iterations performed.
        iterations: usize,
    },

    /// Fitting ran past its wall-clock budget.
    #[error("Model fitting exceeded its {budget:?} budget")]
    FittingTimeout {
        /// The budget that was exceeded.
        budget: Duration,
    },
}

impl ForecastError {
    /// Returns the error kind reported to callers.
    #[must_use]
    pub const fn kind(&self) -> ForecastErrorKind {
        match self {
            Self::FittingTimeout { .. } => ForecastErrorKind::FittingTimeout,
            Self::Degenerate
            | Self::TooShort { .. }
            | Self::NonFinite
            | Self::NonConvergence { .. } => ForecastErrorKind::ModelFitFailure,
        }
    }
}

/// Coarse classification of forecaster failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastErrorKind {
    /// The model did not converge or was given degenerate input.
    ModelFitFailure,
    /// Fitting exceeded its time budget.
    FittingTimeout,
}

impl ForecastErrorKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ModelFitFailure => "model_fit_failure",
            Self::FittingTimeout => "fitting_timeout",
        }
    }
}

impl std::fmt::Display for ForecastErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
