//! Assembled view of one location.

use co2cast_types::{ForecastError, ForecastResult, Granularity, LatestReading, SummaryResult};
use serde::{Serialize, Serializer};

/// How much of a view could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Too few resampled points; no forecast was attempted.
    Insufficient,
    /// Summary without a forecast attempt.
    ///
    /// Reserved: the current data policy never produces it.
    SummaryOnly,
    /// Enough points; summary computed and forecast attempted.
    Full,
}

impl ViewState {
    /// Returns the state as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insufficient => "insufficient",
            Self::SummaryOnly => "summary_only",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of one location/granularity request.
///
/// In the [`ViewState::Full`] state exactly one of `forecast` and `error` is
/// set. Otherwise both are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// Requested location.
    pub location: String,
    /// Requested granularity.
    pub granularity: Granularity,
    /// How much of the view was computed.
    pub state: ViewState,
    /// Most recent bucket of the resampled series.
    pub latest_reading: LatestReading,
    /// Statistics of the resampled series.
    pub summary: SummaryResult,
    /// Forecast continuation, when fitting succeeded.
    pub forecast: Option<ForecastResult>,
    /// Forecaster failure, when fitting failed.
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ForecastError>,
}

impl View {
    /// Returns true if a forecast is present.
    #[must_use]
    pub const fn has_forecast(&self) -> bool {
        self.forecast.is_some()
    }
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    kind: &'a str,
    message: String,
}

fn serialize_error<S: Serializer>(
    error: &Option<ForecastError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    error
        .as_ref()
        .map(|e| ErrorReport {
            kind: e.kind().as_str(),
            message: e.to_string(),
        })
        .serialize(serializer)
}
