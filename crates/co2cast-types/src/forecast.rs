//! Forecast and latest-reading result types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Granularity, Series};

/// A single forecast value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Bucket label the forecast applies to.
    pub date: NaiveDate,
    /// Point forecast.
    pub value: f64,
}

impl ForecastPoint {
    /// Creates a new forecast point.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Point forecasts continuing a series bucket by bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Granularity of the forecast buckets.
    pub granularity: Granularity,
    /// Forecast points in date order.
    pub points: Vec<ForecastPoint>,
}

impl ForecastResult {
    /// Creates a new forecast result.
    #[must_use]
    pub const fn new(granularity: Granularity, points: Vec<ForecastPoint>) -> Self {
        Self {
            granularity,
            points,
        }
    }

    /// Returns the number of forecast steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no forecast points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the forecast values in date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Returns the forecast dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }
}

/// The most recent bucket of a resampled series.
///
/// Both parts are `None` when the series is empty. The value alone is `None`
/// when the latest bucket had no defined measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatestReading {
    /// Label of the latest bucket.
    pub date: Option<NaiveDate>,
    /// CO2 value of the latest bucket.
    #[serde(rename = "co2")]
    pub value: Option<f64>,
}

impl LatestReading {
    /// The "no data" reading.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            date: None,
            value: None,
        }
    }

    /// Returns the latest reading of `field` in a series.
    #[must_use]
    pub fn of(series: &Series, field: &str) -> Self {
        let Some(last) = series.last() else {
            return Self::none();
        };
        Self {
            date: Some(last.date),
            value: series.field_index(field).and_then(|i| last.value(i)),
        }
    }

    /// Returns true if the reading carries no date.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.date.is_none()
    }
}

impl std::fmt::Display for LatestReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.date, self.value) {
            (Some(date), Some(value)) => write!(f, "{} {value:.2} ppm", date.format("%Y-%m-%d")),
            (Some(date), None) => write!(f, "{} n/a", date.format("%Y-%m-%d")),
            (None, _) => write!(f, "no data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CO2_FIELD, Observation};

    fn date(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 1).unwrap()
    }

    #[test]
    fn test_latest_reading_of_empty_series() {
        let series = Series::empty("Nowhere", vec![CO2_FIELD.to_string()]);
        let reading = LatestReading::of(&series, CO2_FIELD);
        assert!(reading.is_none());
        assert!(reading.value.is_none());
        assert_eq!(reading.to_string(), "no data");
    }

    #[test]
    fn test_latest_reading_uses_last_bucket() {
        let series = Series::new(
            "Harbor",
            vec![CO2_FIELD.to_string()],
            vec![
                Observation::new(date(2), vec![Some(415.256)]),
                Observation::new(date(1), vec![Some(410.0)]),
            ],
        );
        let reading = LatestReading::of(&series, CO2_FIELD);
        assert_eq!(reading.date, Some(date(2)));
        assert_eq!(reading.to_string(), "2024-02-01 415.26 ppm");
    }

    #[test]
    fn test_latest_reading_serializes_as_co2() {
        let json = serde_json::to_string(&LatestReading::none()).unwrap();
        assert_eq!(json, r#"{"date":null,"co2":null}"#);
    }
}
