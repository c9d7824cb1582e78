//! Synthetic datasets for co2cast benchmarks.

use chrono::{NaiveDate, TimeDelta};
use co2cast_lib::{CO2_FIELD, Observation, SeriesStore};

/// Location name used by [`synthetic_store`].
pub const LOCATION: &str = "Bench Harbor";

/// Builds a store with `days` daily readings of one location.
///
/// Readings follow a slow upward trend with a yearly cycle and a short
/// deterministic wobble; every 17th day is missing.
#[must_use]
pub fn synthetic_store(days: usize) -> SeriesStore {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default();
    let rows = (0..days).map(|i| {
        let t = i as f64;
        let date = start + TimeDelta::days(i64::try_from(i).unwrap_or(i64::MAX));
        let value = 400.0
            + 0.005 * t
            + 6.0 * (2.0 * std::f64::consts::PI * t / 365.25).sin()
            + 0.8 * (t * 1.7).sin();
        let value = (i % 17 != 0).then_some(value);
        (LOCATION.to_string(), Observation::new(date, vec![value]))
    });
    SeriesStore::from_rows(vec![CO2_FIELD.to_string()], rows)
}
