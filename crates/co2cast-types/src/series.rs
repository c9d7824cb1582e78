//! Per-location observation series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name of the CO2 emission field that is forecast.
pub const CO2_FIELD: &str = "daily_co2_emmission_ppm";

/// A dated row of numeric measurements.
///
/// Values are positional and line up with the owning series' field list.
/// `None` marks a missing measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Measurement values, one per field.
    pub values: Vec<Option<f64>>,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(date: NaiveDate, values: Vec<Option<f64>>) -> Self {
        Self { date, values }
    }

    /// Returns the value at the given field position, if defined.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// Observations of a single location, ordered by date.
///
/// Dates may repeat in a raw series; after resampling every date is a unique
/// bucket label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    location: String,
    fields: Vec<String>,
    observations: Vec<Observation>,
}

impl Series {
    /// Creates a series, sorting observations by date.
    ///
    /// The sort is stable, so rows sharing a date keep their input order.
    #[must_use]
    pub fn new(
        location: impl Into<String>,
        fields: Vec<String>,
        mut observations: Vec<Observation>,
    ) -> Self {
        observations.sort_by_key(|obs| obs.date);
        Self {
            location: location.into(),
            fields,
            observations,
        }
    }

    /// Creates a series without any observations.
    #[must_use]
    pub fn empty(location: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            location: location.into(),
            fields,
            observations: Vec::new(),
        }
    }

    /// Returns the location identifier.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the numeric field names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the position of a field, if present.
    #[must_use]
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Returns the observations in date order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Returns an iterator over the observation dates.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|obs| obs.date)
    }

    /// Returns the column of a field, including missing values.
    ///
    /// Yields nothing when the field does not exist.
    pub fn column(&self, field: &str) -> impl Iterator<Item = Option<f64>> + '_ {
        let index = self.field_index(field);
        self.observations
            .iter()
            .filter(move |_| index.is_some())
            .map(move |obs| index.and_then(|i| obs.value(i)))
    }

    /// Returns the defined `(date, value)` pairs of a field.
    ///
    /// Missing values are dropped, closing any gaps in the timeline.
    #[must_use]
    pub fn defined(&self, field: &str) -> Vec<(NaiveDate, f64)> {
        let Some(index) = self.field_index(field) else {
            return Vec::new();
        };
        self.observations
            .iter()
            .filter_map(|obs| obs.value(index).map(|v| (obs.date, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn fields() -> Vec<String> {
        vec![CO2_FIELD.to_string(), "temperature".to_string()]
    }

    #[test]
    fn test_new_sorts_by_date() {
        let series = Series::new(
            "Harbor",
            fields(),
            vec![
                Observation::new(date(3), vec![Some(3.0), None]),
                Observation::new(date(1), vec![Some(1.0), Some(20.0)]),
            ],
        );

        let dates: Vec<_> = series.dates().collect();
        assert_eq!(dates, vec![date(1), date(3)]);
        assert_eq!(series.location(), "Harbor");
    }

    #[test]
    fn test_column_and_defined() {
        let series = Series::new(
            "Harbor",
            fields(),
            vec![
                Observation::new(date(1), vec![Some(1.0), Some(20.0)]),
                Observation::new(date(2), vec![None, Some(21.0)]),
                Observation::new(date(3), vec![Some(3.0), None]),
            ],
        );

        let column: Vec<_> = series.column(CO2_FIELD).collect();
        assert_eq!(column, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(
            series.defined(CO2_FIELD),
            vec![(date(1), 1.0), (date(3), 3.0)]
        );
        assert_eq!(series.column("missing").count(), 0);
        assert!(series.defined("missing").is_empty());
    }

    #[test]
    fn test_empty_series() {
        let series = Series::empty("Nowhere", fields());
        assert!(series.is_empty());
        assert!(series.last().is_none());
        assert_eq!(series.fields().len(), 2);
    }
}
