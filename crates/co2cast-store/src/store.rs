//! Location-indexed dataset store.

use std::collections::HashMap;
use std::sync::OnceLock;

use co2cast_types::{Co2castError, Observation, Result, Series};

/// Process-wide dataset instance.
static STORE: OnceLock<SeriesStore> = OnceLock::new();

/// The full measurement dataset, indexed by location.
///
/// A store is built once, then installed with [`SeriesStore::install`] and
/// shared read-only; lookups never mutate it, so any number of threads may
/// query it concurrently.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    fields: Vec<String>,
    /// Locations in order of first appearance.
    locations: Vec<String>,
    rows: HashMap<String, Vec<Observation>>,
}

impl SeriesStore {
    /// Builds a store from `(location, observation)` rows.
    ///
    /// Each observation's values are padded or truncated to the field count.
    /// Rows of a location are ordered by date, keeping input order for
    /// duplicate dates.
    #[must_use]
    pub fn from_rows(
        fields: Vec<String>,
        rows: impl IntoIterator<Item = (String, Observation)>,
    ) -> Self {
        let mut locations = Vec::new();
        let mut by_location: HashMap<String, Vec<Observation>> = HashMap::new();

        for (location, mut observation) in rows {
            observation.values.resize(fields.len(), None);
            by_location
                .entry(location)
                .or_insert_with_key(|key| {
                    locations.push(key.clone());
                    Vec::new()
                })
                .push(observation);
        }

        for observations in by_location.values_mut() {
            observations.sort_by_key(|obs| obs.date);
        }

        Self {
            fields,
            locations,
            rows: by_location,
        }
    }

    /// Installs this store as the process-wide dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Co2castError::AlreadyLoaded`] if a dataset was installed before.
    pub fn install(self) -> Result<&'static Self> {
        STORE.set(self).map_err(|_| Co2castError::AlreadyLoaded)?;
        STORE.get().ok_or(Co2castError::AlreadyLoaded)
    }

    /// Returns the process-wide dataset, if one was installed.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        STORE.get()
    }

    /// Returns the rows of a location as a series.
    ///
    /// An unknown location yields an empty series rather than an error, so
    /// callers treat it like a location without data.
    #[must_use]
    pub fn get_series(&self, location: &str) -> Series {
        self.rows.get(location).map_or_else(
            || Series::empty(location, self.fields.clone()),
            |observations| Series::new(location, self.fields.clone(), observations.clone()),
        )
    }

    /// Returns true if the location has rows in the dataset.
    #[must_use]
    pub fn contains(&self, location: &str) -> bool {
        self.rows.contains_key(location)
    }

    /// Returns the numeric field names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the locations in order of first appearance.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Returns the number of rows stored for a location.
    #[must_use]
    pub fn row_count(&self, location: &str) -> usize {
        self.rows.get(location).map_or(0, Vec::len)
    }

    /// Returns the total number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    /// Returns true if the store holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use co2cast_types::CO2_FIELD;

    fn row(location: &str, day: u32, value: f64) -> (String, Observation) {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        (location.to_string(), Observation::new(date, vec![Some(value)]))
    }

    fn create_test_store() -> SeriesStore {
        SeriesStore::from_rows(
            vec![CO2_FIELD.to_string()],
            vec![
                row("Harbor", 3, 3.0),
                row("Airport", 1, 10.0),
                row("Harbor", 1, 1.0),
                row("Harbor", 2, 2.0),
            ],
        )
    }

    #[test]
    fn test_get_series_sorted() {
        let store = create_test_store();
        let series = store.get_series("Harbor");

        assert_eq!(series.len(), 3);
        let values: Vec<_> = series.column(CO2_FIELD).flatten().collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_unknown_location_is_empty() {
        let store = create_test_store();
        let series = store.get_series("Nowhere");

        assert!(series.is_empty());
        assert_eq!(series.location(), "Nowhere");
        assert_eq!(series.fields(), store.fields());
        assert!(!store.contains("Nowhere"));
    }

    #[test]
    fn test_locations_in_first_appearance_order() {
        let store = create_test_store();
        assert_eq!(store.locations(), ["Harbor", "Airport"]);
        assert_eq!(store.row_count("Harbor"), 3);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_values_padded_to_field_count() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let store = SeriesStore::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![("Harbor".to_string(), Observation::new(date, vec![Some(1.0)]))],
        );
        let series = store.get_series("Harbor");
        assert_eq!(series.observations()[0].values, vec![Some(1.0), None]);
    }
}
