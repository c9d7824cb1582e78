//! CSV dataset ingestion.

use std::path::Path;

use chrono::NaiveDate;
use co2cast_types::{CO2_FIELD, Co2castError, Observation, Result};
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::StreamExt;
use tokio::io::AsyncRead;
use tracing::{debug, info};

use crate::SeriesStore;

/// Column layout of the source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Column holding the survey date.
    pub timestamp_column: String,
    /// Column holding the location identifier.
    pub location_column: String,
    /// `chrono` format of the survey date.
    pub date_format: String,
    /// Columns to rename, as `(from, to)` pairs.
    pub renames: Vec<(String, String)>,
    /// Synthetic index columns left behind by earlier serialization.
    pub dropped_columns: Vec<String>,
    /// Columns parsed as numbers even if some cells are not numeric.
    ///
    /// Unparseable cells in these columns become missing values.
    pub coerced_columns: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "date_surveyed".to_string(),
            location_column: "Area_Surveyed".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            renames: vec![(
                "daily_co2_emmission_ppm_stationary".to_string(),
                CO2_FIELD.to_string(),
            )],
            dropped_columns: vec!["Unnamed: 0".to_string(), String::new()],
            coerced_columns: vec![CO2_FIELD.to_string()],
        }
    }
}

/// Loads a dataset from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or a survey date cannot be parsed.
pub async fn load_csv(path: impl AsRef<Path>, config: &IngestConfig) -> Result<SeriesStore> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    debug!(path = %path.display(), "Reading dataset");
    read_csv(file, config).await
}

/// Reads a dataset from any async CSV source.
///
/// A column is kept as a numeric field when every non-empty cell parses as a
/// number, or when it is listed in [`IngestConfig::coerced_columns`]. Other
/// columns are dropped.
///
/// # Errors
///
/// Returns an error if the input is not valid CSV, a required column is
/// missing, or a survey date cannot be parsed.
pub async fn read_csv<R>(reader: R, config: &IngestConfig) -> Result<SeriesStore>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .create_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .await
        .map_err(csv_error)?
        .iter()
        .map(|name| rename(name, config))
        .collect();

    let timestamp_idx = column_index(&headers, &config.timestamp_column)?;
    let location_idx = column_index(&headers, &config.location_column)?;

    let mut records: Vec<StringRecord> = Vec::new();
    let mut stream = reader.records();
    while let Some(record) = stream.next().await {
        records.push(record.map_err(csv_error)?);
    }

    let numeric: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, name)| {
            *idx != timestamp_idx
                && *idx != location_idx
                && !config.dropped_columns.contains(*name)
        })
        .filter(|(idx, name)| {
            let keep = config.coerced_columns.contains(*name)
                || records.iter().all(|r| is_numeric_cell(r.get(*idx)));
            if !keep {
                debug!(column = %name, "Dropping non-numeric column");
            }
            keep
        })
        .map(|(idx, name)| (idx, name.clone()))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    let mut undated = 0usize;
    for record in &records {
        let line = record.position().map_or(0, csv_async::Position::line);
        let raw_date = record.get(timestamp_idx).unwrap_or_default().trim();
        if raw_date.is_empty() {
            debug!(line, "Skipping row without survey date");
            undated += 1;
            continue;
        }
        let date = NaiveDate::parse_from_str(raw_date, &config.date_format).map_err(|_| {
            Co2castError::InvalidDate {
                line,
                value: raw_date.to_string(),
            }
        })?;
        let location = record.get(location_idx).unwrap_or_default().to_string();
        let values = numeric
            .iter()
            .map(|(idx, _)| parse_cell(record.get(*idx)))
            .collect();
        rows.push((location, Observation::new(date, values)));
    }

    let fields = numeric.into_iter().map(|(_, name)| name).collect();
    let store = SeriesStore::from_rows(fields, rows);
    info!(
        rows = store.len(),
        undated,
        locations = store.locations().len(),
        fields = ?store.fields(),
        "Loaded dataset"
    );
    Ok(store)
}

fn rename(name: &str, config: &IngestConfig) -> String {
    config
        .renames
        .iter()
        .find(|(from, _)| from == name)
        .map_or_else(|| name.to_string(), |(_, to)| to.clone())
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Co2castError::MissingColumn(name.to_string()))
}

fn is_numeric_cell(cell: Option<&str>) -> bool {
    cell.map(str::trim)
        .is_none_or(|c| c.is_empty() || c.parse::<f64>().is_ok())
}

fn parse_cell(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

fn csv_error(err: csv_async::Error) -> Co2castError {
    Co2castError::Csv(err.to_string())
}
