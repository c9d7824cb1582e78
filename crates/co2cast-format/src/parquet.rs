//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use co2cast_types::{ForecastResult, Series};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for forecasts.
    fn forecast_schema() -> Schema {
        Schema::new(vec![
            Field::new("date", DataType::Date32, false),
            Field::new("forecast", DataType::Float64, false),
        ])
    }

    /// Creates the Arrow schema for a series with the given fields.
    fn series_schema(fields: &[String]) -> Schema {
        let mut columns = vec![Field::new("date", DataType::Date32, false)];
        columns.extend(
            fields
                .iter()
                .map(|name| Field::new(name, DataType::Float64, true)),
        );
        Schema::new(columns)
    }

    fn write_batch<W: Write + Send>(
        &self,
        schema: Arc<Schema>,
        columns: Vec<ArrayRef>,
        writer: W,
    ) -> Result<(), FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let batch = RecordBatch::try_new(Arc::clone(&schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;
        arrow_writer
            .write(&batch)
            .map_err(|e| FormatError::Parquet(e.to_string()))?;
        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}

fn date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

impl Formatter for ParquetFormatter {
    fn write_forecast<W: Write + Send>(
        &self,
        forecast: &ForecastResult,
        writer: W,
    ) -> Result<(), FormatError> {
        let dates: Vec<_> = forecast.dates().map(date32).collect();
        let values: Vec<_> = forecast.values().collect();

        self.write_batch(
            Arc::new(Self::forecast_schema()),
            vec![
                Arc::new(Date32Array::from(dates)),
                Arc::new(Float64Array::from(values)),
            ],
            writer,
        )
    }

    fn write_series<W: Write + Send>(&self, series: &Series, writer: W) -> Result<(), FormatError> {
        let dates: Vec<_> = series.dates().map(date32).collect();
        let mut columns: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(dates))];
        for field in series.fields() {
            let values: Vec<Option<f64>> = series.column(field).collect();
            columns.push(Arc::new(Float64Array::from(values)));
        }

        self.write_batch(Arc::new(Self::series_schema(series.fields())), columns, writer)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use co2cast_types::{CO2_FIELD, ForecastPoint, Granularity, Observation};
    use std::io::Cursor;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_parquet_forecast() {
        let forecast = ForecastResult::new(
            Granularity::Monthly,
            vec![ForecastPoint::new(date(1, 31), 415.25)],
        );
        let mut output = Cursor::new(Vec::new());

        ParquetFormatter::new()
            .write_forecast(&forecast, &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_parquet_series_with_nulls() {
        let series = Series::new(
            "Harbor",
            vec![CO2_FIELD.to_string()],
            vec![
                Observation::new(date(1, 31), vec![Some(410.0)]),
                Observation::new(date(2, 29), vec![None]),
            ],
        );
        let mut output = Cursor::new(Vec::new());

        ParquetFormatter::new()
            .write_series(&series, &mut output)
            .unwrap();
        assert_eq!(&output.into_inner()[0..4], b"PAR1");
    }

    #[test]
    fn test_series_schema() {
        let schema = ParquetFormatter::series_schema(&[CO2_FIELD.to_string()]);
        assert_eq!(schema.fields().len(), 2);
        assert!(schema.field_with_name(CO2_FIELD).unwrap().is_nullable());
        assert!(!schema.field_with_name("date").unwrap().is_nullable());
    }

    #[test]
    fn test_date32_epoch() {
        assert_eq!(date32(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(date32(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
    }
}
