//! JSON output format.

use co2cast_types::{ForecastResult, Observation, Series};
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_records<W, T>(&self, records: &[T], mut writer: W) -> Result<(), FormatError>
    where
        W: Write,
        T: serde::Serialize,
    {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, records)?;
                } else {
                    serde_json::to_writer(&mut writer, records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// Flattens an observation into a `{date, <field>...}` object.
fn observation_record(fields: &[String], observation: &Observation) -> Map<String, Value> {
    let mut record = Map::with_capacity(fields.len() + 1);
    record.insert(
        "date".to_string(),
        Value::String(observation.date.format("%Y-%m-%d").to_string()),
    );
    for (i, field) in fields.iter().enumerate() {
        record.insert(field.clone(), Value::from(observation.value(i)));
    }
    record
}

impl Formatter for JsonFormatter {
    fn write_forecast<W: Write + Send>(
        &self,
        forecast: &ForecastResult,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(&forecast.points, writer)
    }

    fn write_series<W: Write + Send>(&self, series: &Series, writer: W) -> Result<(), FormatError> {
        let records: Vec<_> = series
            .observations()
            .iter()
            .map(|obs| observation_record(series.fields(), obs))
            .collect();
        self.write_records(&records, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
