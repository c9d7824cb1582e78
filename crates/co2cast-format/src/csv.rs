//! CSV output format.

use co2cast_types::{ForecastResult, Series};
use std::borrow::Cow;
use std::io::Write;

use crate::{FormatError, Formatter};

/// Date format of every date column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

/// Quotes a header cell that would otherwise break the column layout.
fn quote(field: &str, delimiter: char) -> Cow<'_, str> {
    if field.contains([delimiter, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

impl Formatter for CsvFormatter {
    fn write_forecast<W: Write + Send>(
        &self,
        forecast: &ForecastResult,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "Date{d}Forecast")?;
        }

        for point in &forecast.points {
            writeln!(writer, "{}{d}{}", point.date.format(DATE_FORMAT), point.value)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &Series,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            write!(writer, "date")?;
            for field in series.fields() {
                write!(writer, "{d}{}", quote(field, d))?;
            }
            writeln!(writer)?;
        }

        for observation in series.observations() {
            write!(writer, "{}", observation.date.format(DATE_FORMAT))?;
            for value in &observation.values {
                match value {
                    Some(v) => write!(writer, "{d}{v}")?,
                    None => write!(writer, "{d}")?,
                }
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
