//! Display utilities and output formatting for the co2cast CLI.

use anyhow::Result;
use clap::ValueEnum;
use co2cast_lib::prelude::*;
use co2cast_lib::Statistic;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for written data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) fn extension(self) -> &'static str {
        OutputFormat::from(self).extension()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

/// Write a forecast to a file in the specified format.
pub(crate) fn write_forecast(forecast: &ForecastResult, output: &Path, format: Format) -> Result<()> {
    let writer = BufWriter::new(File::create(output)?);
    OutputFormat::from(format).write_forecast(forecast, writer)?;
    Ok(())
}

/// Write a series to a file, or stdout when no path is given.
pub(crate) fn write_series(series: &Series, output: Option<&Path>, format: Format) -> Result<()> {
    let format = OutputFormat::from(format);
    match output {
        Some(path) => format.write_series(series, BufWriter::new(File::create(path)?))?,
        None => format.write_series(series, std::io::stdout())?,
    }
    Ok(())
}

/// Print a view as text.
pub(crate) fn print_view(view: &View) {
    println!("Location:     {}", view.location);
    println!("Granularity:  {}", view.granularity);
    println!("Latest:       {}", view.latest_reading);
    println!();

    print_summary(&view.summary);
    println!();

    match (&view.forecast, &view.error) {
        (Some(forecast), _) => {
            println!("Forecast ({} steps):", forecast.len());
            for point in &forecast.points {
                println!("  {}  {:>10.2}", point.date.format("%Y-%m-%d"), point.value);
            }
        }
        (None, Some(error)) => println!("Forecast unavailable ({}): {error}", error.kind()),
        (None, None) => println!("Not enough data to forecast"),
    }
}

/// Print a describe-style table, one column per field.
fn print_summary(summary: &SummaryResult) {
    if summary.is_empty() {
        println!("No numeric fields");
        return;
    }

    print!("{:<8}", "");
    for field in summary.iter() {
        print!(" {:>24}", field.field);
    }
    println!();

    for &statistic in Statistic::all() {
        print!("{:<8}", statistic.label());
        for field in summary.iter() {
            match field.get(statistic) {
                Some(value) => print!(" {value:>24.4}"),
                None => print!(" {:>24}", "NaN"),
            }
        }
        println!();
    }
}
