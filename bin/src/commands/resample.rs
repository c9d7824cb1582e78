//! Resample command implementation.

use anyhow::Result;
use co2cast_lib::prelude::*;
use std::path::{Path, PathBuf};

use super::load_store;
use crate::display::{Format, write_series};

/// Writes the resampled series of a location to a file or stdout.
pub(crate) async fn resample(
    data: &Path,
    location: &str,
    granularity: Granularity,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let store = load_store(data, quiet).await?;
    let series = Pipeline::new(store).resampled(location, granularity);

    if series.is_empty() {
        tracing::warn!(location, "No data for location");
    }

    write_series(&series, output.as_deref(), format)?;

    if let Some(output) = output.filter(|_| !quiet) {
        println!("Output written to: {}", output.display());
    }

    Ok(())
}
