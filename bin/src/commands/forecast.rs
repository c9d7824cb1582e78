//! Forecast command implementation.

use anyhow::{Context, Result};
use co2cast_lib::FORECAST_FILE_NAME;
use co2cast_lib::prelude::*;
use std::path::{Path, PathBuf};

use super::{load_store, pipeline_config};
use crate::display::{Format, write_forecast};

/// Forecasts a location at monthly granularity and writes it to a file.
pub(crate) async fn forecast(
    data: &Path,
    location: String,
    output: Option<PathBuf>,
    format: Format,
    horizon: usize,
    fit_timeout_ms: u64,
    quiet: bool,
) -> Result<()> {
    let store = load_store(data, quiet).await?;
    let pipeline = Pipeline::with_config(store, pipeline_config(horizon, fit_timeout_ms));

    let forecast =
        tokio::task::spawn_blocking(move || pipeline.build_downloadable_forecast(&location))
            .await
            .context("Forecast task failed")??;

    // Default to forecasted_data.<format>
    let output = output.unwrap_or_else(|| {
        PathBuf::from(FORECAST_FILE_NAME).with_extension(format.extension())
    });
    write_forecast(&forecast, &output, format)?;

    if !quiet {
        println!("Output written to: {}", output.display());
    }

    Ok(())
}
