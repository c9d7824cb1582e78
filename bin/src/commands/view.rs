//! View command implementation.

use anyhow::{Context, Result};
use co2cast_lib::prelude::*;
use std::path::Path;

use super::{load_store, pipeline_config};
use crate::display::print_view;

/// Builds and prints the view of a location.
pub(crate) async fn show_view(
    data: &Path,
    location: String,
    granularity: Granularity,
    json: bool,
    horizon: usize,
    fit_timeout_ms: u64,
    quiet: bool,
) -> Result<()> {
    let store = load_store(data, quiet).await?;
    let pipeline = Pipeline::with_config(store, pipeline_config(horizon, fit_timeout_ms));

    let view = tokio::task::spawn_blocking(move || pipeline.build_view(&location, granularity))
        .await
        .context("View task failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }

    Ok(())
}
