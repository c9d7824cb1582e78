//! CLI command implementations.

pub(crate) mod forecast;
pub(crate) mod locations;
pub(crate) mod resample;
pub(crate) mod view;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use co2cast_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Loads the dataset and installs it process-wide.
pub(crate) async fn load_store(path: &Path, quiet: bool) -> Result<&'static SeriesStore> {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    progress.set_message(format!("Loading {}", path.display()));

    let store = load_csv(path, &IngestConfig::default())
        .await
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;

    progress.finish_and_clear();
    Ok(store.install()?)
}

/// Builds the pipeline settings from CLI flags.
pub(crate) fn pipeline_config(horizon: usize, fit_timeout_ms: u64) -> PipelineConfig {
    PipelineConfig {
        horizon,
        fit_budget: Duration::from_millis(fit_timeout_ms),
        ..PipelineConfig::default()
    }
}
