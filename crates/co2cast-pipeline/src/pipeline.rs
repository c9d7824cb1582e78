//! Request orchestration.

use co2cast_forecast::Forecaster;
use co2cast_resample::resample;
use co2cast_stats::summarize;
use co2cast_store::SeriesStore;
use co2cast_types::{
    CO2_FIELD, Co2castError, ForecastResult, Granularity, LatestReading, Result, Series,
};
use tracing::{debug, warn};

use crate::{PipelineConfig, View, ViewState};

/// Builds views and forecasts over a shared dataset.
///
/// A pipeline only borrows the store, so it is cheap to copy into worker
/// threads. Requests share no state.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    store: &'a SeriesStore,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline with the default configuration.
    #[must_use]
    pub fn new(store: &'a SeriesStore) -> Self {
        Self::with_config(store, PipelineConfig::default())
    }

    /// Creates a pipeline with a custom configuration.
    #[must_use]
    pub const fn with_config(store: &'a SeriesStore, config: PipelineConfig) -> Self {
        Self { store, config }
    }

    /// Returns the dataset.
    #[must_use]
    pub const fn store(&self) -> &'a SeriesStore {
        self.store
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the raw rows of a location; unknown locations are empty.
    #[must_use]
    pub fn get_series(&self, location: &str) -> Series {
        self.store.get_series(location)
    }

    /// Returns the rows of a location resampled to `granularity`.
    #[must_use]
    pub fn resampled(&self, location: &str, granularity: Granularity) -> Series {
        resample(&self.get_series(location), granularity)
    }

    /// Returns true if a resampled series is long enough to forecast.
    #[must_use]
    pub fn has_enough_data(&self, series: &Series) -> bool {
        series.len() > self.config.min_points
    }

    /// Builds the view of a location at a granularity.
    ///
    /// Never fails: missing data yields an [`ViewState::Insufficient`] view and
    /// a forecaster failure is reported in [`View::error`].
    #[must_use]
    pub fn build_view(&self, location: &str, granularity: Granularity) -> View {
        let series = self.resampled(location, granularity);
        let latest_reading = latest_reading(&series);

        if !self.has_enough_data(&series) {
            debug!(
                location,
                %granularity,
                points = series.len(),
                state = %ViewState::Insufficient,
                "Skipping forecast"
            );
            return View {
                location: location.to_string(),
                granularity,
                state: ViewState::Insufficient,
                latest_reading,
                summary: summarize(&series),
                forecast: None,
                error: None,
            };
        }

        let forecaster = Forecaster::new(self.config.forecast_config());
        let (summary, forecast) = rayon::join(
            || summarize(&series),
            || forecaster.forecast(&series, granularity),
        );

        let (forecast, error) = match forecast {
            Ok(forecast) => (Some(forecast), None),
            Err(err) => {
                warn!(location, %granularity, kind = %err.kind(), error = %err, "Forecast failed");
                (None, Some(err))
            }
        };
        debug!(
            location,
            %granularity,
            points = series.len(),
            state = %ViewState::Full,
            "Built view"
        );

        View {
            location: location.to_string(),
            granularity,
            state: ViewState::Full,
            latest_reading,
            summary,
            forecast,
            error,
        }
    }

    /// Forecasts a location at the download granularity.
    ///
    /// # Errors
    ///
    /// Returns [`Co2castError::InsufficientData`] when the resampled series
    /// has too few points, or [`Co2castError::Forecast`] when fitting fails.
    pub fn build_downloadable_forecast(&self, location: &str) -> Result<ForecastResult> {
        let granularity = self.config.download_granularity;
        let series = self.resampled(location, granularity);

        if !self.has_enough_data(&series) {
            return Err(Co2castError::InsufficientData {
                location: location.to_string(),
                points: series.len(),
                required: self.config.min_points,
            });
        }

        let forecaster = Forecaster::new(self.config.forecast_config());
        forecaster
            .forecast(&series, granularity)
            .map_err(Co2castError::from)
    }
}

impl Pipeline<'static> {
    /// Creates a pipeline over the installed process-wide dataset.
    #[must_use]
    pub fn global(config: PipelineConfig) -> Option<Self> {
        SeriesStore::global().map(|store| Self::with_config(store, config))
    }
}

/// Returns the latest CO2 reading of a series.
#[must_use]
pub fn latest_reading(series: &Series) -> LatestReading {
    LatestReading::of(series, CO2_FIELD)
}
