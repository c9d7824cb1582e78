//! Model fitting and forecast assembly.

use co2cast_types::{CO2_FIELD, ForecastError, ForecastPoint, ForecastResult, Granularity, Series};
use tracing::debug;

use crate::ets::filter;
use crate::{Deadline, EtsParams, FittedEts, ForecastConfig, NelderMead, Optimizer, initial_states};

/// Fits ETS(A,A,A) models and extends series with them.
#[derive(Debug, Clone)]
pub struct Forecaster<O = NelderMead> {
    config: ForecastConfig,
    optimizer: O,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl Forecaster {
    /// Creates a forecaster using the bundled simplex search.
    #[must_use]
    pub const fn new(config: ForecastConfig) -> Self {
        let optimizer = NelderMead::new(config.optimizer);
        Self { config, optimizer }
    }
}

impl<O: Optimizer> Forecaster<O> {
    /// Creates a forecaster with a custom parameter search.
    #[must_use]
    pub const fn with_optimizer(config: ForecastConfig, optimizer: O) -> Self {
        Self { config, optimizer }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Fits a model to consecutive observations.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::TooShort`] with no more than one seasonal cycle
    /// - [`ForecastError::NonFinite`] for infinite input or a diverging fit
    /// - [`ForecastError::Degenerate`] when every value is the same
    /// - [`ForecastError::NonConvergence`] or [`ForecastError::FittingTimeout`]
    ///   from the optimizer
    pub fn fit(&self, values: &[f64]) -> Result<FittedEts, ForecastError> {
        let period = self.config.seasonal_period.max(1);
        if values.len() <= period {
            return Err(ForecastError::TooShort {
                required: period + 1,
                actual: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::NonFinite);
        }
        if is_constant(values) {
            return Err(ForecastError::Degenerate);
        }

        let deadline = Deadline::new(self.config.fit_budget);
        let initial = initial_states(values, period);
        let n = values.len() as f64;
        let objective = |u: &[f64]| {
            let mse = filter(values, &EtsParams::from_unconstrained(u), &initial).sse / n;
            if mse.is_finite() { mse } else { f64::MAX }
        };

        let start = EtsParams::default().to_unconstrained();
        let minimum = self.optimizer.minimize(&objective, &start, &deadline)?;

        let params = EtsParams::from_unconstrained(&minimum.x);
        let filtered = filter(values, &params, &initial);
        if !filtered.states.is_finite() || !filtered.sse.is_finite() {
            return Err(ForecastError::NonFinite);
        }

        let fitted = FittedEts::new(params, initial, filtered, values.len(), minimum.iterations);
        debug!(
            alpha = params.alpha,
            beta = params.beta,
            gamma = params.gamma,
            sse = fitted.sse(),
            aic = fitted.aic(),
            iterations = fitted.iterations(),
            "Fitted ETS(A,A,A)"
        );
        Ok(fitted)
    }

    /// Forecasts the CO2 field of a resampled series.
    ///
    /// Missing values are dropped before fitting, so the model sees the
    /// defined values as consecutive steps. Forecast dates continue bucket by
    /// bucket from the last defined observation.
    ///
    /// # Errors
    ///
    /// Returns the fit error if the model cannot be fitted.
    pub fn forecast(
        &self,
        series: &Series,
        granularity: Granularity,
    ) -> Result<ForecastResult, ForecastError> {
        let observed = series.defined(CO2_FIELD);
        let values: Vec<f64> = observed.iter().map(|(_, v)| *v).collect();
        let fitted = self.fit(&values)?;

        let Some(&(last, _)) = observed.last() else {
            return Err(ForecastError::TooShort {
                required: self.config.seasonal_period + 1,
                actual: 0,
            });
        };

        let mut date = last;
        let mut points = Vec::with_capacity(self.config.horizon);
        for value in fitted.forecast(self.config.horizon) {
            if !value.is_finite() {
                return Err(ForecastError::NonFinite);
            }
            date = granularity.next_bucket(date);
            points.push(ForecastPoint::new(date, value));
        }

        debug!(
            location = series.location(),
            %granularity,
            steps = points.len(),
            "Built forecast"
        );
        Ok(ForecastResult::new(granularity, points))
    }
}

fn is_constant(values: &[f64]) -> bool {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    max - min <= f64::EPSILON * max.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Minimum;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use co2cast_types::{ForecastErrorKind, Observation};
    use std::f64::consts::PI;
    use std::time::Duration;

    fn truth(i: usize) -> f64 {
        400.0 + 0.5 * i as f64 + 10.0 * (2.0 * PI * i as f64 / 12.0).sin()
    }

    fn monthly_series(values: impl IntoIterator<Item = Option<f64>>) -> Series {
        let mut date = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap();
        let observations = values
            .into_iter()
            .map(|v| {
                let obs = Observation::new(date, vec![v]);
                date = Granularity::Monthly.next_bucket(date);
                obs
            })
            .collect();
        Series::new("Harbor", vec![CO2_FIELD.to_string()], observations)
    }

    fn seasonal_series(n: usize) -> Series {
        monthly_series((0..n).map(|i| Some(truth(i))))
    }

    #[test]
    fn test_constant_series_fails_to_fit() {
        let series = monthly_series(std::iter::repeat_n(Some(5.0), 24));
        let err = Forecaster::default()
            .forecast(&series, Granularity::Monthly)
            .unwrap_err();

        assert_eq!(err, ForecastError::Degenerate);
        assert_eq!(err.kind(), ForecastErrorKind::ModelFitFailure);
    }

    #[test]
    fn test_trend_and_season_continued() {
        let forecast = Forecaster::default()
            .forecast(&seasonal_series(36), Granularity::Monthly)
            .unwrap();

        assert_eq!(forecast.len(), 30);
        for (step, value) in forecast.values().enumerate() {
            assert_abs_diff_eq!(value, truth(36 + step), epsilon = 1.0);
        }

        let values: Vec<f64> = forecast.values().collect();
        let first_cycle: f64 = values[..12].iter().sum();
        let second_cycle: f64 = values[12..24].iter().sum();
        assert!(second_cycle > first_cycle);
    }

    #[test]
    fn test_dates_are_contiguous_buckets() {
        let forecast = Forecaster::default()
            .forecast(&seasonal_series(36), Granularity::Monthly)
            .unwrap();
        let dates: Vec<_> = forecast.dates().collect();

        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert!(
            dates
                .windows(2)
                .all(|w| Granularity::Monthly.next_bucket(w[0]) == w[1])
        );
    }

    #[test]
    fn test_horizon_respected() {
        let config = ForecastConfig::default().with_horizon(7);
        let forecast = Forecaster::new(config)
            .forecast(&seasonal_series(30), Granularity::Monthly)
            .unwrap();
        assert_eq!(forecast.len(), 7);
    }

    #[test]
    fn test_noisy_series_fits() {
        let series = monthly_series((0..48).map(|i| Some(truth(i) + 1.5 * (7.3 * i as f64).sin())));
        let values: Vec<f64> = series.column(CO2_FIELD).flatten().collect();
        let fitted = Forecaster::default().fit(&values).unwrap();

        assert!(fitted.params().is_admissible());
        assert_eq!(fitted.observations(), 48);
        assert!(fitted.sigma2() > 0.0);
        assert!(fitted.aic().is_finite());
    }

    #[test]
    fn test_missing_values_dropped() {
        let values = (0..40).map(|i| (i % 9 != 4).then(|| truth(i)));
        let series = monthly_series(values);
        let forecast = Forecaster::default()
            .forecast(&series, Granularity::Monthly)
            .unwrap();

        assert_eq!(forecast.len(), 30);
        let last = series.dates().last().unwrap();
        assert_eq!(
            forecast.dates().next(),
            Some(Granularity::Monthly.next_bucket(last))
        );
    }

    #[test]
    fn test_too_short() {
        let err = Forecaster::default()
            .forecast(&seasonal_series(12), Granularity::Monthly)
            .unwrap_err();
        assert_eq!(
            err,
            ForecastError::TooShort {
                required: 13,
                actual: 12
            }
        );
    }

    #[test]
    fn test_zero_budget_times_out() {
        let config = ForecastConfig::default().with_fit_budget(Duration::ZERO);
        let err = Forecaster::new(config)
            .forecast(&seasonal_series(36), Granularity::Monthly)
            .unwrap_err();
        assert_eq!(err.kind(), ForecastErrorKind::FittingTimeout);
    }

    #[derive(Debug)]
    struct FixedStart;

    impl Optimizer for FixedStart {
        fn minimize(
            &self,
            objective: &dyn Fn(&[f64]) -> f64,
            start: &[f64],
            _deadline: &Deadline,
        ) -> Result<Minimum, ForecastError> {
            Ok(Minimum {
                x: start.to_vec(),
                value: objective(start),
                iterations: 0,
            })
        }
    }

    #[test]
    fn test_custom_optimizer() {
        let forecaster = Forecaster::with_optimizer(ForecastConfig::default(), FixedStart);
        let values: Vec<f64> = (0..24).map(truth).collect();
        let fitted = forecaster.fit(&values).unwrap();

        assert_abs_diff_eq!(fitted.params().alpha, 0.5, epsilon = 1e-9);
        assert_eq!(fitted.iterations(), 0);
    }
}
