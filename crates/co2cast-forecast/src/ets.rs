//! ETS(A,A,A) state-space recursions.

use serde::{Deserialize, Serialize};

/// Smoothing parameters of an additive Holt–Winters model.
///
/// Admissible values satisfy `0 < beta < alpha < 1` and
/// `0 < gamma < 1 - alpha`, each kept [`EtsParams::LOWER`] away from its
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtsParams {
    /// Level smoothing.
    pub alpha: f64,
    /// Trend smoothing.
    pub beta: f64,
    /// Seasonal smoothing.
    pub gamma: f64,
}

impl Default for EtsParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.1,
            gamma: 0.1,
        }
    }
}

impl EtsParams {
    /// Margin kept between each parameter and its bounds.
    pub const LOWER: f64 = 1e-4;

    /// Creates a parameter set.
    #[must_use]
    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Returns true if the parameters lie inside the admissible region.
    #[must_use]
    pub fn is_admissible(&self) -> bool {
        let lo = Self::LOWER;
        (lo..=1.0 - lo).contains(&self.alpha)
            && (lo..=self.alpha).contains(&self.beta)
            && (lo..=1.0 - self.alpha).contains(&self.gamma)
    }

    /// Maps an unconstrained point onto the admissible region.
    pub(crate) fn from_unconstrained(u: &[f64]) -> Self {
        let lo = Self::LOWER;
        let alpha = lo + (1.0 - 2.0 * lo) * sigmoid(u[0]);
        let beta = lo + (alpha - lo) * sigmoid(u[1]);
        let gamma = lo + (1.0 - alpha - lo) * sigmoid(u[2]);
        Self { alpha, beta, gamma }
    }

    /// Inverse of [`EtsParams::from_unconstrained`].
    pub(crate) fn to_unconstrained(self) -> [f64; 3] {
        let lo = Self::LOWER;
        [
            logit((self.alpha - lo) / (1.0 - 2.0 * lo)),
            logit((self.beta - lo) / (self.alpha - lo)),
            logit((self.gamma - lo) / (1.0 - self.alpha - lo)),
        ]
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logit(p: f64) -> f64 {
    let p = p.clamp(1e-12, 1.0 - 1e-12);
    (p / (1.0 - p)).ln()
}

/// Level, trend and seasonal states.
///
/// `seasonal[k]` is the seasonal component of the `k`-th upcoming step, so
/// `seasonal[0]` applies to the next observation or forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtsStates {
    /// Level.
    pub level: f64,
    /// Additive trend per step.
    pub trend: f64,
    /// Seasonal components, one per phase.
    pub seasonal: Vec<f64>,
}

impl EtsStates {
    /// Returns the seasonal period.
    #[must_use]
    pub fn period(&self) -> usize {
        self.seasonal.len()
    }

    /// Returns true if every state is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.level.is_finite()
            && self.trend.is_finite()
            && self.seasonal.iter().all(|s| s.is_finite())
    }

    /// Extends the states `horizon` steps ahead.
    #[must_use]
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let m = self.period().max(1);
        (1..=horizon)
            .map(|h| {
                let seasonal = self.seasonal.get((h - 1) % m).copied().unwrap_or(0.0);
                self.level + h as f64 * self.trend + seasonal
            })
            .collect()
    }
}

/// States after a pass over the data plus the squared one-step error.
#[derive(Debug, Clone)]
pub(crate) struct Filtered {
    pub(crate) states: EtsStates,
    pub(crate) sse: f64,
}

/// Runs the additive error recursions over `values`.
pub(crate) fn filter(values: &[f64], params: &EtsParams, initial: &EtsStates) -> Filtered {
    let m = initial.period().max(1);
    let mut level = initial.level;
    let mut trend = initial.trend;
    let mut seasonal = initial.seasonal.clone();
    seasonal.resize(m, 0.0);
    let mut sse = 0.0;

    for (t, &y) in values.iter().enumerate() {
        let phase = t % m;
        let error = y - (level + trend + seasonal[phase]);
        sse += error * error;

        level += trend + params.alpha * error;
        trend += params.beta * error;
        seasonal[phase] += params.gamma * error;
    }
    seasonal.rotate_left(values.len() % m);

    Filtered {
        states: EtsStates {
            level,
            trend,
            seasonal,
        },
        sse,
    }
}

/// A fitted ETS(A,A,A) model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedEts {
    params: EtsParams,
    initial: EtsStates,
    states: EtsStates,
    sse: f64,
    observations: usize,
    iterations: usize,
}

impl FittedEts {
    pub(crate) fn new(
        params: EtsParams,
        initial: EtsStates,
        filtered: Filtered,
        observations: usize,
        iterations: usize,
    ) -> Self {
        Self {
            params,
            initial,
            states: filtered.states,
            sse: filtered.sse,
            observations,
            iterations,
        }
    }

    /// Returns the fitted smoothing parameters.
    #[must_use]
    pub const fn params(&self) -> &EtsParams {
        &self.params
    }

    /// Returns the states before the first observation.
    #[must_use]
    pub const fn initial_states(&self) -> &EtsStates {
        &self.initial
    }

    /// Returns the states after the last observation.
    #[must_use]
    pub const fn states(&self) -> &EtsStates {
        &self.states
    }

    /// Returns the in-sample sum of squared one-step errors.
    #[must_use]
    pub const fn sse(&self) -> f64 {
        self.sse
    }

    /// Returns the number of observations fitted.
    #[must_use]
    pub const fn observations(&self) -> usize {
        self.observations
    }

    /// Returns the optimizer iterations spent.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the maximum likelihood error variance.
    #[must_use]
    pub fn sigma2(&self) -> f64 {
        self.sse / self.observations.max(1) as f64
    }

    /// Returns the Gaussian log-likelihood.
    #[must_use]
    pub fn log_likelihood(&self) -> f64 {
        let n = self.observations as f64;
        let sigma2 = self.sigma2().max(f64::MIN_POSITIVE);
        -0.5 * n * ((2.0 * std::f64::consts::PI * sigma2).ln() + 1.0)
    }

    /// Returns the Akaike information criterion.
    ///
    /// Counts the three smoothing parameters and every initial state.
    #[must_use]
    pub fn aic(&self) -> f64 {
        let k = 3 + 2 + self.initial.period();
        2.0 * k as f64 - 2.0 * self.log_likelihood()
    }

    /// Returns point forecasts for the next `horizon` steps.
    #[must_use]
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        self.states.forecast(horizon)
    }
}
