//! Derivative-free parameter search.

use std::time::{Duration, Instant};

use co2cast_types::ForecastError;

use crate::OptimizerConfig;

/// Wall-clock limit shared by one fit.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a deadline that expires after `budget`.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// Returns the budget.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Returns true once the budget is used up.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    /// Fails with [`ForecastError::FittingTimeout`] once the budget is used up.
    ///
    /// # Errors
    ///
    /// Returns an error if the deadline has passed.
    pub fn check(&self) -> Result<(), ForecastError> {
        if self.expired() {
            Err(ForecastError::FittingTimeout {
                budget: self.budget,
            })
        } else {
            Ok(())
        }
    }
}

/// Result of a minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// The minimizing point.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
}

/// Minimizes an objective over an unconstrained space.
///
/// Implementations must check the deadline at least once per iteration.
pub trait Optimizer: Send + Sync {
    /// Minimizes `objective` starting from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::NonConvergence`] if the stopping rules are not
    /// met within the iteration limit, or [`ForecastError::FittingTimeout`]
    /// if the deadline passes first.
    fn minimize(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        start: &[f64],
        deadline: &Deadline,
    ) -> Result<Minimum, ForecastError>;
}

/// Nelder–Mead downhill simplex.
///
/// Stops when the objective values of the simplex agree within
/// `ftol_abs + ftol_rel * |f|`, or when the simplex has collapsed below
/// `xtol`, whichever happens first.
#[derive(Debug, Clone, Default)]
pub struct NelderMead {
    config: OptimizerConfig,
}

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

impl NelderMead {
    /// Creates a simplex search with the given stopping rules.
    #[must_use]
    pub const fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Returns the stopping rules.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn converged(&self, simplex: &[(Vec<f64>, f64)]) -> bool {
        let (best_x, best_f) = &simplex[0];
        let worst_f = simplex[simplex.len() - 1].1;

        let f_spread = (worst_f - best_f).abs();
        let f_scale = (worst_f.abs() + best_f.abs()) / 2.0;
        if f_spread <= self.config.ftol_abs + self.config.ftol_rel * f_scale {
            return true;
        }

        let x_spread = simplex[1..]
            .iter()
            .flat_map(|(x, _)| x.iter().zip(best_x).map(|(a, b)| (a - b).abs()))
            .fold(0.0_f64, f64::max);
        x_spread <= self.config.xtol
    }
}

impl Optimizer for NelderMead {
    fn minimize(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        start: &[f64],
        deadline: &Deadline,
    ) -> Result<Minimum, ForecastError> {
        let dim = start.len();
        let eval = |x: &[f64]| {
            let f = objective(x);
            if f.is_nan() { f64::MAX } else { f }
        };

        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
        simplex.push((start.to_vec(), eval(start)));
        for i in 0..dim {
            let mut vertex = start.to_vec();
            vertex[i] += self.config.initial_step;
            let f = eval(&vertex);
            simplex.push((vertex, f));
        }

        for iteration in 0..self.config.max_iterations {
            deadline.check()?;
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

            if self.converged(&simplex) {
                let (x, value) = simplex.swap_remove(0);
                return Ok(Minimum {
                    x,
                    value,
                    iterations: iteration,
                });
            }

            let worst = dim;
            let centroid: Vec<f64> = (0..dim)
                .map(|j| simplex[..worst].iter().map(|(x, _)| x[j]).sum::<f64>() / dim as f64)
                .collect();
            let worst_x = simplex[worst].0.clone();
            let towards = |coef: f64| -> Vec<f64> {
                centroid
                    .iter()
                    .zip(&worst_x)
                    .map(|(c, w)| c + coef * (c - w))
                    .collect()
            };

            let reflected = towards(REFLECTION);
            let f_reflected = eval(&reflected);

            if f_reflected < simplex[0].1 {
                let expanded = towards(EXPANSION);
                let f_expanded = eval(&expanded);
                simplex[worst] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
                continue;
            }

            if f_reflected < simplex[worst - 1].1 {
                simplex[worst] = (reflected, f_reflected);
                continue;
            }

            let (contracted, bound) = if f_reflected < simplex[worst].1 {
                (towards(REFLECTION * CONTRACTION), f_reflected)
            } else {
                (towards(-CONTRACTION), simplex[worst].1)
            };
            let f_contracted = eval(&contracted);
            if f_contracted <= bound {
                simplex[worst] = (contracted, f_contracted);
                continue;
            }

            let best = simplex[0].0.clone();
            for (x, f) in &mut simplex[1..] {
                for (xi, bi) in x.iter_mut().zip(&best) {
                    *xi = bi + SHRINK * (*xi - bi);
                }
                *f = eval(x);
            }
        }

        Err(ForecastError::NonConvergence {
            iterations: self.config.max_iterations,
        })
    }
}
