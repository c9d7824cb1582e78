//! Heuristic initial states.

use crate::EtsStates;

/// Estimates starting states from the data.
///
/// With at least two full cycles the trend line is fitted to a centered
/// moving average of width `period`, which cancels the seasonal pattern;
/// otherwise it is fitted to the complete cycles directly. Seasonal
/// components are the per-phase means of the detrended values, shifted to sum
/// to zero. The returned level sits one step before the first observation.
#[must_use]
pub fn initial_states(values: &[f64], period: usize) -> EtsStates {
    let m = period.max(1);
    let (intercept, slope) = if m > 1 && values.len() >= 2 * m {
        least_squares(&centered_moving_average(values, m))
    } else {
        let cycles = (values.len() / m).max(1) * m;
        let points: Vec<(f64, f64)> = values
            .iter()
            .take(cycles)
            .enumerate()
            .map(|(t, &y)| (t as f64, y))
            .collect();
        least_squares(&points)
    };

    let mut sums = vec![0.0; m];
    let mut counts = vec![0_u32; m];
    for (t, &y) in values.iter().enumerate() {
        sums[t % m] += y - (intercept + slope * t as f64);
        counts[t % m] += 1;
    }
    let mut seasonal: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| if count > 0 { sum / f64::from(count) } else { 0.0 })
        .collect();

    let offset = seasonal.iter().sum::<f64>() / m as f64;
    for s in &mut seasonal {
        *s -= offset;
    }

    EtsStates {
        level: intercept + offset - slope,
        trend: slope,
        seasonal,
    }
}

/// Centered moving average as `(t, mean)` points.
///
/// Even widths use the 2-by-`width` average, halving the weight of both ends.
fn centered_moving_average(values: &[f64], width: usize) -> Vec<(f64, f64)> {
    let half = width / 2;
    if values.len() < 2 * half + 1 {
        return Vec::new();
    }

    (half..values.len() - half)
        .map(|t| {
            let window = &values[t - half..=t + half];
            let mean = if width % 2 == 0 {
                let inner: f64 = window[1..window.len() - 1].iter().sum();
                (inner + 0.5 * (window[0] + window[window.len() - 1])) / width as f64
            } else {
                window.iter().sum::<f64>() / width as f64
            };
            (t as f64, mean)
        })
        .collect()
}

/// Ordinary least squares line through `(x, y)` points, as `(intercept, slope)`.
fn least_squares(points: &[(f64, f64)]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let n = points.len() as f64;
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - x_mean;
        (sxy + dx * (y - y_mean), sxx + dx * dx)
    });
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (y_mean - slope * x_mean, slope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn trend_with_season(n: usize) -> Vec<f64> {
        (0..n)
            .map(|t| 400.0 + 0.5 * t as f64 + 10.0 * (2.0 * PI * t as f64 / 12.0).sin())
            .collect()
    }

    #[test]
    fn test_recovers_trend_and_season() {
        let states = initial_states(&trend_with_season(36), 12);

        assert_abs_diff_eq!(states.trend, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(states.level, 399.5, epsilon = 1e-9);
        for (phase, s) in states.seasonal.iter().enumerate() {
            let expected = 10.0 * (2.0 * PI * phase as f64 / 12.0).sin();
            assert_abs_diff_eq!(*s, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_single_cycle_uses_direct_fit() {
        let values: Vec<f64> = (0..15).map(|t| 3.0 * t as f64).collect();
        let states = initial_states(&values, 12);

        assert_abs_diff_eq!(states.trend, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(states.level, -3.0, epsilon = 1e-9);
        assert!(states.seasonal.iter().all(|s| s.abs() < 1e-9));
    }

    #[test]
    fn test_seasonal_sums_to_zero() {
        let values: Vec<f64> = (0..30).map(|t| ((t * 7) % 5) as f64 + 2.0).collect();
        let states = initial_states(&values, 12);

        assert_eq!(states.period(), 12);
        assert_abs_diff_eq!(states.seasonal.iter().sum::<f64>(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_even_moving_average_cancels_season() {
        let values = [1.0, 3.0, 1.0, 3.0, 1.0, 3.0];
        let ma = centered_moving_average(&values, 2);
        assert_eq!(ma.len(), 4);
        assert!(ma.iter().all(|(_, m)| (m - 2.0).abs() < 1e-12));
    }
}
