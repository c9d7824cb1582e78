//! Summary statistics.

use co2cast_types::{FieldSummary, Series, SummaryResult};

/// Computes statistics of every numeric field of a series.
///
/// Missing values are ignored. Fields of an empty series report every
/// statistic as undefined.
#[must_use]
pub fn summarize(series: &Series) -> SummaryResult {
    let fields = series
        .fields()
        .iter()
        .map(|field| {
            let values: Vec<f64> = series.column(field).flatten().collect();
            describe(field, &values)
        })
        .collect();
    SummaryResult::new(fields)
}

/// Computes statistics of a slice of defined values.
#[must_use]
pub fn describe(field: &str, values: &[f64]) -> FieldSummary {
    if values.is_empty() {
        return FieldSummary::undefined(field);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = (sorted.len() > 1).then(|| {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    });

    FieldSummary {
        field: field.to_string(),
        count: Some(sorted.len()),
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Returns the `q` quantile of ascending `sorted` values.
///
/// Uses linear interpolation between the two nearest ranks, so the median of
/// an even-length slice is the mean of the middle pair. Returns `None` for an
/// empty slice or a `q` outside `[0, 1]`.
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
