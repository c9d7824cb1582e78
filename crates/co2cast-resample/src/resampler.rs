//! Streaming observation-to-bucket aggregation.

use chrono::NaiveDate;
use co2cast_types::{Granularity, Observation, Series};

/// Streaming bucket aggregator.
///
/// Observations must arrive in date order. Each completed bucket is emitted
/// as an [`Observation`] labelled by the bucket's last day, holding the mean
/// of every field over its defined values.
#[derive(Debug)]
pub struct Resampler {
    granularity: Granularity,
    width: usize,
    current: Option<BucketBuilder>,
}

impl Resampler {
    /// Creates a resampler for observations with `width` fields.
    #[must_use]
    pub const fn new(granularity: Granularity, width: usize) -> Self {
        Self {
            granularity,
            width,
            current: None,
        }
    }

    /// Returns the granularity being resampled to.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Processes an observation, potentially emitting a completed bucket.
    ///
    /// Returns `Some(bucket)` when this observation starts a new bucket,
    /// `None` otherwise.
    pub fn process(&mut self, observation: &Observation) -> Option<Observation> {
        let label = self.granularity.bucket_end(observation.date);

        match self.current.take() {
            Some(mut builder) if builder.label == label => {
                builder.update(observation);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                let completed = builder.finish();
                self.current = Some(BucketBuilder::new(label, self.width, observation));
                Some(completed)
            }
            None => {
                self.current = Some(BucketBuilder::new(label, self.width, observation));
                None
            }
        }
    }

    /// Finishes resampling, returning the last open bucket.
    #[must_use]
    pub fn finish(self) -> Option<Observation> {
        self.current.map(BucketBuilder::finish)
    }
}

/// Resamples a series to the given granularity.
///
/// Buckets without observations are omitted, so the result is not a dense
/// calendar grid. Resampling an already resampled series at the same
/// granularity returns it unchanged.
#[must_use]
pub fn resample(series: &Series, granularity: Granularity) -> Series {
    let mut resampler = Resampler::new(granularity, series.fields().len());
    let mut buckets: Vec<Observation> = series
        .observations()
        .iter()
        .filter_map(|obs| resampler.process(obs))
        .collect();

    if let Some(bucket) = resampler.finish() {
        buckets.push(bucket);
    }

    Series::new(series.location(), series.fields().to_vec(), buckets)
}

/// Running per-field sums of one bucket.
#[derive(Debug)]
struct BucketBuilder {
    label: NaiveDate,
    sums: Vec<f64>,
    counts: Vec<u32>,
}

impl BucketBuilder {
    /// Creates a builder from the bucket's first observation.
    fn new(label: NaiveDate, width: usize, observation: &Observation) -> Self {
        let mut builder = Self {
            label,
            sums: vec![0.0; width],
            counts: vec![0; width],
        };
        builder.update(observation);
        builder
    }

    /// Adds the defined values of an observation.
    fn update(&mut self, observation: &Observation) {
        for (i, value) in observation.values.iter().enumerate().take(self.sums.len()) {
            if let Some(v) = value {
                self.sums[i] += v;
                self.counts[i] += 1;
            }
        }
    }

    /// Finishes the bucket; fields without defined values stay missing.
    fn finish(self) -> Observation {
        let values = self
            .sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, &count)| (count > 0).then(|| sum / f64::from(count)))
            .collect();
        Observation::new(self.label, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeDelta;
    use co2cast_types::CO2_FIELD;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_series(rows: Vec<(NaiveDate, Option<f64>)>) -> Series {
        let observations = rows
            .into_iter()
            .map(|(d, v)| Observation::new(d, vec![v]))
            .collect();
        Series::new("Harbor", vec![CO2_FIELD.to_string()], observations)
    }

    fn daily_series(start: NaiveDate, days: i64) -> Series {
        make_series(
            (0..days)
                .map(|i| {
                    let d = start + TimeDelta::days(i);
                    let v = 400.0 + (i % 17) as f64;
                    (d, if i % 11 == 5 { None } else { Some(v) })
                })
                .collect(),
        )
    }

    #[test]
    fn test_monthly_means() {
        let series = make_series(vec![
            (date(2024, 1, 5), Some(10.0)),
            (date(2024, 1, 20), Some(20.0)),
            (date(2024, 3, 1), Some(30.0)),
        ]);
        let monthly = resample(&series, Granularity::Monthly);

        let dates: Vec<_> = monthly.dates().collect();
        assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 3, 31)]);
        let values: Vec<_> = monthly.column(CO2_FIELD).flatten().collect();
        assert_relative_eq!(values[0], 15.0);
        assert_relative_eq!(values[1], 30.0);
    }

    #[test]
    fn test_duplicate_dates_averaged() {
        let series = make_series(vec![
            (date(2024, 1, 1), Some(1.0)),
            (date(2024, 1, 1), Some(3.0)),
        ]);
        let daily = resample(&series, Granularity::Daily);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily.column(CO2_FIELD).collect::<Vec<_>>(), vec![Some(2.0)]);
    }

    #[test]
    fn test_missing_values_propagate() {
        let series = make_series(vec![
            (date(2024, 1, 1), None),
            (date(2024, 1, 2), None),
            (date(2024, 2, 1), None),
            (date(2024, 2, 2), Some(4.0)),
        ]);
        let monthly = resample(&series, Granularity::Monthly);
        assert_eq!(
            monthly.column(CO2_FIELD).collect::<Vec<_>>(),
            vec![None, Some(4.0)]
        );
    }

    #[test]
    fn test_weekly_labels_are_sundays() {
        let series = daily_series(date(2024, 1, 3), 30);
        let weekly = resample(&series, Granularity::Weekly);

        let dates: Vec<_> = weekly.dates().collect();
        assert_eq!(dates.first(), Some(&date(2024, 1, 7)));
        assert_eq!(dates.last(), Some(&date(2024, 2, 4)));
    }

    #[test]
    fn test_output_strictly_increasing_and_aligned() {
        let series = daily_series(date(2022, 11, 20), 800);
        for &granularity in Granularity::all() {
            let resampled = resample(&series, granularity);
            let dates: Vec<_> = resampled.dates().collect();
            assert!(dates.windows(2).all(|w| w[0] < w[1]), "{granularity}");
            assert!(dates.iter().all(|d| granularity.is_aligned(*d)), "{granularity}");
        }
    }

    #[test]
    fn test_resample_is_idempotent() {
        let series = daily_series(date(2023, 5, 14), 400);
        for &granularity in Granularity::all() {
            let once = resample(&series, granularity);
            let twice = resample(&once, granularity);
            assert_eq!(once, twice, "{granularity}");
        }
    }

    #[test]
    fn test_empty_series() {
        let series = make_series(Vec::new());
        let resampled = resample(&series, Granularity::Yearly);
        assert!(resampled.is_empty());
        assert_eq!(resampled.location(), "Harbor");
    }

    #[test]
    fn test_streaming_process_and_finish() {
        let mut resampler = Resampler::new(Granularity::Monthly, 1);
        let first = Observation::new(date(2024, 1, 1), vec![Some(1.0)]);
        let second = Observation::new(date(2024, 2, 1), vec![Some(2.0)]);

        assert!(resampler.process(&first).is_none());
        let completed = resampler.process(&second).unwrap();
        assert_eq!(completed.date, date(2024, 1, 31));

        let last = resampler.finish().unwrap();
        assert_eq!(last.date, date(2024, 2, 29));
    }
}
