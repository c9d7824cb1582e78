//! Resampling, summary and forecasting benchmarks.
//!
//! Run with: `cargo bench --package co2cast-bench`

use co2cast_bench::{LOCATION, synthetic_store};
use co2cast_lib::{Forecaster, Granularity, Pipeline, resample, summarize};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Dataset sizes in days.
const SIZES: [usize; 3] = [365, 5 * 365, 20 * 365];

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    for days in SIZES {
        let store = synthetic_store(days);
        let series = store.get_series(LOCATION);
        group.throughput(Throughput::Elements(days as u64));

        for &granularity in Granularity::all() {
            group.bench_with_input(
                BenchmarkId::new(granularity.as_str(), days),
                &series,
                |b, series| b.iter(|| resample(black_box(series), granularity)),
            );
        }
    }

    group.finish();
}

fn summary_benchmark(c: &mut Criterion) {
    let store = synthetic_store(20 * 365);
    let daily = resample(&store.get_series(LOCATION), Granularity::Daily);

    c.bench_function("summarize/daily-20y", |b| b.iter(|| summarize(black_box(&daily))));
}

fn forecast_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast");
    let forecaster = Forecaster::default();

    for days in SIZES {
        let store = synthetic_store(days.max(2 * 365));
        let monthly = resample(&store.get_series(LOCATION), Granularity::Monthly);
        group.bench_with_input(
            BenchmarkId::new("monthly", monthly.len()),
            &monthly,
            |b, series| b.iter(|| forecaster.forecast(black_box(series), Granularity::Monthly)),
        );
    }

    group.finish();
}

fn view_benchmark(c: &mut Criterion) {
    let store = synthetic_store(5 * 365);
    let pipeline = Pipeline::new(&store);

    c.bench_function("build_view/weekly-5y", |b| {
        b.iter(|| pipeline.build_view(black_box(LOCATION), Granularity::Weekly));
    });
}

criterion_group!(
    benches,
    resample_benchmark,
    summary_benchmark,
    forecast_benchmark,
    view_benchmark
);
criterion_main!(benches);
