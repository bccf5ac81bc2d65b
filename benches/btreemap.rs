//! Benchmarks for the Standard Library's [`BTreeMap`], as a baseline.

use std::collections::BTreeMap;

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Benchmarking insertion
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut map: BTreeMap<usize, usize> =
                std::iter::repeat_with(|| (rng.random(), rng.random())).take(size).collect();

            b.iter(|| {
                map.insert(rng.random(), rng.random());
            });
        });
    }
}

/// Benchmarking removal by key, re-inserting what was removed
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut map: BTreeMap<usize, usize> = (0..size).map(|x| (x, x)).collect();

            b.iter(|| {
                let key = rng.random_range(0..size);
                if let Some(v) = map.remove(&key) {
                    map.insert(key, v);
                }
            });
        });
    }
}

/// Benchmarking random access by key
pub fn rand_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Random Access");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let map: BTreeMap<usize, usize> = (0..size).map(|x| (x, x)).collect();
            let keys: Vec<usize> = std::iter::repeat_with(|| rng.random_range(0..size))
                .take(10)
                .collect();

            b.iter(|| {
                for key in &keys {
                    black_box(map.get(key));
                }
            });
        });
    }
}

/// Benchmarking iteration
pub fn iter(c: &mut Criterion) {
    c.bench_function("BTreeMap Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let map: BTreeMap<usize, usize> = std::iter::repeat_with(|| (rng.random(), rng.random()))
            .take(100_000)
            .collect();

        b.iter(|| {
            for el in &map {
                black_box(el);
            }
        });
    });
}
