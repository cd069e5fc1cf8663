//! Holistic benchmarks running complete scenarios.
//!
//! Scenarios run at a reduced resolution so a criterion sample stays short;
//! the `fdtd-bench` binary runs them at full resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fdtd_bench::bench::{bench_flux_1d, bench_periodic, BenchConfig};
use fdtd_bench::material::{Bump, Vacuum};

fn coarse_config() -> BenchConfig {
    let mut config = BenchConfig::default();
    config.set_resolution(4.0);
    config
}

fn bench_periodic_scenarios(c: &mut Criterion) {
    let config = coarse_config();
    let mut group = c.benchmark_group("periodic");
    group.sample_size(10);

    for (rmax, zmax) in [(6.0, 4.0), (12.0, 1.0), (1.0, 12.0), (12.0, 12.0)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", rmax, zmax)),
            &(rmax, zmax),
            |b, &(rmax, zmax)| {
                b.iter(|| black_box(bench_periodic(&config, rmax, zmax, &Vacuum).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_flux_scenarios(c: &mut Criterion) {
    let config = coarse_config();
    let mut group = c.benchmark_group("flux_1d_100");
    group.sample_size(10);

    for width in [20.0, 10.0, 300.0] {
        group.bench_with_input(BenchmarkId::new("bump", width), &width, |b, &width| {
            b.iter(|| black_box(bench_flux_1d(&config, 100.0, &Bump::new(width)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_periodic_scenarios, bench_flux_scenarios);
criterion_main!(benches);
