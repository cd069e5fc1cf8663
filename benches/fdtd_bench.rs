//! Benchmarks for the FDTD field update.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use fdtd_bench::fdtd::{Component, Fields, GaussianSource};
use fdtd_bench::geometry::{Point, Volume};
use fdtd_bench::material::{Material, Vacuum};

fn bench_cylindrical_step(c: &mut Criterion) {
    // (rmax, zmax) at a = 10
    let sizes = [(6.0, 4.0), (12.0, 1.0), (12.0, 12.0), (30.0, 30.0)];

    for (rmax, zmax) in sizes {
        let volume = Volume::cylindrical(rmax, zmax, 10.0).unwrap();
        let material = Material::new(&volume, &Vacuum).unwrap();

        let mut group = c.benchmark_group(format!("cyl_{}x{}", rmax, zmax));
        group.throughput(Throughput::Elements(volume.num_cells() as u64));
        group.sample_size(20);

        group.bench_function("complex", |b| {
            let mut fields = Fields::new(&material).unwrap();
            fields.use_bloch(0.0).unwrap();
            fields
                .add_point_source(
                    Component::Ez,
                    GaussianSource::new(0.8, 0.6, 0.0, 4.0),
                    Point::new(0.401, 0.301),
                    1.0,
                )
                .unwrap();
            b.iter(|| {
                fields.step();
                black_box(&fields);
            });
        });

        group.bench_function("real", |b| {
            let mut fields = Fields::new(&material).unwrap();
            fields.use_bloch(0.0).unwrap();
            fields.use_real_fields().unwrap();
            b.iter(|| {
                fields.step();
                black_box(&fields);
            });
        });

        group.finish();
    }
}

fn bench_one_d_step(c: &mut Criterion) {
    for zmax in [100.0, 1000.0, 10000.0] {
        let volume = Volume::one_d(zmax, 10.0).unwrap();
        let mut material = Material::new(&volume, &Vacuum).unwrap();
        material
            .use_pml_left(zmax / 6.0)
            .unwrap()
            .use_pml_right(zmax / 6.0)
            .unwrap();

        let mut group = c.benchmark_group(format!("one_d_{}", zmax));
        group.throughput(Throughput::Elements(volume.num_cells() as u64));

        group.bench_function("real", |b| {
            let mut fields = Fields::new(&material).unwrap();
            fields.use_real_fields().unwrap();
            b.iter(|| {
                fields.step();
                black_box(&fields);
            });
        });

        group.bench_function("real_with_flux", |b| {
            let mut fields = Fields::new(&material).unwrap();
            fields.use_real_fields().unwrap();
            let left = fields
                .add_flux_plane(Point::at_z(zmax / 3.0), Point::at_z(zmax / 3.0))
                .unwrap();
            let right = fields
                .add_flux_plane(Point::at_z(2.0 * zmax / 3.0), Point::at_z(2.0 * zmax / 3.0))
                .unwrap();
            let mut acc = 0.0;
            b.iter(|| {
                fields.step();
                acc += fields.flux(right).unwrap() - fields.flux(left).unwrap();
                black_box(acc);
            });
        });

        group.finish();
    }
}

criterion_group!(benches, bench_cylindrical_step, bench_one_d_step);
criterion_main!(benches);
