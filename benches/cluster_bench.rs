//! Full clustering call on sequential and parallel engines
//!
//! Run with: cargo bench --features test-utils --bench cluster_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use msc::cluster::test_data::TestDistributions;
use msc::prelude::*;

const CENTERS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [10.0, 10.0, 10.0],
    [0.0, 10.0, 0.0],
    [10.0, 0.0, 10.0],
];

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");

    for &n_per_blob in &[50usize, 200, 500] {
        let points = TestDistributions::blobs(&CENTERS, n_per_blob, 0.5, 42);
        group.throughput(Throughput::Elements(points.len() as u64));

        let sequential = MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(4.0).unwrap())
            .epsilon(1e-9)
            .cluster_epsilon(1e-3)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("sequential", points.len()),
            &points,
            |b, points| b.iter(|| sequential.cluster(black_box(points), 3).unwrap()),
        );

        let parallel = MeanShiftBuilder::new(L2Sq, ParabolicSq, Constant::new(4.0).unwrap())
            .epsilon(1e-9)
            .cluster_epsilon(1e-3)
            .engine(ParallelEngine::new())
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("parallel", points.len()),
            &points,
            |b, points| b.iter(|| parallel.cluster(black_box(points), 3).unwrap()),
        );
    }

    group.finish();
}

fn bench_adaptive(c: &mut Criterion) {
    let points = TestDistributions::uniform_cube(400, 10.0, 7);
    let ms = MeanShiftBuilder::new(L2, Gaussian, MinMaxDistance::from_bandwidth(2.0).unwrap())
        .epsilon(1e-6)
        .max_iter(100)
        .engine(ParallelEngine::new())
        .build()
        .unwrap();

    c.bench_function("cluster/adaptive_uniform_400", |b| {
        b.iter(|| ms.cluster(black_box(&points), 3).unwrap())
    });
}

criterion_group!(benches, bench_engines, bench_adaptive);
criterion_main!(benches);
