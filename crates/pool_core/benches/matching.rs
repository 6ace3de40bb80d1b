//! Performance benchmarks for pool_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pool_core::matching::PoolMatcher;
use pool_core::overlap::overlap_percent;
use pool_core::test_helpers::{east_of, straight_north_route, TripBuilder, TEST_ORIGIN};
use pool_core::trip::Trip;

fn candidate_pool(size: usize) -> Vec<Trip> {
    (0..size)
        .map(|i| {
            let origin = east_of(TEST_ORIGIN, (i % 10) as f64 * 40.0);
            let len = 2_000.0 + (i % 7) as f64 * 500.0;
            TripBuilder::new(&format!("c-{i}"))
                .route(straight_north_route(origin, len, 12))
                .departs_at(9, (i % 45) as i64)
                .build()
        })
        .collect()
}

fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap");
    for len_km in [2.0, 10.0, 30.0] {
        let a = straight_north_route(TEST_ORIGIN, len_km * 1_000.0, 50);
        let b = straight_north_route(east_of(TEST_ORIGIN, 80.0), len_km * 1_000.0, 50);
        group.bench_with_input(BenchmarkId::from_parameter(len_km), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(overlap_percent(a, b, 150.0)));
        });
    }
    group.finish();
}

fn bench_find_matches(c: &mut Criterion) {
    let base = TripBuilder::new("base").departs_at(9, 0).build();
    let matcher = PoolMatcher::default();

    let mut group = c.benchmark_group("find_matches");
    for size in [10, 100, 500] {
        let candidates = candidate_pool(size);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &candidates,
            |bench, candidates| {
                bench.iter(|| black_box(matcher.find_matches(&base, candidates)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_overlap, bench_find_matches);
criterion_main!(benches);
