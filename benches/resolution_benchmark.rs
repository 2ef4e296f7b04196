//! Resolution benchmarks.
//!
//! Run with:
//! ```
//! cargo bench --bench resolution_benchmark
//! ```

#[path = "../src/test_support.rs"]
mod test_support;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use terralabel::model::OverlapPass;
use terralabel::{aggregate, AssignmentMode, AttributionConfig, ResolutionDriver};
use test_support::generate_feed;

// =============================================================================
// AGGREGATION
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    for count in [10_000u32, 100_000] {
        let generated = generate_feed(count, 0.3, 0.3, 42);
        group.throughput(Throughput::Elements(generated.feed.region.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("region_and_ocean", count),
            &generated.feed,
            |b, feed| {
                b.iter(|| {
                    black_box(
                        aggregate([
                            (OverlapPass::Region, feed.region.clone()),
                            (OverlapPass::Ocean, feed.ocean.clone()),
                        ])
                        .unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

// =============================================================================
// RESOLUTION
// =============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    let generated = generate_feed(100_000, 0.3, 0.0, 42);
    let map = aggregate([(OverlapPass::Region, generated.feed.region)]).unwrap();
    group.throughput(Throughput::Elements(map.len() as u64));

    for workers in [1usize, 2, 4, 8] {
        let driver = ResolutionDriver::new(&AttributionConfig {
            workers,
            parallel_border: true,
            ..Default::default()
        })
        .unwrap();

        for mode in [AssignmentMode::Dominant, AssignmentMode::Border] {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), workers),
                &map,
                |b, map| b.iter(|| black_box(driver.resolve(map, mode).unwrap())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_resolve);
criterion_main!(benches);
