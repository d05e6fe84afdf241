//! Criterion micro-benchmarks for the spiral walk and region allocation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use homestead_bench::populated_registry;
use homestead_core::RegionCoords;
use homestead_registry::{SpiralCursor, SpiralWalk};

/// Benchmark: walk the first 10K spiral cells.
fn bench_spiral_walk_10k(c: &mut Criterion) {
    c.bench_function("spiral_walk_10k", |b| {
        b.iter(|| {
            for cell in SpiralWalk::new().take(10_000) {
                black_box(cell);
            }
        });
    });
}

/// Benchmark: locate the first gap behind 2,500 named cells from scratch.
fn bench_cursor_locate_2500(c: &mut Criterion) {
    let named: std::collections::HashSet<RegionCoords> =
        SpiralWalk::new().take(2_500).collect();

    c.bench_function("cursor_locate_2500", |b| {
        b.iter(|| {
            let cursor = SpiralCursor::locate(|cell| named.contains(&cell));
            black_box(cursor.next());
        });
    });
}

/// Benchmark: open 1,000 regions on top of a registry that already has 1,000.
fn bench_add_region_1k(c: &mut Criterion) {
    c.bench_function("add_region_1k", |b| {
        b.iter_batched(
            || populated_registry(1_000),
            |mut reg| {
                for _ in 0..1_000 {
                    black_box(reg.add_region());
                }
                reg
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_spiral_walk_10k,
    bench_cursor_locate_2500,
    bench_add_region_1k
);
criterion_main!(benches);
