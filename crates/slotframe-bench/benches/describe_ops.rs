//! Criterion micro-benchmarks for descriptor construction and caching.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use slotframe_core::{DescriptorCache, HostLayout, SlotPlan};

/// Benchmark: plan and validate a descriptor with every optional part.
fn bench_describe(c: &mut Criterion) {
    let plan = SlotPlan::variable(32)
        .with_dict()
        .with_weakref()
        .with_trailing_fields(3);
    c.bench_function("describe_full_plan", |b| {
        b.iter(|| black_box(plan.describe("Bench", HostLayout::native()).unwrap()));
    });
}

/// Benchmark: cache hit for a previously described type.
fn bench_cache_hit(c: &mut Criterion) {
    let mut cache = DescriptorCache::default();
    let plan = SlotPlan::fixed(8).with_dict();
    for i in 0..64 {
        cache
            .get_or_describe(&format!("T{i}"), SlotPlan::fixed(i))
            .unwrap();
    }
    cache.get_or_describe("Hot", plan).unwrap();
    c.bench_function("cache_hit", |b| {
        b.iter(|| black_box(cache.get_or_describe("Hot", plan).unwrap()));
    });
}

criterion_group!(benches, bench_describe, bench_cache_hit);
criterion_main!(benches);
