//! Criterion micro-benchmarks for indexed slot access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use slotframe_bench::{block_for, long_variable, wide_fixed, LONG_CAPACITY, WIDE_SLOTS};
use slotframe_core::SlotValue;
use slotframe_layout::Record;

/// Benchmark: read every slot of a 64-slot fixed record.
fn bench_fixed_get_all(c: &mut Criterion) {
    let ty = wide_fixed();
    let mut words = block_for(&ty);
    let rec = Record::from_words(&mut words, &ty).unwrap();
    c.bench_function("fixed_get_all_64", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for i in 0..WIDE_SLOTS {
                acc ^= rec.get_slot(black_box(i)).addr();
            }
            black_box(acc);
        });
    });
}

/// Benchmark: write every slot of a 64-slot fixed record.
fn bench_fixed_set_all(c: &mut Criterion) {
    let ty = wide_fixed();
    let mut words = block_for(&ty);
    let mut rec = Record::from_words(&mut words, &ty).unwrap();
    c.bench_function("fixed_set_all_64", |b| {
        b.iter(|| {
            for i in 0..WIDE_SLOTS {
                rec.set_slot(black_box(i), SlotValue::from_addr(i));
            }
        });
    });
}

/// Benchmark: read every element of a full 1024-element variable record.
/// Each access re-reads the length word.
fn bench_variable_get_all(c: &mut Criterion) {
    let ty = long_variable();
    let mut words = block_for(&ty);
    let rec = Record::with_length(&mut words, &ty, LONG_CAPACITY).unwrap();
    c.bench_function("variable_get_all_1024", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for i in 0..LONG_CAPACITY {
                acc ^= rec.get_slot(black_box(i)).addr();
            }
            black_box(acc);
        });
    });
}

/// Benchmark: replace one slot and release the old value through a closure.
fn bench_variable_set_with(c: &mut Criterion) {
    let ty = long_variable();
    let mut words = block_for(&ty);
    let mut rec = Record::with_length(&mut words, &ty, LONG_CAPACITY).unwrap();
    let mut released = 0usize;
    c.bench_function("variable_set_with", |b| {
        b.iter(|| {
            rec.set_slot_with(black_box(LONG_CAPACITY - 1), SlotValue::from_addr(7), |old| {
                released ^= old.addr();
                Ok::<(), ()>(())
            })
            .unwrap();
        });
    });
    black_box(released);
}

/// Benchmark: length query on each shape family.
fn bench_len(c: &mut Criterion) {
    let fixed_ty = wide_fixed();
    let mut fixed_words = block_for(&fixed_ty);
    let fixed = Record::from_words(&mut fixed_words, &fixed_ty).unwrap();

    let var_ty = long_variable();
    let mut var_words = block_for(&var_ty);
    let variable = Record::with_length(&mut var_words, &var_ty, 17).unwrap();

    c.bench_function("len_fixed", |b| b.iter(|| black_box(fixed.len())));
    c.bench_function("len_variable", |b| b.iter(|| black_box(variable.len())));
}

criterion_group!(
    benches,
    bench_fixed_get_all,
    bench_fixed_set_all,
    bench_variable_get_all,
    bench_variable_set_with,
    bench_len
);
criterion_main!(benches);
