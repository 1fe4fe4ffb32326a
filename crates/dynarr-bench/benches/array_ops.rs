//! Criterion micro-benchmarks for append, reserve, insert/erase and clone.
//!
//! Appends are measured against `Vec` and `SmallVec` as baselines for the
//! doubling schedule.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dynarr::{reserve, Cursor, DynamicArray};
use dynarr_bench::{append_profile, filled, insert_positions};
use smallvec::SmallVec;

/// Benchmark: N appends from empty, growing by the doubling schedule.
fn bench_push_from_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_from_empty");
    for n in append_profile() {
        group.bench_with_input(BenchmarkId::new("dynarr", n), &n, |b, &n| {
            b.iter(|| {
                let mut a = DynamicArray::new();
                for i in 0..n as u64 {
                    a.push(i);
                }
                black_box(a.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("vec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n as u64 {
                    v.push(i);
                }
                black_box(v.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("smallvec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v: SmallVec<[u64; 16]> = SmallVec::new();
                for i in 0..n as u64 {
                    v.push(i);
                }
                black_box(v.len())
            });
        });
    }
    group.finish();
}

/// Benchmark: N appends after reserving N (no reallocation).
fn bench_push_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_reserved");
    for n in append_profile() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut a = DynamicArray::with_reserve(reserve(n));
                for i in 0..n as u64 {
                    a.push(i);
                }
                black_box(a.capacity())
            });
        });
    }
    group.finish();
}

/// Benchmark: 1K inserts at deterministic pseudo-random offsets into 10K.
fn bench_insert_random(c: &mut Criterion) {
    let positions = insert_positions(10_000, 1_000, 42);
    c.bench_function("insert_random_1k_into_10k", |b| {
        b.iter(|| {
            let mut a = filled(10_000);
            for (i, &pos) in positions.iter().enumerate() {
                a.insert(Cursor::new(pos), i as u64);
            }
            black_box(a.len())
        });
    });
}

/// Benchmark: erase from the front until empty (worst-case shifting).
fn bench_erase_front(c: &mut Criterion) {
    c.bench_function("erase_front_2k", |b| {
        b.iter(|| {
            let mut a = filled(2_000);
            while !a.is_empty() {
                a.erase(a.begin());
            }
            black_box(a.capacity())
        });
    });
}

/// Benchmark: deep copy of a 100K-element array.
fn bench_clone(c: &mut Criterion) {
    let source = filled(100_000);
    c.bench_function("clone_100k", |b| {
        b.iter(|| black_box(source.clone()));
    });
}

criterion_group!(
    benches,
    bench_push_from_empty,
    bench_push_reserved,
    bench_insert_random,
    bench_erase_front,
    bench_clone
);
criterion_main!(benches);
