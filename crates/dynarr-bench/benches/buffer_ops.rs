//! Criterion micro-benchmarks for raw buffer allocation and swap.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dynarr::Buffer;

/// Benchmark: allocate and free a 64K-slot block.
fn bench_buffer_alloc(c: &mut Criterion) {
    c.bench_function("buffer_alloc_64k", |b| {
        b.iter(|| {
            let buf: Buffer<u64> = Buffer::with_slots(65_536);
            black_box(buf.slots())
        });
    });
}

/// Benchmark: allocate a 64K-slot block filled with defaults.
fn bench_buffer_from_default(c: &mut Criterion) {
    c.bench_function("buffer_from_default_64k", |b| {
        b.iter(|| {
            let buf: Buffer<u64> = Buffer::from_default(65_536);
            black_box(buf.as_ptr())
        });
    });
}

/// Benchmark: O(1) swap of two owned blocks.
fn bench_buffer_swap(c: &mut Criterion) {
    let mut a: Buffer<u64> = Buffer::with_slots(1_024);
    let mut b: Buffer<u64> = Buffer::with_slots(2_048);
    c.bench_function("buffer_swap", |bench| {
        bench.iter(|| {
            a.swap(&mut b);
            black_box(a.slots())
        });
    });
}

criterion_group!(
    benches,
    bench_buffer_alloc,
    bench_buffer_from_default,
    bench_buffer_swap
);
criterion_main!(benches);
