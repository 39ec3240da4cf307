//! Criterion micro-benchmarks for arena creation, bump allocation, and
//! writes through the byte view.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use edgecortex_arena::MemoryArena;

/// Benchmark: create and drop a 1MB arena (zeroed, page-aligned).
fn bench_arena_create_1mb(c: &mut Criterion) {
    c.bench_function("arena_create_1mb", |b| {
        b.iter(|| {
            let arena = MemoryArena::new(black_box(1 << 20)).unwrap();
            black_box(arena.size());
        });
    });
}

/// Benchmark: 1000 aligned 64-byte allocations followed by a reset.
fn bench_arena_allocate_1k(c: &mut Criterion) {
    let mut arena = MemoryArena::new(1 << 20).unwrap();
    c.bench_function("arena_allocate_1k", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(arena.allocate_aligned(black_box(48), 64).unwrap());
            }
            arena.reset();
        });
    });
}

/// Benchmark: fill a 64KB arena through the mutable view.
fn bench_arena_view_write_64k(c: &mut Criterion) {
    let mut arena = MemoryArena::new(64 * 1024).unwrap();
    let mut value = 0u8;
    c.bench_function("arena_view_write_64k", |b| {
        b.iter(|| {
            let mut view = arena.view_mut();
            view.fill(value);
            value = value.wrapping_add(1);
            black_box(view[view.len() - 1]);
        });
    });
}

criterion_group!(
    benches,
    bench_arena_create_1mb,
    bench_arena_allocate_1k,
    bench_arena_view_write_64k
);
criterion_main!(benches);
