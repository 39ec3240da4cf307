//! Criterion benchmarks for naive vs tiled GEMM and a tiled block-size sweep.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use edgecortex_bench::{GemmInputs, BLOCK_SWEEP, STANDARD_SIZES};
use edgecortex_kernels::Tiled;

/// Benchmark: naive and tiled(32) side by side at each standard size.
fn bench_naive_vs_tiled(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm");
    group.sample_size(10);
    for n in STANDARD_SIZES {
        let mut inputs = GemmInputs::new(n, 42);
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, _| {
            b.iter(|| {
                inputs.run_naive().unwrap();
                black_box(inputs.c[0]);
            });
        });
        group.bench_with_input(BenchmarkId::new("tiled", n), &n, |b, _| {
            b.iter(|| {
                inputs.run_tiled(Tiled::DEFAULT_BLOCK_SIZE).unwrap();
                black_box(inputs.c[0]);
            });
        });
    }
    group.finish();
}

/// Benchmark: tiled kernel at N=256 across block sizes.
fn bench_block_sweep(c: &mut Criterion) {
    let n = 256;
    let mut inputs = GemmInputs::new(n, 7);
    let mut group = c.benchmark_group("gemm_tiled_block_sweep");
    group.sample_size(10);
    group.throughput(Throughput::Elements((2 * n * n * n) as u64));
    for block_size in BLOCK_SWEEP {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &bs| {
                b.iter(|| {
                    inputs.run_tiled(bs).unwrap();
                    black_box(inputs.c[0]);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_naive_vs_tiled, bench_block_sweep);
criterion_main!(benches);
