//! Benchmark profiles and utilities for EdgeCortex.
//!
//! Provides the matrix sizes and block sizes the benches sweep, seeded
//! input generation, and [`compare_kernels`], which times naive against
//! tiled GEMM and verifies the tiled result:
//!
//! - [`STANDARD_SIZES`]: N = 128, 256, 512
//! - [`BLOCK_SWEEP`]: tile edges tried by the block-size sweep
//! - [`GemmInputs`]: seeded square A and B plus a zeroed C

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::{Duration, Instant};

use edgecortex_core::{MatrixMut, MatrixRef, ShapeError};
use edgecortex_kernels::{gemm_naive, gemm_tiled, Tiled};
use edgecortex_test_utils::{max_abs_diff, random_square, reference_matmul, GEMM_TOLERANCE};

/// Square sizes compared in the naive-vs-tiled benches.
pub const STANDARD_SIZES: [usize; 3] = [128, 256, 512];

/// Block sizes tried by the tiled sweep.
pub const BLOCK_SWEEP: [usize; 6] = [8, 16, 32, 48, 64, 128];

/// Seeded `n x n` operands and an output buffer.
pub struct GemmInputs {
    /// Edge length.
    pub n: usize,
    /// Left operand, row-major.
    pub a: Vec<f32>,
    /// Right operand, row-major.
    pub b: Vec<f32>,
    /// Output, zeroed.
    pub c: Vec<f32>,
}

impl GemmInputs {
    /// A and B uniform in `[0, 1)` from `seed` and `seed + 1`.
    pub fn new(n: usize, seed: u64) -> Self {
        Self {
            n,
            a: random_square(n, seed),
            b: random_square(n, seed.wrapping_add(1)),
            c: vec![0.0; n * n],
        }
    }

    /// Run the naive kernel into `c`.
    pub fn run_naive(&mut self) -> Result<(), ShapeError> {
        let a = MatrixRef::square(&self.a, self.n)?;
        let b = MatrixRef::square(&self.b, self.n)?;
        gemm_naive(a, b, &mut MatrixMut::square(&mut self.c, self.n)?)
    }

    /// Run the tiled kernel into `c`.
    pub fn run_tiled(&mut self, block_size: usize) -> Result<(), ShapeError> {
        let a = MatrixRef::square(&self.a, self.n)?;
        let b = MatrixRef::square(&self.b, self.n)?;
        gemm_tiled(a, b, &mut MatrixMut::square(&mut self.c, self.n)?, block_size)
    }
}

/// Timing and accuracy of one naive-vs-tiled comparison.
#[derive(Clone, Debug)]
pub struct Comparison {
    /// Edge length.
    pub n: usize,
    /// Tile edge used by the tiled kernel.
    pub block_size: usize,
    /// Best-of-`reps` naive time.
    pub naive: Duration,
    /// Best-of-`reps` tiled time.
    pub tiled: Duration,
    /// Largest `|tiled - reference|` over all elements.
    pub max_abs_diff: f32,
}

impl Comparison {
    /// `naive / tiled`; above 1.0 means tiling won.
    pub fn speedup(&self) -> f64 {
        self.naive.as_secs_f64() / self.tiled.as_secs_f64().max(f64::MIN_POSITIVE)
    }

    /// Whether the tiled output is within [`GEMM_TOLERANCE`] of the reference.
    pub fn passed(&self) -> bool {
        self.max_abs_diff <= GEMM_TOLERANCE
    }
}

fn best_of(reps: usize, mut f: impl FnMut() -> Result<(), ShapeError>) -> Result<Duration, ShapeError> {
    let mut best = Duration::MAX;
    for _ in 0..reps.max(1) {
        let start = Instant::now();
        f()?;
        best = best.min(start.elapsed());
    }
    Ok(best)
}

/// Time both kernels on seeded `n x n` inputs and check the tiled result
/// against the f64 reference.
pub fn compare_kernels(
    n: usize,
    block_size: usize,
    seed: u64,
    reps: usize,
) -> Result<Comparison, ShapeError> {
    let mut inputs = GemmInputs::new(n, seed);
    let naive = best_of(reps, || inputs.run_naive())?;
    let tiled = best_of(reps, || inputs.run_tiled(block_size))?;

    let reference = reference_matmul(
        MatrixRef::square(&inputs.a, n)?,
        MatrixRef::square(&inputs.b, n)?,
    );
    Ok(Comparison {
        n,
        block_size,
        naive,
        tiled,
        max_abs_diff: max_abs_diff(&inputs.c, &reference),
    })
}

/// [`compare_kernels`] with the default block size.
pub fn compare_default(n: usize, seed: u64, reps: usize) -> Result<Comparison, ShapeError> {
    compare_kernels(n, Tiled::DEFAULT_BLOCK_SIZE, seed, reps)
}
