//! Test utilities for EdgeCortex development.
//!
//! Provides a trusted double-precision reference multiply, seeded random
//! matrices, and [`check_allclose`], which reports the first element that
//! breaks a tolerance as a [`NumericMismatch`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;
use std::fmt;

use edgecortex_core::MatrixRef;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Absolute tolerance for comparing f32 GEMM outputs.
pub const GEMM_TOLERANCE: f32 = 1e-3;

/// Uniform `[0, 1)` values, `rows * cols` of them, from a seeded ChaCha8 RNG.
///
/// Same seed, same matrix, on every platform.
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..rows * cols).map(|_| rng.random::<f32>()).collect()
}

/// Seeded `n x n` matrix; see [`random_matrix`].
pub fn random_square(n: usize, seed: u64) -> Vec<f32> {
    random_matrix(n, n, seed)
}

/// `A·B` accumulated in f64 and rounded once to f32.
///
/// Independent of the kernels under test: plain `i, j, p` loops over
/// raw slices.
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn reference_matmul(a: MatrixRef<'_>, b: MatrixRef<'_>) -> Vec<f32> {
    assert_eq!(
        a.cols(),
        b.rows(),
        "reference_matmul: inner dimensions differ ({} vs {})",
        a.dims(),
        b.dims()
    );
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let (a, b) = (a.as_slice(), b.as_slice());
    let mut out = vec![0.0f32; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f64;
            for p in 0..k {
                sum += f64::from(a[i * k + p]) * f64::from(b[p * n + j]);
            }
            out[i * n + j] = sum as f32;
        }
    }
    out
}

/// Largest elementwise `|actual - expected|`. NaN if any pair is NaN.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn max_abs_diff(actual: &[f32], expected: &[f32]) -> f32 {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    actual
        .iter()
        .zip(expected)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f32, |acc, d| if d.is_nan() || acc.is_nan() { f32::NAN } else { acc.max(d) })
}

/// First element whose absolute difference exceeds the tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericMismatch {
    /// Flat index of the first offending element.
    pub index: usize,
    /// Row of the first offending element.
    pub row: usize,
    /// Column of the first offending element.
    pub col: usize,
    /// Reference value.
    pub expected: f32,
    /// Value under test.
    pub actual: f32,
    /// Tolerance that was exceeded.
    pub tolerance: f32,
    /// Largest difference over the whole matrix.
    pub max_abs_diff: f32,
}

impl fmt::Display for NumericMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "numeric mismatch at ({}, {}): expected {}, got {} (|diff| > {}, max diff {})",
            self.row, self.col, self.expected, self.actual, self.tolerance, self.max_abs_diff
        )
    }
}

impl Error for NumericMismatch {}

/// Check `actual` against `expected` elementwise with absolute tolerance.
///
/// `cols` is the row length used to report the offending coordinate.
/// NaN on either side is always a mismatch.
///
/// # Panics
///
/// Panics if the slices differ in length or `cols` is zero with
/// non-empty input.
pub fn check_allclose(
    actual: &[f32],
    expected: &[f32],
    cols: usize,
    tolerance: f32,
) -> Result<(), NumericMismatch> {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    let bad = actual
        .iter()
        .zip(expected)
        .position(|(x, y)| !((x - y).abs() <= tolerance));
    match bad {
        None => Ok(()),
        Some(index) => Err(NumericMismatch {
            index,
            row: index / cols,
            col: index % cols,
            expected: expected[index],
            actual: actual[index],
            tolerance,
            max_abs_diff: max_abs_diff(actual, expected),
        }),
    }
}

/// Panicking form of [`check_allclose`] for use inside tests.
#[track_caller]
pub fn assert_allclose(actual: &[f32], expected: &[f32], cols: usize, tolerance: f32) {
    if let Err(e) = check_allclose(actual, expected, cols, tolerance) {
        panic!("{e}");
    }
}
