//! Cache-blocked GEMM.
//!
//! The iteration space is cut into `block_size`-sided tiles along all three
//! dimensions. Inside a tile the loop order is `i, p, j` so the innermost
//! loop streams contiguous rows of `B` and `C`, which the compiler can
//! vectorise. Edge tiles are clipped to the matrix bounds.

use std::num::NonZeroUsize;

use edgecortex_core::{check_gemm_dims, MatMul, MatrixMut, MatrixRef, ShapeError};

/// Compute `c = a · b` in `block_size x block_size` tiles.
///
/// Produces the same result as [`gemm_naive`](crate::gemm_naive) up to
/// floating-point summation order. `block_size` need not divide any
/// dimension.
///
/// # Errors
///
/// [`ShapeError::InvalidBlockSize`] if `block_size` is zero,
/// [`ShapeError::DimensionMismatch`] on incompatible operands. `c` is left
/// untouched on error.
pub fn gemm_tiled(
    a: MatrixRef<'_>,
    b: MatrixRef<'_>,
    c: &mut MatrixMut<'_>,
    block_size: usize,
) -> Result<(), ShapeError> {
    if block_size == 0 {
        return Err(ShapeError::InvalidBlockSize { block_size });
    }
    check_gemm_dims("gemm_tiled", a.dims(), b.dims(), c.dims())?;

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    tracing::debug!(m, k, n, block_size, "gemm_tiled");

    c.fill(0.0);
    let a = a.as_slice();
    let b = b.as_slice();
    let c = c.as_mut_slice();

    for i0 in (0..m).step_by(block_size) {
        let i_end = i0.saturating_add(block_size).min(m);
        for j0 in (0..n).step_by(block_size) {
            let j_end = j0.saturating_add(block_size).min(n);
            for p0 in (0..k).step_by(block_size) {
                let p_end = p0.saturating_add(block_size).min(k);

                for i in i0..i_end {
                    let a_row = &a[i * k + p0..i * k + p_end];
                    let c_row = &mut c[i * n + j0..i * n + j_end];
                    for (p, &a_ip) in (p0..p_end).zip(a_row) {
                        let b_row = &b[p * n + j0..p * n + j_end];
                        for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                            *c_ij += a_ip * b_pj;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// The cache-blocked strategy as a [`MatMul`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tiled {
    block_size: NonZeroUsize,
}

impl Tiled {
    /// Default tile side. A 32x32 f32 tile is 4KB, so the three tiles in
    /// flight fit in a typical 32KB L1 data cache.
    pub const DEFAULT_BLOCK_SIZE: usize = 32;

    /// Create a tiled strategy with the given tile side.
    ///
    /// # Errors
    ///
    /// [`ShapeError::InvalidBlockSize`] if `block_size` is zero.
    pub fn new(block_size: usize) -> Result<Self, ShapeError> {
        NonZeroUsize::new(block_size)
            .map(|block_size| Self { block_size })
            .ok_or(ShapeError::InvalidBlockSize { block_size })
    }

    /// Tile side in elements.
    pub fn block_size(&self) -> usize {
        self.block_size.get()
    }
}

impl Default for Tiled {
    fn default() -> Self {
        Self {
            block_size: NonZeroUsize::new(Self::DEFAULT_BLOCK_SIZE)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl MatMul for Tiled {
    fn name(&self) -> &str {
        "tiled"
    }

    fn multiply(
        &self,
        a: MatrixRef<'_>,
        b: MatrixRef<'_>,
        c: &mut MatrixMut<'_>,
    ) -> Result<(), ShapeError> {
        gemm_tiled(a, b, c, self.block_size.get())
    }
}
