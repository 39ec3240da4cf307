//! Unblocked triple-loop GEMM.

use edgecortex_core::{check_gemm_dims, MatMul, MatrixMut, MatrixRef, ShapeError};

/// Compute `c = a · b` with one f32 dot product per output cell.
///
/// `a` is `M x K`, `b` is `K x N`, `c` is `M x N`. Every element of `c` is
/// overwritten. Walks `b` column-wise, so large `N` thrashes the cache;
/// use [`gemm_tiled`](crate::gemm_tiled) for anything performance-sensitive.
///
/// # Errors
///
/// [`ShapeError::DimensionMismatch`] on incompatible operands. `c` is left
/// untouched.
pub fn gemm_naive(
    a: MatrixRef<'_>,
    b: MatrixRef<'_>,
    c: &mut MatrixMut<'_>,
) -> Result<(), ShapeError> {
    check_gemm_dims("gemm_naive", a.dims(), b.dims(), c.dims())?;

    let n = b.cols();
    let b = b.as_slice();
    for i in 0..a.rows() {
        let a_row = a.row(i);
        let c_row = c.row_mut(i);
        for (j, c_ij) in c_row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (p, &a_ip) in a_row.iter().enumerate() {
                sum += a_ip * b[p * n + j];
            }
            *c_ij = sum;
        }
    }
    Ok(())
}

/// The unblocked strategy as a [`MatMul`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Naive;

impl MatMul for Naive {
    fn name(&self) -> &str {
        "naive"
    }

    fn multiply(
        &self,
        a: MatrixRef<'_>,
        b: MatrixRef<'_>,
        c: &mut MatrixMut<'_>,
    ) -> Result<(), ShapeError> {
        gemm_naive(a, b, c)
    }
}
