//! Kernel abstraction shared by the GEMM strategies.

use crate::error::ShapeError;
use crate::matrix::{MatrixMut, MatrixRef};

/// A matrix-multiplication strategy computing `C = A·B`.
///
/// Implementations share one contract: operands are validated before any
/// write, `C` is fully overwritten (never accumulated into), and `A` and
/// `B` are only read. Strategies differ in loop order and blocking, not
/// in result beyond floating-point rounding.
pub trait MatMul {
    /// Human-readable strategy name (used in benchmarks and diagnostics).
    fn name(&self) -> &str;

    /// Compute `c = a · b`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::DimensionMismatch`] if `a` is not `M x K`, `b` is not
    /// `K x N`, or `c` is not `M x N`. `c` is untouched on error.
    fn multiply(
        &self,
        a: MatrixRef<'_>,
        b: MatrixRef<'_>,
        c: &mut MatrixMut<'_>,
    ) -> Result<(), ShapeError>;
}
