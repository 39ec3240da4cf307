//! Strategy selection over the two GEMM kernels.

use edgecortex_core::{MatMul, MatrixMut, MatrixRef, ShapeError};

use crate::naive::Naive;
use crate::tiled::Tiled;

/// A GEMM strategy chosen at runtime.
///
/// Dispatches statically to [`Naive`] or [`Tiled`]; both share the
/// [`MatMul`] contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GemmKernel {
    /// Unblocked triple loop.
    Naive(Naive),
    /// Cache-blocked loop nest.
    Tiled(Tiled),
}

impl GemmKernel {
    /// Select a strategy for an `n`-sized problem.
    ///
    /// No block size, or one covering the whole problem (`>= n`), selects
    /// the unblocked kernel: a single tile is the naive loop with extra
    /// bookkeeping.
    ///
    /// # Errors
    ///
    /// [`ShapeError::InvalidBlockSize`] if `block_size` is `Some(0)`.
    pub fn for_block_size(block_size: Option<usize>, n: usize) -> Result<Self, ShapeError> {
        match block_size {
            None => Ok(Self::Naive(Naive)),
            Some(0) => Err(ShapeError::InvalidBlockSize { block_size: 0 }),
            Some(bs) if bs >= n => Ok(Self::Naive(Naive)),
            Some(bs) => Tiled::new(bs).map(Self::Tiled),
        }
    }

    /// Tile side, or `None` for the unblocked kernel.
    pub fn block_size(&self) -> Option<usize> {
        match self {
            Self::Naive(_) => None,
            Self::Tiled(t) => Some(t.block_size()),
        }
    }
}

impl Default for GemmKernel {
    fn default() -> Self {
        Self::Tiled(Tiled::default())
    }
}

impl From<Naive> for GemmKernel {
    fn from(k: Naive) -> Self {
        Self::Naive(k)
    }
}

impl From<Tiled> for GemmKernel {
    fn from(k: Tiled) -> Self {
        Self::Tiled(k)
    }
}

impl MatMul for GemmKernel {
    fn name(&self) -> &str {
        match self {
            Self::Naive(k) => k.name(),
            Self::Tiled(k) => k.name(),
        }
    }

    fn multiply(
        &self,
        a: MatrixRef<'_>,
        b: MatrixRef<'_>,
        c: &mut MatrixMut<'_>,
    ) -> Result<(), ShapeError> {
        match self {
            Self::Naive(k) => k.multiply(a, b, c),
            Self::Tiled(k) => k.multiply(a, b, c),
        }
    }
}
