//! Single-precision GEMM kernels for EdgeCortex.
//!
//! Two strategies compute the same `C = A·B` over row-major `f32` views:
//!
//! - [`gemm_naive`]: one dot product per output cell, no blocking. The
//!   correctness baseline.
//! - [`gemm_tiled`]: splits the `(i, j, k)` iteration space into square
//!   tiles so each tile's working set stays cache-resident.
//!
//! Both overwrite the destination and never allocate. [`GemmKernel`]
//! selects a strategy from an optional block size.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kernel;
pub mod naive;
pub mod tiled;

pub use edgecortex_core::{MatMul, MatrixMut, MatrixRef, ShapeError};
pub use kernel::GemmKernel;
pub use naive::{gemm_naive, Naive};
pub use tiled::{gemm_tiled, Tiled};
