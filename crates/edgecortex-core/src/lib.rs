//! Core types and traits for EdgeCortex.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! matrix views the kernels operate on, the shape error type, and the
//! [`MatMul`] trait both GEMM strategies implement.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod matrix;
pub mod traits;

pub use error::ShapeError;
pub use matrix::{check_gemm_dims, Dims, MatrixMut, MatrixRef};
pub use traits::MatMul;
