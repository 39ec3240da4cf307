//! Shape and argument errors shared by the kernel crates.

use std::error::Error;
use std::fmt;

use crate::matrix::Dims;

/// Errors raised while validating matrix operands.
///
/// All of these are caller errors: they are detected before any element of
/// the destination is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Operand dimensions are incompatible for `C = A·B`.
    DimensionMismatch {
        /// Name of the operation that rejected the operands.
        op: &'static str,
        /// Dimensions of the left operand.
        a: Dims,
        /// Dimensions of the right operand.
        b: Dims,
        /// Dimensions of the destination.
        c: Dims,
    },
    /// The backing slice holds fewer than `rows * cols` elements.
    BufferTooSmall {
        /// Dimensions the caller asked for.
        dims: Dims,
        /// Actual slice length in elements.
        len: usize,
    },
    /// `rows * cols` does not fit in `usize`.
    SizeOverflow {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// Tile side must be at least one element.
    InvalidBlockSize {
        /// The rejected block size.
        block_size: usize,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { op, a, b, c } => {
                write!(f, "{op}: dimension mismatch: A is {a}, B is {b}, C is {c}")
            }
            Self::BufferTooSmall { dims, len } => {
                write!(
                    f,
                    "buffer too small for {dims} matrix: need {} elements, got {len}",
                    dims.rows.saturating_mul(dims.cols)
                )
            }
            Self::SizeOverflow { rows, cols } => {
                write!(f, "matrix size overflows usize: {rows}x{cols}")
            }
            Self::InvalidBlockSize { block_size } => {
                write!(f, "invalid block size {block_size}: must be positive")
            }
        }
    }
}

impl Error for ShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_all_operands() {
        let err = ShapeError::DimensionMismatch {
            op: "gemm_naive",
            a: Dims::new(2, 3),
            b: Dims::new(4, 2),
            c: Dims::new(2, 2),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("gemm_naive"));
        assert!(msg.contains("A is 2x3"));
        assert!(msg.contains("B is 4x2"));
        assert!(msg.contains("C is 2x2"));
    }

    #[test]
    fn buffer_too_small_reports_required_len() {
        let err = ShapeError::BufferTooSmall {
            dims: Dims::new(4, 4),
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "buffer too small for 4x4 matrix: need 16 elements, got 10"
        );
    }
}
