//! Row-major matrix views over caller-owned `f32` buffers.
//!
//! [`MatrixRef`] and [`MatrixMut`] do not own memory. They pair a flat slice
//! with a [`Dims`] and guarantee, at construction, that the slice holds
//! exactly `rows * cols` elements (longer slices are trimmed).

use std::fmt;

use crate::error::ShapeError;

/// Matrix dimensions: `rows x cols`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Dims {
    /// Create dimensions for a `rows x cols` matrix.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Create dimensions for an `n x n` matrix.
    pub const fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }

    /// Number of elements, or `None` if `rows * cols` overflows.
    pub const fn len(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Whether the matrix has no elements.
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    fn checked_len(&self) -> Result<usize, ShapeError> {
        self.len().ok_or(ShapeError::SizeOverflow {
            rows: self.rows,
            cols: self.cols,
        })
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Validate operand dimensions for `C = A·B`.
///
/// Requires `A: M x K`, `B: K x N`, `C: M x N`.
pub fn check_gemm_dims(op: &'static str, a: Dims, b: Dims, c: Dims) -> Result<(), ShapeError> {
    if a.cols != b.rows || c.rows != a.rows || c.cols != b.cols {
        return Err(ShapeError::DimensionMismatch { op, a, b, c });
    }
    Ok(())
}

/// Read-only row-major matrix view.
#[derive(Clone, Copy, Debug)]
pub struct MatrixRef<'a> {
    data: &'a [f32],
    dims: Dims,
}

impl<'a> MatrixRef<'a> {
    /// View `data` as a `rows x cols` matrix.
    ///
    /// # Errors
    ///
    /// [`ShapeError::BufferTooSmall`] if `data` holds fewer than
    /// `rows * cols` elements, [`ShapeError::SizeOverflow`] if that product
    /// overflows.
    pub fn new(data: &'a [f32], rows: usize, cols: usize) -> Result<Self, ShapeError> {
        let dims = Dims::new(rows, cols);
        let len = dims.checked_len()?;
        if data.len() < len {
            return Err(ShapeError::BufferTooSmall {
                dims,
                len: data.len(),
            });
        }
        Ok(Self {
            data: &data[..len],
            dims,
        })
    }

    /// View `data` as an `n x n` matrix.
    pub fn square(data: &'a [f32], n: usize) -> Result<Self, ShapeError> {
        Self::new(data, n, n)
    }

    /// Matrix dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// The underlying elements, exactly `rows * cols` long.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Element at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is outside the matrix.
    pub fn at(&self, r: usize, c: usize) -> f32 {
        assert!(c < self.dims.cols, "column {c} out of range for {}", self.dims);
        self.data[r * self.dims.cols + c]
    }

    /// Row `r` as a slice.
    pub fn row(&self, r: usize) -> &'a [f32] {
        let data = self.data;
        let start = r * self.dims.cols;
        &data[start..start + self.dims.cols]
    }
}

/// Mutable row-major matrix view, used as a kernel destination.
#[derive(Debug)]
pub struct MatrixMut<'a> {
    data: &'a mut [f32],
    dims: Dims,
}

impl<'a> MatrixMut<'a> {
    /// View `data` as a mutable `rows x cols` matrix.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MatrixRef::new`].
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize) -> Result<Self, ShapeError> {
        let dims = Dims::new(rows, cols);
        let len = dims.checked_len()?;
        if data.len() < len {
            return Err(ShapeError::BufferTooSmall {
                dims,
                len: data.len(),
            });
        }
        Ok(Self {
            data: &mut data[..len],
            dims,
        })
    }

    /// View `data` as a mutable `n x n` matrix.
    pub fn square(data: &'a mut [f32], n: usize) -> Result<Self, ShapeError> {
        Self::new(data, n, n)
    }

    /// Matrix dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// The underlying elements, exactly `rows * cols` long.
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..]
    }

    /// Mutable access to the underlying elements.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data[..]
    }

    /// Element at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is outside the matrix.
    pub fn at(&self, r: usize, c: usize) -> f32 {
        assert!(c < self.dims.cols, "column {c} out of range for {}", self.dims);
        self.data[r * self.dims.cols + c]
    }

    /// Mutable row `r`.
    pub fn row_mut(&mut self, r: usize) -> &mut [f32] {
        let start = r * self.dims.cols;
        &mut self.data[start..start + self.dims.cols]
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Reborrow as a read-only view.
    pub fn view(&self) -> MatrixRef<'_> {
        MatrixRef {
            data: &self.data[..],
            dims: self.dims,
        }
    }
}
