//! `gemm_naive` / `gemm_tiled`: in-place `C = A·B` over numpy float32
//! matrices.
//!
//! A and B are borrowed read-only and C read-write through numpy's borrow
//! tracking, then handed to the FFI layer as raw addresses with the GIL
//! released. The FFI layer checks shapes and rejects a C whose bytes
//! overlap A or B.

use numpy::{
    PyArray2, PyArrayMethods, PyReadonlyArray2, PyReadwriteArray2, PyUntypedArrayMethods,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use edgecortex_ffi::{ec_gemm_naive, ec_gemm_tiled};
use edgecortex_kernels::Tiled;

use crate::error::{check_status, non_negative};

fn require_c_contiguous(name: &str, arr: &Bound<'_, PyArray2<f32>>) -> PyResult<()> {
    if !arr.is_c_contiguous() {
        return Err(PyValueError::new_err(format!(
            "{name} must be a C-contiguous float32 array"
        )));
    }
    Ok(())
}

/// Shared borrow of an input operand.
fn borrow_input<'py>(
    name: &str,
    arr: &Bound<'py, PyArray2<f32>>,
) -> PyResult<PyReadonlyArray2<'py, f32>> {
    require_c_contiguous(name, arr)?;
    arr.try_readonly()
        .map_err(|e| PyValueError::new_err(format!("{name} cannot be read: {e}")))
}

/// Exclusive borrow of the output. Fails for read-only arrays and for an
/// output that is already borrowed as an input.
fn borrow_output<'py>(
    name: &str,
    arr: &Bound<'py, PyArray2<f32>>,
) -> PyResult<PyReadwriteArray2<'py, f32>> {
    require_c_contiguous(name, arr)?;
    arr.try_readwrite()
        .map_err(|e| PyValueError::new_err(format!("{name} cannot be written: {e}")))
}

/// Address and `(rows, cols)` of a borrowed input.
fn input_parts(name: &str, arr: &PyReadonlyArray2<'_, f32>) -> PyResult<(usize, usize, usize)> {
    let data = arr
        .as_slice()
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))?;
    let shape = arr.shape();
    Ok((data.as_ptr() as usize, shape[0], shape[1]))
}

/// Address and `(rows, cols)` of the borrowed output.
fn output_parts(
    name: &str,
    arr: &mut PyReadwriteArray2<'_, f32>,
) -> PyResult<(usize, usize, usize)> {
    let (rows, cols) = {
        let shape = arr.shape();
        (shape[0], shape[1])
    };
    let data = arr
        .as_slice_mut()
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))?;
    Ok((data.as_mut_ptr() as usize, rows, cols))
}

/// Reference triple-loop multiply. Overwrites `c` with `a @ b`.
///
/// Args:
///     a: float32 array of shape (M, K).
///     b: float32 array of shape (K, N).
///     c: float32 array of shape (M, N), written in place.
///
/// Raises:
///     ValueError: On mismatched shapes, non-contiguous arrays, a read-only
///         `c`, or if `c` shares memory with `a` or `b`.
#[pyfunction]
pub(crate) fn gemm_naive(
    py: Python<'_>,
    a: &Bound<'_, PyArray2<f32>>,
    b: &Bound<'_, PyArray2<f32>>,
    c: &Bound<'_, PyArray2<f32>>,
) -> PyResult<()> {
    let a = borrow_input("a", a)?;
    let b = borrow_input("b", b)?;
    let mut c = borrow_output("c", c)?;
    let (pa, ar, ac) = input_parts("a", &a)?;
    let (pb, br, bc) = input_parts("b", &b)?;
    let (pc, cr, cc) = output_parts("c", &mut c)?;
    // Release GIL: pure compute over caller-owned buffers.
    let status = py.detach(|| {
        ec_gemm_naive(
            pa as *const f32,
            ar,
            ac,
            pb as *const f32,
            br,
            bc,
            pc as *mut f32,
            cr,
            cc,
        )
    });
    check_status(status)
}

/// Cache-blocked multiply with square tiles. Overwrites `c` with `a @ b`.
///
/// Any positive `block_size` is valid; tiles are clipped at the edges.
///
/// Raises:
///     ValueError: As for `gemm_naive`, or if `block_size` is not positive.
#[pyfunction]
#[pyo3(signature = (a, b, c, block_size=Tiled::DEFAULT_BLOCK_SIZE as i64))]
pub(crate) fn gemm_tiled(
    py: Python<'_>,
    a: &Bound<'_, PyArray2<f32>>,
    b: &Bound<'_, PyArray2<f32>>,
    c: &Bound<'_, PyArray2<f32>>,
    block_size: i64,
) -> PyResult<()> {
    let block_size = non_negative("block_size", block_size)?;
    let a = borrow_input("a", a)?;
    let b = borrow_input("b", b)?;
    let mut c = borrow_output("c", c)?;
    let (pa, ar, ac) = input_parts("a", &a)?;
    let (pb, br, bc) = input_parts("b", &b)?;
    let (pc, cr, cc) = output_parts("c", &mut c)?;
    // Release GIL: pure compute over caller-owned buffers.
    let status = py.detach(|| {
        ec_gemm_tiled(
            pa as *const f32,
            ar,
            ac,
            pb as *const f32,
            br,
            bc,
            pc as *mut f32,
            cr,
            cc,
            block_size,
        )
    });
    check_status(status)
}
