//! GEMM FFI: `C = A·B` over caller-owned row-major f32 buffers.
//!
//! Buffers are borrowed for the duration of the call only. The output
//! must not overlap either input; overlapping ranges are rejected with
//! `INVALID_ARGUMENT` before any slice is formed.

use std::mem::{align_of, size_of};
use std::ops::Range;

use edgecortex_core::{MatrixMut, MatrixRef};
use edgecortex_kernels::{gemm_naive, gemm_tiled};

use crate::status::EcStatus;

/// Element count and byte range of a `rows x cols` f32 buffer at `ptr`.
///
/// Rejects null or misaligned pointers for non-empty shapes, and shapes
/// whose byte size overflows.
fn byte_range(ptr: *const f32, rows: usize, cols: usize) -> Result<(usize, Range<usize>), EcStatus> {
    let len = rows.checked_mul(cols).ok_or(EcStatus::InvalidArgument)?;
    if len == 0 {
        return Ok((0, 0..0));
    }
    if ptr.is_null() || (ptr as usize) % align_of::<f32>() != 0 {
        return Err(EcStatus::InvalidArgument);
    }
    let start = ptr as usize;
    let bytes = len
        .checked_mul(size_of::<f32>())
        .filter(|&b| b <= isize::MAX as usize)
        .ok_or(EcStatus::InvalidArgument)?;
    let end = start.checked_add(bytes).ok_or(EcStatus::InvalidArgument)?;
    Ok((len, start..end))
}

fn overlaps(x: &Range<usize>, y: &Range<usize>) -> bool {
    !x.is_empty() && !y.is_empty() && x.start < y.end && y.start < x.end
}

#[allow(clippy::too_many_arguments)]
#[allow(unsafe_code)]
fn run_gemm(
    a: *const f32,
    a_rows: usize,
    a_cols: usize,
    b: *const f32,
    b_rows: usize,
    b_cols: usize,
    c: *mut f32,
    c_rows: usize,
    c_cols: usize,
    block_size: Option<usize>,
) -> i32 {
    let checked = (|| -> Result<(usize, usize, usize), EcStatus> {
        let (a_len, a_range) = byte_range(a, a_rows, a_cols)?;
        let (b_len, b_range) = byte_range(b, b_rows, b_cols)?;
        let (c_len, c_range) = byte_range(c, c_rows, c_cols)?;
        if overlaps(&c_range, &a_range) || overlaps(&c_range, &b_range) {
            return Err(EcStatus::InvalidArgument);
        }
        Ok((a_len, b_len, c_len))
    })();
    let (a_len, b_len, c_len) = match checked {
        Ok(lens) => lens,
        Err(status) => return status as i32,
    };

    // SAFETY: each pointer is non-null and aligned when its length is
    // non-zero, and valid for that many elements per caller contract.
    // C does not overlap A or B (checked above), so the mutable borrow
    // is exclusive.
    let (a, b, c) = unsafe {
        (
            slice_or_empty(a, a_len),
            slice_or_empty(b, b_len),
            slice_or_empty_mut(c, c_len),
        )
    };

    let result = MatrixRef::new(a, a_rows, a_cols).and_then(|av| {
        let bv = MatrixRef::new(b, b_rows, b_cols)?;
        let mut cv = MatrixMut::new(c, c_rows, c_cols)?;
        match block_size {
            None => gemm_naive(av, bv, &mut cv),
            Some(bs) => gemm_tiled(av, bv, &mut cv, bs),
        }
    });
    match result {
        Ok(()) => EcStatus::Ok as i32,
        Err(e) => EcStatus::from(&e) as i32,
    }
}

#[allow(unsafe_code)]
unsafe fn slice_or_empty<'a>(ptr: *const f32, len: usize) -> &'a [f32] {
    if len == 0 {
        &[]
    } else {
        // SAFETY: forwarded from the caller.
        unsafe { std::slice::from_raw_parts(ptr, len) }
    }
}

#[allow(unsafe_code)]
unsafe fn slice_or_empty_mut<'a>(ptr: *mut f32, len: usize) -> &'a mut [f32] {
    if len == 0 {
        &mut []
    } else {
        // SAFETY: forwarded from the caller.
        unsafe { std::slice::from_raw_parts_mut(ptr, len) }
    }
}

/// Reference triple-loop multiply: `C[a_rows x b_cols] = A[a_rows x a_cols] · B[b_rows x b_cols]`.
///
/// Returns `INVALID_ARGUMENT` for mismatched shapes, null pointers with a
/// non-empty shape, or C overlapping A or B. C is overwritten, not
/// accumulated into.
#[no_mangle]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn ec_gemm_naive(
    a: *const f32,
    a_rows: usize,
    a_cols: usize,
    b: *const f32,
    b_rows: usize,
    b_cols: usize,
    c: *mut f32,
    c_rows: usize,
    c_cols: usize,
) -> i32 {
    ffi_guard!({ run_gemm(a, a_rows, a_cols, b, b_rows, b_cols, c, c_rows, c_cols, None) })
}

/// Cache-blocked multiply with square tiles of `block_size`.
///
/// Same contract as [`ec_gemm_naive`]; additionally `block_size == 0`
/// returns `INVALID_ARGUMENT`. Any positive block size is valid, including
/// ones that do not divide the dimensions.
#[no_mangle]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn ec_gemm_tiled(
    a: *const f32,
    a_rows: usize,
    a_cols: usize,
    b: *const f32,
    b_rows: usize,
    b_cols: usize,
    c: *mut f32,
    c_rows: usize,
    c_cols: usize,
    block_size: usize,
) -> i32 {
    ffi_guard!({
        run_gemm(
            a,
            a_rows,
            a_cols,
            b,
            b_rows,
            b_cols,
            c,
            c_rows,
            c_cols,
            Some(block_size),
        )
    })
}
