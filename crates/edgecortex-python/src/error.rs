//! EcStatus -> Python exception mapping with recovery hints.

use edgecortex_ffi::EcStatus;
use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyValueError};
use pyo3::PyResult;

/// Check an FFI status code. Returns `Ok(())` on success, raises a typed
/// Python exception with a recovery hint on error.
pub(crate) fn check_status(code: i32) -> PyResult<()> {
    if code == EcStatus::Ok as i32 {
        return Ok(());
    }
    let (msg, hint) = error_detail(code);
    let full = format!("edgecortex error {code}: {msg}\n  Hint: {hint}");
    match code {
        // Caller's fault: bad shape, size, alignment or block size.
        c if c == EcStatus::InvalidArgument as i32 || c == EcStatus::BufferTooSmall as i32 => {
            Err(PyValueError::new_err(full))
        }
        c if c == EcStatus::OutOfCapacity as i32 || c == EcStatus::AllocationFailed as i32 => {
            Err(PyMemoryError::new_err(full))
        }
        _ => Err(PyRuntimeError::new_err(full)),
    }
}

/// Convert a Python integer argument to `usize`, raising `ValueError` for
/// negative values.
pub(crate) fn non_negative(name: &str, value: i64) -> PyResult<usize> {
    usize::try_from(value)
        .map_err(|_| PyValueError::new_err(format!("{name} must not be negative, got {value}")))
}

/// Returns `(message, recovery_hint)` for each FFI status code.
fn error_detail(code: i32) -> (&'static str, &'static str) {
    match code {
        -1 => (
            "invalid handle (already destroyed?)",
            "The MemoryArena has been destroyed. Don't call .destroy() and then \
             keep using the object; with a context manager, access is only \
             valid inside the `with` block.",
        ),
        -2 => (
            "invalid argument",
            "Check that A is MxK, B is KxN and C is MxN, that block_size is \
             positive, that C does not share memory with A or B, that the \
             arena size is positive, and that alignments are powers of two.",
        ),
        -3 => (
            "arena out of capacity",
            "The allocation does not fit in the remaining bytes. Check \
             arena.remaining(), create a larger MemoryArena, or call \
             arena.reset() once earlier offsets are no longer needed.",
        ),
        -4 => (
            "arena buffer allocation failed (out of memory)",
            "The system could not provide the requested arena size. \
             Request a smaller MemoryArena.",
        ),
        -5 => (
            "buffer too small for its declared shape",
            "An array holds fewer elements than rows * cols. Pass \
             C-contiguous float32 arrays of the declared shape.",
        ),
        -6 => (
            "internal error",
            "A lock was poisoned by an earlier failure. Recreate the \
             MemoryArena; if it persists, restart the interpreter.",
        ),
        -128 => (
            "panic caught at the FFI boundary",
            "This is a bug in edgecortex. Please report it with the inputs \
             that triggered it.",
        ),
        _ => (
            "unknown edgecortex error",
            "An unrecognized error code was returned from the FFI layer. \
             This may indicate a version mismatch between the Python \
             bindings and the native library.",
        ),
    }
}
