//! MemoryArena: Python wrapper around the arena FFI, exporting its bytes
//! through the buffer protocol.
//!
//! `numpy.array(arena, copy=False)` and `memoryview(arena)` see the arena's
//! memory directly. Each export holds a strong reference to the arena
//! object and bumps an export counter; `reset()` and `destroy()` raise
//! `BufferError` while any export is alive.

use std::ffi::{c_int, c_void};
use std::sync::atomic::{AtomicUsize, Ordering};

use pyo3::exceptions::{PyBufferError, PyRuntimeError};
use pyo3::ffi;
use pyo3::prelude::*;

use edgecortex_arena::ArenaConfig;
use edgecortex_ffi::{
    ec_arena_allocate, ec_arena_allocate_aligned, ec_arena_create, ec_arena_data,
    ec_arena_destroy, ec_arena_remaining, ec_arena_reset, ec_arena_size, ec_arena_used,
};

use crate::error::{check_status, non_negative};

/// A page-aligned linear memory arena.
///
/// Capacity is the requested size rounded up to 4096 bytes. `allocate(n)`
/// returns the byte offset of `n` fresh bytes; there is no per-allocation
/// free. The whole buffer is visible as a writable uint8 buffer.
#[pyclass(module = "edgecortex_core")]
pub(crate) struct MemoryArena {
    handle: Option<u64>,
    exports: AtomicUsize,
}

#[pymethods]
impl MemoryArena {
    /// Create an arena of at least `size_bytes` bytes.
    ///
    /// Raises:
    ///     ValueError: If `size_bytes` is not positive.
    ///     MemoryError: If the buffer cannot be allocated.
    #[new]
    fn new(py: Python<'_>, size_bytes: i64) -> PyResult<Self> {
        let size_bytes = non_negative("size_bytes", size_bytes)?;
        let (status, handle) = py.detach(|| {
            let mut h: u64 = 0;
            let s = ec_arena_create(size_bytes, &mut h);
            (s, h)
        });
        check_status(status)?;
        Ok(MemoryArena {
            handle: Some(handle),
            exports: AtomicUsize::new(0),
        })
    }

    /// Reserve `n` bytes and return their offset.
    ///
    /// Raises:
    ///     ValueError: If `n` is negative.
    ///     MemoryError: If fewer than `n` bytes remain; `used()` is unchanged.
    fn allocate(&self, py: Python<'_>, n: i64) -> PyResult<usize> {
        let h = self.require_handle()?;
        let n = non_negative("n", n)?;
        let (status, offset) = py.detach(|| {
            let mut off = 0usize;
            let s = ec_arena_allocate(h, n, &mut off);
            (s, off)
        });
        check_status(status)?;
        Ok(offset)
    }

    /// Reserve `n` bytes at an address that is a multiple of `alignment`.
    ///
    /// Raises:
    ///     ValueError: If `n` is negative or `alignment` is not a power of two.
    ///     MemoryError: If padding plus `n` bytes do not fit.
    #[pyo3(signature = (n, alignment=ArenaConfig::DEFAULT_ALIGNMENT as i64))]
    fn allocate_aligned(&self, py: Python<'_>, n: i64, alignment: i64) -> PyResult<usize> {
        let h = self.require_handle()?;
        let n = non_negative("n", n)?;
        let alignment = non_negative("alignment", alignment)?;
        let (status, offset) = py.detach(|| {
            let mut off = 0usize;
            let s = ec_arena_allocate_aligned(h, n, alignment, &mut off);
            (s, off)
        });
        check_status(status)?;
        Ok(offset)
    }

    /// Rewind to offset 0 without clearing bytes.
    ///
    /// Raises:
    ///     BufferError: While a memoryview or numpy array of the arena exists.
    fn reset(&self, py: Python<'_>) -> PyResult<()> {
        let h = self.require_handle()?;
        self.require_no_exports("reset")?;
        check_status(py.detach(|| ec_arena_reset(h)))
    }

    /// Aligned capacity in bytes.
    fn size(&self) -> PyResult<usize> {
        self.query(ec_arena_size)
    }

    /// Bytes allocated since construction or the last reset.
    fn used(&self) -> PyResult<usize> {
        self.query(ec_arena_used)
    }

    /// Bytes still available.
    fn remaining(&self) -> PyResult<usize> {
        self.query(ec_arena_remaining)
    }

    fn __len__(&self) -> PyResult<usize> {
        self.size()
    }

    fn __repr__(&self) -> String {
        match (self.size(), self.used()) {
            (Ok(size), Ok(used)) => format!("MemoryArena(size={size}, used={used})"),
            _ => "MemoryArena(<destroyed>)".to_string(),
        }
    }

    /// Explicitly release the arena's memory.
    ///
    /// Raises:
    ///     BufferError: While a memoryview or numpy array of the arena exists.
    fn destroy(&mut self, py: Python<'_>) -> PyResult<()> {
        self.require_no_exports("destroy")?;
        if let Some(h) = self.handle.take() {
            py.detach(|| ec_arena_destroy(h));
        }
        Ok(())
    }

    fn __enter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    #[pyo3(signature = (_exc_type=None, _exc_val=None, _exc_tb=None))]
    fn __exit__(
        &mut self,
        py: Python<'_>,
        _exc_type: Option<&Bound<'_, PyAny>>,
        _exc_val: Option<&Bound<'_, PyAny>>,
        _exc_tb: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<()> {
        self.destroy(py)
    }

    /// Export the whole buffer as a 1-D writable uint8 buffer.
    #[allow(unsafe_code)]
    unsafe fn __getbuffer__(
        slf: Bound<'_, Self>,
        view: *mut ffi::Py_buffer,
        flags: c_int,
    ) -> PyResult<()> {
        if view.is_null() {
            return Err(PyBufferError::new_err("view is null"));
        }
        let (ptr, len) = {
            let this = slf
                .try_borrow()
                .map_err(|_| PyBufferError::new_err("MemoryArena is busy in another call"))?;
            let h = this.require_handle()?;
            let mut ptr: *mut u8 = std::ptr::null_mut();
            let mut len = 0usize;
            check_status(ec_arena_data(h, &mut ptr, &mut len))?;
            this.exports.fetch_add(1, Ordering::AcqRel);
            (ptr, len)
        };

        // SAFETY: view is non-null and points to a Py_buffer the caller
        // owns. The arena's buffer stays allocated while `obj` holds a
        // reference, because destroy() refuses while exports > 0.
        unsafe {
            (*view).obj = slf.into_any().into_ptr();
            (*view).buf = ptr.cast::<c_void>();
            (*view).len = len as ffi::Py_ssize_t;
            (*view).readonly = 0;
            (*view).itemsize = 1;
            (*view).format = if (flags & ffi::PyBUF_FORMAT) == ffi::PyBUF_FORMAT {
                c"B".as_ptr().cast_mut()
            } else {
                std::ptr::null_mut()
            };
            (*view).ndim = 1;
            (*view).shape = if (flags & ffi::PyBUF_ND) == ffi::PyBUF_ND {
                &mut (*view).len
            } else {
                std::ptr::null_mut()
            };
            (*view).strides = if (flags & ffi::PyBUF_STRIDES) == ffi::PyBUF_STRIDES {
                &mut (*view).itemsize
            } else {
                std::ptr::null_mut()
            };
            (*view).suboffsets = std::ptr::null_mut();
            (*view).internal = std::ptr::null_mut();
        }
        Ok(())
    }

    #[allow(unsafe_code)]
    unsafe fn __releasebuffer__(&self, _view: *mut ffi::Py_buffer) {
        self.exports.fetch_sub(1, Ordering::AcqRel);
    }
}

impl MemoryArena {
    fn require_handle(&self) -> PyResult<u64> {
        self.handle
            .ok_or_else(|| PyRuntimeError::new_err("MemoryArena already destroyed"))
    }

    fn require_no_exports(&self, op: &str) -> PyResult<()> {
        let n = self.exports.load(Ordering::Acquire);
        if n > 0 {
            return Err(PyBufferError::new_err(format!(
                "cannot {op} MemoryArena: {n} buffer export(s) still alive \
                 (release memoryviews / numpy arrays first)"
            )));
        }
        Ok(())
    }

    fn query(&self, f: extern "C" fn(u64, *mut usize) -> i32) -> PyResult<usize> {
        let h = self.require_handle()?;
        let mut out = 0usize;
        check_status(f(h, &mut out))?;
        Ok(out)
    }
}

impl Drop for MemoryArena {
    fn drop(&mut self) {
        if let Some(h) = self.handle.take() {
            ec_arena_destroy(h);
        }
    }
}
