//! Page-aligned backing storage.
//!
//! The only `unsafe` in this crate. `Vec<u8>` cannot promise an alignment
//! above 1, so the buffer comes straight from `std::alloc` with an explicit
//! [`Layout`]. Every `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::ArenaError;

/// An owned, zero-initialised, fixed-size byte buffer with a guaranteed
/// base alignment. Never reallocated, so its base pointer is stable for
/// its whole lifetime.
pub(crate) struct RawBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: RawBuffer uniquely owns its allocation, like Box<[u8]>. Shared
// access only hands out `&[u8]` and mutation requires `&mut self`.
unsafe impl Send for RawBuffer {}
// SAFETY: see Send; `&RawBuffer` only permits reads.
unsafe impl Sync for RawBuffer {}

impl RawBuffer {
    /// Allocate `size` zeroed bytes aligned to `align`.
    ///
    /// `size` must be non-zero; `align` must be a power of two.
    pub(crate) fn zeroed(size: usize, align: usize) -> Result<Self, ArenaError> {
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| ArenaError::InvalidSize { requested: size })?;
        if layout.size() == 0 {
            return Err(ArenaError::InvalidSize { requested: size });
        }
        // SAFETY: layout has non-zero size (checked above).
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr).ok_or(ArenaError::AllocationFailed { bytes: size })?;
        Ok(Self { ptr, layout })
    }

    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for len() initialised bytes for as long as
        // self lives; the returned borrow is tied to &self.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as in as_slice, and &mut self guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with exactly this layout
        // and is freed only here.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}
