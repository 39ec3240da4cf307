//! The bump-allocating memory arena.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::raw::RawBuffer;
use crate::view::{ArenaView, ArenaViewMut};

/// A fixed-capacity linear allocator over one page-aligned byte buffer.
///
/// Capacity is the requested size rounded up to the page size and never
/// changes. Allocations return byte offsets into the buffer; the bytes
/// themselves are reached through [`view`](Self::view) /
/// [`view_mut`](Self::view_mut). Memory is zeroed once at construction
/// and is not re-zeroed by [`reset`](Self::reset).
///
/// `allocate` takes `&self` and advances the cursor with a CAS loop, so an
/// arena shared across threads hands out disjoint ranges.
pub struct MemoryArena {
    buf: RawBuffer,
    used: AtomicUsize,
    requested: usize,
    page_size: usize,
    default_alignment: usize,
}

impl MemoryArena {
    /// Create an arena of at least `size_bytes`, rounded up to 4096.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidSize`] for zero or overflowing sizes,
    /// [`ArenaError::AllocationFailed`] if the system cannot provide the buffer.
    pub fn new(size_bytes: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(size_bytes))
    }

    /// Create an arena from an explicit [`ArenaConfig`].
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        let capacity = config.aligned_capacity()?;
        let buf = RawBuffer::zeroed(capacity, config.page_size)?;
        tracing::debug!(
            requested = config.requested_bytes,
            capacity,
            page_size = config.page_size,
            "arena created"
        );
        Ok(Self {
            buf,
            used: AtomicUsize::new(0),
            requested: config.requested_bytes,
            page_size: config.page_size,
            default_alignment: config.default_alignment,
        })
    }

    /// Reserve `n` bytes and return the offset of the first one.
    ///
    /// No alignment padding is inserted: the returned offset equals
    /// [`used`](Self::used) before the call. `n == 0` succeeds without
    /// advancing the cursor.
    ///
    /// # Errors
    ///
    /// [`ArenaError::OutOfCapacity`] if fewer than `n` bytes remain. The
    /// cursor is left unchanged.
    pub fn allocate(&self, n: usize) -> Result<usize, ArenaError> {
        self.allocate_aligned(n, 1)
    }

    /// Reserve `n` bytes whose start address is a multiple of `alignment`.
    ///
    /// Alignment is computed on the absolute address, so offsets up to the
    /// page size are also aligned relative to the buffer start. Padding
    /// bytes count toward [`used`](Self::used).
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidAlignment`] if `alignment` is not a power of
    /// two. [`ArenaError::OutOfCapacity`] if padding plus `n` does not fit;
    /// the cursor is left unchanged.
    pub fn allocate_aligned(&self, n: usize, alignment: usize) -> Result<usize, ArenaError> {
        if !alignment.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { alignment });
        }
        let base = self.buf.as_ptr() as usize;
        let capacity = self.buf.len();
        let mut current = self.used.load(Ordering::Relaxed);
        loop {
            let padding = base.wrapping_add(current).wrapping_neg() & (alignment - 1);
            let offset = current + padding;
            let end = match offset.checked_add(n) {
                Some(end) if end <= capacity => end,
                _ => {
                    tracing::warn!(requested = n, used = current, capacity, "arena out of capacity");
                    return Err(ArenaError::OutOfCapacity {
                        requested: n,
                        used: current,
                        capacity,
                    });
                }
            };
            match self
                .used
                .compare_exchange_weak(current, end, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Ok(offset),
                Err(actual) => current = actual,
            }
        }
    }

    /// Rewind the cursor to zero. Existing bytes are not cleared.
    ///
    /// Takes `&mut self`, so no view or outstanding borrow survives it.
    pub fn reset(&mut self) {
        let used = std::mem::replace(self.used.get_mut(), 0);
        tracing::debug!(released = used, capacity = self.buf.len(), "arena reset");
    }

    /// Total capacity in bytes (page-aligned).
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    /// Bytes consumed by allocations since construction or the last reset,
    /// including alignment padding.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Acquire)
    }

    /// Bytes still available for unaligned allocation.
    pub fn remaining(&self) -> usize {
        self.size() - self.used()
    }

    /// The size originally requested, before rounding.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Alignment and capacity granularity of the backing buffer.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Alignment applied by callers that ask for "default" alignment.
    pub fn default_alignment(&self) -> usize {
        self.default_alignment
    }

    /// Base address of the buffer. Stable for the arena's lifetime.
    pub fn as_ptr(&self) -> *const u8 {
        self.buf.as_ptr()
    }

    /// Mutable base address of the buffer.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.buf.as_mut_ptr()
    }

    /// Read-only view over all `size()` bytes.
    pub fn view(&self) -> ArenaView<'_> {
        ArenaView::new(self.buf.as_slice())
    }

    /// Writable view over all `size()` bytes.
    pub fn view_mut(&mut self) -> ArenaViewMut<'_> {
        ArenaViewMut::new(self.buf.as_mut_slice())
    }
}

impl std::fmt::Debug for MemoryArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryArena")
            .field("size", &self.size())
            .field("used", &self.used())
            .field("requested", &self.requested)
            .field("page_size", &self.page_size)
            .field("default_alignment", &self.default_alignment)
            .finish()
    }
}
