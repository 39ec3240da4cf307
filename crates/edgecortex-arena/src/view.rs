//! Zero-copy byte views over an arena's buffer.
//!
//! Views span the whole capacity, not just the allocated prefix, and
//! borrow the arena: a view cannot outlive it or survive a reset.

use std::ops::{Deref, DerefMut};

/// Read-only view over an arena's bytes.
///
/// Obtained via [`MemoryArena::view`](crate::MemoryArena::view).
#[derive(Clone, Copy, Debug)]
pub struct ArenaView<'a> {
    bytes: &'a [u8],
}

impl<'a> ArenaView<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The `len` bytes starting at `offset`, or `None` if out of range.
    pub fn read(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let bytes = self.bytes;
        bytes.get(offset..offset.checked_add(len)?)
    }

    /// The underlying slice with the arena's lifetime.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl Deref for ArenaView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

/// Writable view over an arena's bytes.
///
/// Obtained via [`MemoryArena::view_mut`](crate::MemoryArena::view_mut).
#[derive(Debug)]
pub struct ArenaViewMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> ArenaViewMut<'a> {
    pub(crate) fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Copy `src` into the buffer at `offset`.
    ///
    /// Returns `false` and writes nothing if the range does not fit.
    pub fn write(&mut self, offset: usize, src: &[u8]) -> bool {
        let Some(end) = offset.checked_add(src.len()) else {
            return false;
        };
        match self.bytes.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(src);
                true
            }
            None => false,
        }
    }

    /// Consume the view, returning the slice with the arena's lifetime.
    pub fn into_bytes(self) -> &'a mut [u8] {
        self.bytes
    }
}

impl Deref for ArenaViewMut<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &*self.bytes
    }
}

impl DerefMut for ArenaViewMut<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

#[cfg(test)]
mod tests {
    use crate::MemoryArena;

    #[test]
    fn read_in_and_out_of_range() {
        let arena = MemoryArena::new(4096).unwrap();
        let view = arena.view();
        assert_eq!(view.read(4090, 6).map(<[u8]>::len), Some(6));
        assert!(view.read(4090, 7).is_none());
        assert!(view.read(usize::MAX, 2).is_none());
    }

    #[test]
    fn write_copies_and_bounds_checks() {
        let mut arena = MemoryArena::new(4096).unwrap();
        let mut view = arena.view_mut();
        assert!(view.write(10, &[1, 2, 3]));
        assert!(!view.write(4095, &[1, 2]));
        assert_eq!(view[4095], 0);
        drop(view);
        assert_eq!(arena.view().read(10, 3), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn view_survives_allocation() {
        let arena = MemoryArena::new(4096).unwrap();
        let view = arena.view();
        let off = arena.allocate(32).unwrap();
        assert_eq!(view.read(off, 32).map(<[u8]>::len), Some(32));
    }
}
