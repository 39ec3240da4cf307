//! Integration test: bump-allocation invariants under arbitrary request
//! sequences and concurrent allocation.
//!
//! Offsets never overlap, `used` is monotone between resets and never
//! exceeds capacity, and a refused request leaves the arena untouched.

use std::sync::Arc;
use std::thread;

use edgecortex_arena::{ArenaConfig, ArenaError, MemoryArena};
use proptest::prelude::*;

#[test]
fn concurrent_allocations_are_disjoint() {
    let arena = Arc::new(MemoryArena::new(64 * 1024).unwrap());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let arena = Arc::clone(&arena);
            thread::spawn(move || {
                (0..100)
                    .map(|_| arena.allocate(24).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut offsets: Vec<usize> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    offsets.sort_unstable();
    assert_eq!(arena.used(), 8 * 100 * 24);
    for (i, off) in offsets.iter().enumerate() {
        assert_eq!(*off, i * 24);
    }
}

#[test]
fn concurrent_exhaustion_never_overcommits() {
    let arena = Arc::new(MemoryArena::new(4096).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let arena = Arc::clone(&arena);
            thread::spawn(move || {
                let mut granted = 0usize;
                while arena.allocate(100).is_ok() {
                    granted += 1;
                }
                granted
            })
        })
        .collect();
    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 40);
    assert_eq!(arena.used(), 4000);
}

#[test]
fn custom_page_size_aligns_base() {
    let arena = MemoryArena::with_config(ArenaConfig::new(1).with_page_size(16384)).unwrap();
    assert_eq!(arena.size(), 16384);
    assert_eq!(arena.page_size(), 16384);
    assert_eq!(arena.as_ptr() as usize % 16384, 0);
}

proptest! {
    #[test]
    fn capacity_is_smallest_page_multiple(requested in 1usize..100_000) {
        let arena = MemoryArena::new(requested).unwrap();
        prop_assert_eq!(arena.size() % 4096, 0);
        prop_assert!(arena.size() >= requested);
        prop_assert!(arena.size() - requested < 4096);
    }

    #[test]
    fn allocation_sequence_respects_invariants(
        requests in proptest::collection::vec((0usize..600, 0u32..8), 1..40),
    ) {
        let arena = MemoryArena::new(4096).unwrap();
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for (n, align_pow) in requests {
            let alignment = 1usize << align_pow;
            let before = arena.used();
            match arena.allocate_aligned(n, alignment) {
                Ok(off) => {
                    prop_assert!(off >= before);
                    prop_assert_eq!((arena.as_ptr() as usize + off) % alignment, 0);
                    prop_assert_eq!(arena.used(), off + n);
                    if n > 0 {
                        ranges.push((off, off + n));
                    }
                }
                Err(ArenaError::OutOfCapacity { requested, used, capacity }) => {
                    prop_assert_eq!(requested, n);
                    prop_assert_eq!(used, before);
                    prop_assert_eq!(capacity, 4096);
                    prop_assert_eq!(arena.used(), before);
                }
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
            prop_assert!(arena.used() <= arena.size());
        }
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0);
        }
    }

    #[test]
    fn reset_restores_full_capacity(sizes in proptest::collection::vec(1usize..2048, 1..10)) {
        let mut arena = MemoryArena::new(4096).unwrap();
        for n in sizes {
            let _ = arena.allocate(n);
        }
        arena.reset();
        prop_assert_eq!(arena.used(), 0);
        prop_assert_eq!(arena.allocate(4096).unwrap(), 0);
    }
}
