//! Linear memory arena for EdgeCortex.
//!
//! A [`MemoryArena`] owns one page-aligned, zero-initialised byte buffer
//! and hands out offsets into it by bumping a single cursor. There is no
//! per-allocation free: the whole arena is rewound with
//! [`MemoryArena::reset`] or dropped. This crate is one of two that may
//! contain `unsafe` code (along with `edgecortex-ffi`), confined to `raw.rs`.
//!
//! # Layout
//!
//! ```text
//! MemoryArena
//! ├── RawBuffer (page-aligned, capacity = requested rounded up to page size)
//! ├── used: AtomicUsize (bump cursor, CAS-advanced)
//! └── ArenaView / ArenaViewMut (borrowed zero-copy byte views, 0..capacity)
//! ```
//!
//! # Views and lifetimes
//!
//! Views borrow the arena. [`MemoryArena::allocate`] takes `&self` and
//! never touches bytes, so read views may be held across allocations.
//! [`MemoryArena::view_mut`] and [`MemoryArena::reset`] take `&mut self`,
//! so no view can outlive a reset or the arena itself.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
mod raw;
pub mod view;

// Public re-exports for the primary API surface.
pub use arena::MemoryArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use view::{ArenaView, ArenaViewMut};
