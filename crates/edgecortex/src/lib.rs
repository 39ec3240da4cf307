//! EdgeCortex: cache-blocked GEMM kernels and a page-aligned memory arena
//! for edge inference.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the EdgeCortex sub-crates. For most users, adding `edgecortex` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use edgecortex::prelude::*;
//!
//! // C = A·B for 2x2 matrices, tiled with 1x1 blocks.
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [5.0, 6.0, 7.0, 8.0];
//! let mut c = [0.0f32; 4];
//! gemm_tiled(
//!     MatrixRef::square(&a, 2).unwrap(),
//!     MatrixRef::square(&b, 2).unwrap(),
//!     &mut MatrixMut::square(&mut c, 2).unwrap(),
//!     1,
//! )
//! .unwrap();
//! assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
//!
//! // A 1KB request is rounded up to one 4KB page.
//! let mut arena = MemoryArena::new(1024).unwrap();
//! assert_eq!(arena.size(), 4096);
//! let off = arena.allocate(100).unwrap();
//! arena.view_mut()[off] = 123;
//! assert_eq!(arena.view()[off], 123);
//! assert_eq!(arena.used(), 100);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `edgecortex-core` | Matrix views, `Dims`, `ShapeError`, the `MatMul` trait |
//! | [`kernels`] | `edgecortex-kernels` | `gemm_naive`, `gemm_tiled`, `GemmKernel` |
//! | [`arena`] | `edgecortex-arena` | `MemoryArena`, `ArenaConfig`, byte views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core matrix types and errors (`edgecortex-core`).
///
/// Contains [`types::MatrixRef`], [`types::MatrixMut`], [`types::Dims`],
/// [`types::ShapeError`] and the [`types::MatMul`] trait.
pub use edgecortex_core as types;

/// GEMM kernels (`edgecortex-kernels`).
///
/// [`kernels::gemm_naive`] is the reference triple loop;
/// [`kernels::gemm_tiled`] blocks all three loops for cache reuse.
/// [`kernels::GemmKernel`] selects one from an optional block size.
pub use edgecortex_kernels as kernels;

/// Linear memory arena (`edgecortex-arena`).
///
/// [`arena::MemoryArena`] hands out byte offsets into one page-aligned
/// buffer, exposed through [`arena::ArenaView`] and [`arena::ArenaViewMut`].
pub use edgecortex_arena as arena;

/// Common imports for typical EdgeCortex usage.
///
/// ```rust
/// use edgecortex::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use edgecortex_core::{Dims, MatMul, MatrixMut, MatrixRef, ShapeError};

    // Kernels
    pub use edgecortex_kernels::{gemm_naive, gemm_tiled, GemmKernel, Naive, Tiled};

    // Arena
    pub use edgecortex_arena::{ArenaConfig, ArenaError, ArenaView, ArenaViewMut, MemoryArena};
}
