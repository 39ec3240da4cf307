//! C FFI bindings for EdgeCortex.
//!
//! Exposes the GEMM kernels and the memory arena through a C-compatible
//! API for language bindings. Every function returns an `i32` status
//! ([`EcStatus`]) and writes results through out-pointers. Arenas live in
//! a global generational handle table; stale handles are detected rather
//! than dereferenced.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `edgecortex-arena`). Each exported function opts in individually with
//! `#[allow(unsafe_code)]`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a caught panic into `EcStatus::Panicked`.
///
/// The body is a closure, so `return` inside it yields the status code.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => $crate::status::EcStatus::Panicked as i32,
        }
    };
}

/// Lock a mutex or return `EcStatus::InternalError` if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::EcStatus::InternalError as i32,
        }
    };
}

pub mod arena;
pub mod gemm;
mod handle;
pub mod status;

pub use arena::{
    ec_arena_allocate, ec_arena_allocate_aligned, ec_arena_create, ec_arena_data,
    ec_arena_destroy, ec_arena_remaining, ec_arena_reset, ec_arena_size, ec_arena_used,
};
pub use gemm::{ec_gemm_naive, ec_gemm_tiled};
pub use status::EcStatus;
