//! Python bindings for EdgeCortex.
//!
//! This crate provides PyO3 bindings wrapping the C FFI layer
//! (`edgecortex-ffi`). The native extension is named `edgecortex_core` and
//! exposes `gemm_naive`, `gemm_tiled` and the `MemoryArena` class.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

use edgecortex_arena::ArenaConfig;
use edgecortex_kernels::Tiled;
use pyo3::prelude::*;

mod arena;
mod error;
mod gemm;

/// The native `edgecortex_core` extension module.
#[pymodule]
fn edgecortex_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<arena::MemoryArena>()?;

    m.add_function(wrap_pyfunction!(gemm::gemm_naive, m)?)?;
    m.add_function(wrap_pyfunction!(gemm::gemm_tiled, m)?)?;

    m.add("DEFAULT_BLOCK_SIZE", Tiled::DEFAULT_BLOCK_SIZE)?;
    m.add("PAGE_SIZE", ArenaConfig::DEFAULT_PAGE_SIZE)?;
    m.add("DEFAULT_ALIGNMENT", ArenaConfig::DEFAULT_ALIGNMENT)?;
    Ok(())
}
