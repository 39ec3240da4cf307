//! C-compatible status codes.
//!
//! [`EcStatus`] is a `repr(i32)` enum covering every error condition the
//! C API can report. Conversions from the Rust error types
//! ([`ShapeError`], [`ArenaError`]) are provided.

use edgecortex_arena::ArenaError;
use edgecortex_core::ShapeError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, out of range, mismatched or aliased.
    InvalidArgument = -2,
    /// Arena allocation exceeds the remaining capacity.
    OutOfCapacity = -3,
    /// The system allocator could not provide an arena buffer.
    AllocationFailed = -4,
    /// A caller-provided buffer is shorter than its declared shape.
    BufferTooSmall = -5,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -6,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ShapeError> for EcStatus {
    fn from(e: &ShapeError) -> Self {
        match e {
            ShapeError::BufferTooSmall { .. } => EcStatus::BufferTooSmall,
            ShapeError::DimensionMismatch { .. }
            | ShapeError::SizeOverflow { .. }
            | ShapeError::InvalidBlockSize { .. } => EcStatus::InvalidArgument,
        }
    }
}

impl From<&ArenaError> for EcStatus {
    fn from(e: &ArenaError) -> Self {
        match e {
            ArenaError::OutOfCapacity { .. } => EcStatus::OutOfCapacity,
            ArenaError::AllocationFailed { .. } => EcStatus::AllocationFailed,
            ArenaError::InvalidSize { .. } | ArenaError::InvalidAlignment { .. } => {
                EcStatus::InvalidArgument
            }
        }
    }
}
