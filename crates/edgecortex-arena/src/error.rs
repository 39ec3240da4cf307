//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Requested arena size is zero or cannot be rounded up to a page.
    InvalidSize {
        /// Number of bytes requested.
        requested: usize,
    },
    /// Allocation does not fit in the remaining capacity.
    OutOfCapacity {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes already allocated when the request was refused.
        used: usize,
        /// Total arena capacity in bytes.
        capacity: usize,
    },
    /// Alignment (or page size) is not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        alignment: usize,
    },
    /// The system allocator could not provide the backing buffer.
    AllocationFailed {
        /// Size of the failed allocation in bytes.
        bytes: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { requested } => {
                write!(f, "invalid arena size: {requested} bytes")
            }
            Self::OutOfCapacity {
                requested,
                used,
                capacity,
            } => {
                write!(
                    f,
                    "arena out of capacity: requested {requested} bytes, {used} of {capacity} bytes used"
                )
            }
            Self::InvalidAlignment { alignment } => {
                write!(f, "alignment {alignment} is not a power of two")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {bytes}-byte arena buffer")
            }
        }
    }
}

impl Error for ArenaError {}
