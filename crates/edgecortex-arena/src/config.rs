//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for a [`MemoryArena`](crate::MemoryArena).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Requested arena size in bytes. Must be positive.
    ///
    /// The actual capacity is this value rounded up to a multiple of
    /// `page_size`.
    pub requested_bytes: usize,

    /// Alignment of the backing buffer and granularity of its capacity.
    ///
    /// Default: 4096 (one page). Must be a power of two.
    pub page_size: usize,

    /// Alignment used when a caller asks for "default" alignment
    /// (alignment 0 at the C boundary, the Python keyword default).
    ///
    /// Default: 64. Must be a power of two.
    pub default_alignment: usize,
}

impl ArenaConfig {
    /// Default page size: 4KB.
    pub const DEFAULT_PAGE_SIZE: usize = 4096;

    /// Default allocation alignment: 64 bytes, one cache line.
    pub const DEFAULT_ALIGNMENT: usize = 64;

    /// Create a config for `requested_bytes` with the default page size.
    pub fn new(requested_bytes: usize) -> Self {
        Self {
            requested_bytes,
            page_size: Self::DEFAULT_PAGE_SIZE,
            default_alignment: Self::DEFAULT_ALIGNMENT,
        }
    }

    /// Override the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the default allocation alignment.
    pub fn with_default_alignment(mut self, alignment: usize) -> Self {
        self.default_alignment = alignment;
        self
    }

    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidAlignment`] if `page_size` or
    /// `default_alignment` is not a power of two,
    /// [`ArenaError::InvalidSize`] if `requested_bytes` is zero.
    pub fn validate(&self) -> Result<(), ArenaError> {
        for alignment in [self.page_size, self.default_alignment] {
            if !alignment.is_power_of_two() {
                return Err(ArenaError::InvalidAlignment { alignment });
            }
        }
        if self.requested_bytes == 0 {
            return Err(ArenaError::InvalidSize {
                requested: self.requested_bytes,
            });
        }
        Ok(())
    }

    /// Validate the config and return the aligned capacity in bytes.
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) reports, plus
    /// [`ArenaError::InvalidSize`] if rounding up overflows.
    pub fn aligned_capacity(&self) -> Result<usize, ArenaError> {
        self.validate()?;
        self.requested_bytes
            .checked_next_multiple_of(self.page_size)
            .ok_or(ArenaError::InvalidSize {
                requested: self.requested_bytes,
            })
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_request_rounds_up_to_one_page() {
        assert_eq!(ArenaConfig::new(100).aligned_capacity(), Ok(4096));
        assert_eq!(ArenaConfig::new(1024).aligned_capacity(), Ok(4096));
        assert_eq!(ArenaConfig::new(4000).aligned_capacity(), Ok(4096));
    }

    #[test]
    fn exact_multiple_is_kept() {
        assert_eq!(ArenaConfig::new(4096).aligned_capacity(), Ok(4096));
        assert_eq!(ArenaConfig::new(8192).aligned_capacity(), Ok(8192));
    }

    #[test]
    fn one_past_page_takes_two_pages() {
        assert_eq!(ArenaConfig::new(4097).aligned_capacity(), Ok(8192));
    }

    #[test]
    fn zero_request_rejected() {
        assert_eq!(
            ArenaConfig::new(0).aligned_capacity(),
            Err(ArenaError::InvalidSize { requested: 0 })
        );
    }

    #[test]
    fn overflowing_request_rejected() {
        assert!(matches!(
            ArenaConfig::new(usize::MAX).aligned_capacity(),
            Err(ArenaError::InvalidSize { .. })
        ));
    }

    #[test]
    fn non_power_of_two_page_rejected() {
        assert_eq!(
            ArenaConfig::new(100).with_page_size(3000).aligned_capacity(),
            Err(ArenaError::InvalidAlignment { alignment: 3000 })
        );
        assert!(ArenaConfig::new(100)
            .with_page_size(0)
            .aligned_capacity()
            .is_err());
    }

    #[test]
    fn non_power_of_two_default_alignment_rejected() {
        let config = ArenaConfig::new(100).with_default_alignment(24);
        assert_eq!(
            config.validate(),
            Err(ArenaError::InvalidAlignment { alignment: 24 })
        );
    }

    #[test]
    fn defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.requested_bytes, 4096);
        assert_eq!(config.page_size, 4096);
        assert_eq!(config.default_alignment, 64);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn custom_page_size() {
        let config = ArenaConfig::new(100).with_page_size(64);
        assert_eq!(config.aligned_capacity(), Ok(128));
    }
}
