//! Builder for configuring and constructing filters.
//!
//! The plain constructors cover the common case; the builder exists for the
//! two policy knobs they hardcode:
//!
//! - the **arena ceiling** (default 64 MiB) — the hard byte bound that turns
//!   oversized configurations into [`SizingError::CapacityExceeded`]
//! - the **minimum entry capacity** (default 1000) — the usability guard on
//!   tiny filters, which the underlying math does not actually require
//!
//! # Examples
//!
//! ## Minimal Configuration
//!
//! ```
//! use bloomsieve::FilterBuilder;
//!
//! let filter = FilterBuilder::new()
//!     .expected_entries(10_000)
//!     .error_rate(0.01)
//!     .build()
//!     .unwrap();
//! assert!(filter.is_ready());
//! ```
//!
//! ## Full Configuration
//!
//! ```
//! use bloomsieve::FilterBuilder;
//!
//! // A small embedded-style arena, and a threshold lowered for a test rig.
//! let filter = FilterBuilder::new()
//!     .expected_entries(1_500)
//!     .error_rate(0.05)
//!     .arena_ceiling(16 * 1024)
//!     .min_entries(100)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use bloomsieve::{FilterBuilder, SizingError};
//!
//! let result = FilterBuilder::new()
//!     .expected_entries(1_000_000)
//!     .error_rate(0.001)
//!     .arena_ceiling(1024)   // far too small
//!     .build();
//!
//! assert!(matches!(result, Err(SizingError::CapacityExceeded { .. })));
//! ```

use crate::core::arena::BitArena;
use crate::core::params::DEFAULT_MIN_ENTRIES;
use crate::error::{SizingError, SizingResult};
use crate::filter::BloomFilter;
use crate::hash::Murmur2Hasher;

/// Builder for [`BloomFilter`] with capacity-policy knobs.
///
/// `expected_entries` and `error_rate` are required; `build` rejects a
/// builder missing either. The remaining knobs default to the values the
/// plain constructors use.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    expected_entries: Option<u32>,
    error_rate: Option<f64>,
    arena_ceiling: u32,
    min_entries: u32,
}

impl FilterBuilder {
    /// Create a builder with default policy knobs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_entries: None,
            error_rate: None,
            arena_ceiling: BitArena::DEFAULT_CEILING,
            min_entries: DEFAULT_MIN_ENTRIES,
        }
    }

    /// Set the planned number of distinct elements. Required.
    #[must_use]
    pub fn expected_entries(mut self, entries: u32) -> Self {
        self.expected_entries = Some(entries);
        self
    }

    /// Set the target false-positive probability, in `(0, 1)`. Required.
    #[must_use]
    pub fn error_rate(mut self, rate: f64) -> Self {
        self.error_rate = Some(rate);
        self
    }

    /// Override the arena's byte ceiling.
    ///
    /// Sizing whose derived `byte_count` exceeds the ceiling fails with
    /// [`SizingError::CapacityExceeded`] at `build` time.
    #[must_use]
    pub fn arena_ceiling(mut self, bytes: u32) -> Self {
        self.arena_ceiling = bytes;
        self
    }

    /// Override the minimum accepted entry capacity.
    ///
    /// Values below 1 are clamped to 1; the sizing formulas are valid for
    /// any positive entry count.
    #[must_use]
    pub fn min_entries(mut self, entries: u32) -> Self {
        self.min_entries = entries;
        self
    }

    /// Size and construct the filter.
    ///
    /// # Errors
    ///
    /// - [`SizingError::InvalidParameters`] if a required knob is missing or
    ///   the sizing inputs are out of range
    /// - [`SizingError::CapacityExceeded`] if the footprint exceeds the
    ///   configured ceiling
    pub fn build(self) -> SizingResult<BloomFilter> {
        let Some(entries) = self.expected_entries else {
            return Err(SizingError::invalid_parameters(
                "expected_entries is required",
            ));
        };
        let Some(rate) = self.error_rate else {
            return Err(SizingError::invalid_parameters("error_rate is required"));
        };

        let mut filter =
            BloomFilter::configured(Murmur2Hasher::new(), self.arena_ceiling, self.min_entries);
        filter.init(entries, rate)?;
        Ok(filter)
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
