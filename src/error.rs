//! Error types for bloomsieve operations.
//!
//! Two error families cover every failure the filter can produce:
//!
//! - [`SizingError`] — construction-time failures (bad sizing inputs, or a
//!   derived footprint too large for the arena ceiling)
//! - [`QueryError`] — operation-time failures (querying a filter that never
//!   reached the ready state)
//!
//! All errors are returned to the immediate caller; nothing is retried
//! internally and nothing panics.
//!
//! # Error Propagation
//!
//! ```
//! use bloomsieve::{BloomFilter, SizingError};
//!
//! fn sized_filter(entries: u32, rate: f64) -> Result<BloomFilter, SizingError> {
//!     let filter = BloomFilter::new(entries, rate)?;
//!     Ok(filter)
//! }
//! # assert!(sized_filter(1002, 0.1).is_ok());
//! # assert!(sized_filter(10, 0.1).is_err());
//! ```

use std::fmt;

/// Result type alias for sizing (construction) operations.
pub type SizingResult<T> = std::result::Result<T, SizingError>;

/// Result type alias for query (add/check) operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while sizing and constructing a filter.
///
/// # Design Notes
/// - `Clone` + `PartialEq` enable testing and error comparison
/// - Variants carry enough context to diagnose the rejected configuration
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// Sizing inputs don't satisfy the filter's parameter constraints.
    ///
    /// Raised for an entry capacity below the configured minimum, an error
    /// rate outside the open interval `(0, 1)`, or a configuration whose
    /// derived bit count collapses to zero.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Derived byte footprint exceeds the arena's configured ceiling.
    ///
    /// The arena is fixed-capacity: sizing that would not fit is rejected at
    /// construction rather than triggering a runtime resize.
    CapacityExceeded {
        /// Bytes the requested configuration would need.
        required: u64,
        /// Maximum bytes the arena is configured to hold.
        max: u32,
    },
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => {
                write!(f, "Invalid filter parameters: {}.", message)
            }
            Self::CapacityExceeded { required, max } => {
                write!(
                    f,
                    "Filter needs {} bytes but the arena ceiling is {} bytes.",
                    required, max
                )
            }
        }
    }
}

impl std::error::Error for SizingError {}

impl SizingError {
    /// Create an `InvalidParameters` error with a formatted message.
    ///
    /// # Examples
    /// ```
    /// use bloomsieve::SizingError;
    ///
    /// let err = SizingError::invalid_parameters(
    ///     format!("entry capacity {} is below the minimum of {}", 10, 1000)
    /// );
    /// ```
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a `CapacityExceeded` error.
    #[must_use]
    pub fn capacity_exceeded(required: u64, max: u32) -> Self {
        Self::CapacityExceeded { required, max }
    }
}

/// Errors that can occur during `add`/`check` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// Operation attempted on a filter that never reached the ready state.
    ///
    /// A filter that failed (or never ran) `init` has no defined storage;
    /// every `add`/`check` on it surfaces this error instead of probing.
    NotInitialized,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => {
                write!(f, "Filter is not initialized; call init before add/check.")
            }
        }
    }
}

impl std::error::Error for QueryError {}
