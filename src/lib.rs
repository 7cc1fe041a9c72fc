//! bloomsieve: capacity/error-driven Bloom filter with seeded Murmur2 double hashing.
//!
//! A bloomsieve filter answers one question about arbitrary byte strings —
//! "was this added before?" — with a configurable false-positive rate and a
//! hard guarantee of zero false negatives. It is a pure in-memory structure:
//! no keys are stored, no files are written, and the only surface is the
//! four-operation API (`init`, `add`, `check`, `describe`).
//!
//! # What's Inside
//!
//! - **Sizing**: bit, byte, and hash-function counts derived from the
//!   planned entry count and target error rate with the classic Bloom
//!   formulas ([`core::params`])
//! - **Hash engine**: seeded 32-bit Murmur2, with probe pairs built by seed
//!   chaining ([`hash`])
//! - **Probe algorithm**: Kirsch–Mitzenmacher double hashing,
//!   `(a + i·b) mod bit_count`, over a fixed-capacity zeroed bit arena
//!   ([`core::arena`], [`filter`])
//!
//! # Quick Start
//!
//! ```
//! use bloomsieve::BloomFilter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Size for 10,000 entries at a 1% false-positive rate.
//! let mut filter = BloomFilter::new(10_000, 0.01)?;
//!
//! filter.add(b"hello")?;
//! filter.add(b"world")?;
//!
//! assert!(filter.check(b"hello")?);   // definitely added
//! assert!(!filter.check(b"goodbye")?); // definitely never added
//! # Ok(())
//! # }
//! ```
//!
//! # Capacity Policy
//!
//! Storage is a fixed-capacity arena sized once at `init`: there is no
//! resizing, no element removal, and a configurable hard ceiling on the
//! byte footprint (oversized configurations fail construction with
//! [`SizingError::CapacityExceeded`]). Use [`FilterBuilder`] to adjust the
//! ceiling or the minimum-entries guard:
//!
//! ```
//! use bloomsieve::FilterBuilder;
//!
//! let filter = FilterBuilder::new()
//!     .expected_entries(1_500)
//!     .error_rate(0.05)
//!     .arena_ceiling(64 * 1024)
//!     .build()
//!     .unwrap();
//! ```
//!
//! # Concurrency
//!
//! Deliberately single-threaded: `add` takes `&mut self`, `check` takes
//! `&self`, and the filter carries no locks or atomics. Concurrent readers
//! are fine through shared references; any writer needs exclusive access,
//! enforced by the borrow checker in-process and by external
//! synchronization (`Mutex`, `RwLock`, single-owner actor) across threads.
//!
//! # Errors
//!
//! Every failure is a typed value returned to the caller — nothing panics,
//! nothing retries, nothing is swallowed. Construction fails with
//! [`SizingError`]; operations on a filter that never became ready fail
//! with [`QueryError::NotInitialized`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::bool_assert_comparison)]

/// Core data structures: sizing math and bit storage.
pub mod core;

/// Error types and result aliases.
pub mod error;

/// The Bloom filter and its description type.
pub mod filter;

/// Hash engine: the MixHasher seam and the Murmur2 implementation.
pub mod hash;

/// Filter builder with capacity-policy knobs.
pub mod builder;

// Re-export the working set at the crate root.
pub use builder::FilterBuilder;
pub use error::{QueryError, QueryResult, SizingError, SizingResult};
pub use filter::{BloomFilter, FilterDescription};
pub use hash::{MixHasher, Murmur2Hasher};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use bloomsieve::prelude::*;
///
/// let mut filter = BloomFilter::new(1002, 0.1).unwrap();
/// filter.add(b"hello").unwrap();
/// assert!(filter.check(b"hello").unwrap());
/// ```
pub mod prelude {
    pub use crate::builder::FilterBuilder;
    pub use crate::error::{QueryError, SizingError};
    pub use crate::filter::{BloomFilter, FilterDescription};
    pub use crate::hash::{MixHasher, Murmur2Hasher};
}
