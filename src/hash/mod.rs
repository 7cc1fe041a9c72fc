//! Hash engine for the filter's probe sequences.
//!
//! The filter derives every probe position from two 32-bit digests of the
//! input bytes, so the only primitive this module needs is a seeded mixing
//! hash. The shipped implementation is 32-bit Murmur2 (see [`murmur2`]);
//! the [`MixHasher`] trait is the seam that keeps the filter generic over
//! the mixing function.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── murmur2.rs  - seeded 32-bit Murmur2 mix + Murmur2Hasher
//! └── mod.rs      - MixHasher trait (public API)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use bloomsieve::hash::{MixHasher, Murmur2Hasher};
//!
//! let hasher = Murmur2Hasher::new();
//! let digest = hasher.mix(0, b"hello");
//! assert_eq!(digest, hasher.mix(0, b"hello"));
//! ```
//!
//! # Seed Chaining
//!
//! Double hashing needs two independent-looking digests per input. Rather
//! than maintaining two seeded hashers, the second digest is produced by
//! re-hashing the input with the first digest as the seed:
//!
//! ```text
//! a = mix(BASE_SEED, data)
//! b = mix(a, data)
//! ```
//!
//! [`MixHasher::probe_pair`] packages this chaining so filters never have to
//! reimplement it.
//!
//! # References
//!
//! - Austin Appleby: "MurmurHash2"
//! - Kirsch & Mitzenmacher (2006): "Less Hashing, Same Performance: Building a Better Bloom Filter"

pub mod murmur2;

pub use murmur2::{mix, Murmur2Hasher};

/// Seed for the first digest of every probe pair.
///
/// The conventional libbloom probe seed; changing it changes every bit
/// position a filter derives, so it is fixed rather than configurable.
pub const BASE_SEED: u32 = 0x9747_b28c;

/// Seeded mixing hash used to derive probe sequences.
///
/// Implementations must be deterministic and side-effect free: the same
/// `(seed, data)` pair always yields the same digest, for any byte slice
/// including the empty one. The digest is endianness-sensitive by contract
/// (defined for little-endian word reads) and is not required to match
/// across hosts.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; they hold no mutable state.
///
/// # Examples
///
/// ```
/// use bloomsieve::hash::{MixHasher, Murmur2Hasher, BASE_SEED};
///
/// let hasher = Murmur2Hasher::new();
/// let (a, b) = hasher.probe_pair(b"hello world");
/// assert_eq!(a, hasher.mix(BASE_SEED, b"hello world"));
/// assert_eq!(b, hasher.mix(a, b"hello world"));
/// ```
pub trait MixHasher: Send + Sync {
    /// Mix arbitrary bytes into a 32-bit digest under the given seed.
    fn mix(&self, seed: u32, data: &[u8]) -> u32;

    /// Produce the two base digests for a double-hashing probe sequence.
    ///
    /// The second digest is seeded with the first, which gives the pair
    /// enough independence for the Kirsch–Mitzenmacher construction without
    /// a second hash algorithm.
    #[inline]
    fn probe_pair(&self, data: &[u8]) -> (u32, u32) {
        let a = self.mix(BASE_SEED, data);
        let b = self.mix(a, data);
        (a, b)
    }

    /// Human-readable name for diagnostics.
    fn name(&self) -> &'static str;
}
