//! The Bloom filter: sizing, probe sequences, insert and query.
//!
//! # Algorithm
//!
//! A Bloom filter answers set-membership questions with a controlled
//! false-positive rate and no false negatives. This implementation is the
//! classic double-hashing construction:
//!
//! 1. Sizing derives the bit count, byte count, and probe count from the
//!    planned entry capacity and target error rate (see
//!    [`crate::core::params`]).
//! 2. Each input is digested twice by the seeded Murmur2 engine — the
//!    second digest seeded with the first — giving base hashes `a` and `b`.
//! 3. The k probe positions are `(a + i·b) mod bit_count` for
//!    `i in 0..k`, with wrapping 32-bit arithmetic (Kirsch–Mitzenmacher:
//!    two hashes simulate k independent ones).
//! 4. `add` sets all k bits and reports whether every one was already set;
//!    `check` reads the same k bits without writing.
//!
//! Both operations visit all k positions unconditionally — no early exit.
//! `add` relies on this to leave every probed bit set, and it keeps each
//! operation a fixed, data-independent-time sequence of probes.
//!
//! # Lifecycle
//!
//! A filter is either *uninitialized* or *ready*, and only moves in one
//! direction:
//!
//! ```text
//! Uninitialized ──init() ok──► Ready
//!       ▲                        │
//!       └──────init() err────────┘  (re-init re-sizes; a failure reverts
//!                                    to uninitialized)
//! ```
//!
//! `add`/`check` on an uninitialized filter return
//! [`QueryError::NotInitialized`]. Dropping a filter simply releases the
//! arena; elements are never removed individually and the filter never
//! resizes once ready.
//!
//! # Concurrency Model
//!
//! Single-threaded by design: `add` takes `&mut self`, `check` takes
//! `&self`, and the borrow checker enforces exactly the discipline the
//! structure needs — concurrent `check`s may share a filter, but no `add`
//! may overlap anything. For cross-thread use, wrap the filter in the
//! synchronization of your choice; it carries none of its own.
//!
//! # Examples
//!
//! ```
//! use bloomsieve::BloomFilter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut filter = BloomFilter::new(10_000, 0.01)?;
//!
//! assert_eq!(filter.add(b"hello world")?, false); // not previously present
//! assert_eq!(filter.add(b"hello world")?, true);  // already present
//! assert_eq!(filter.check(b"hello world")?, true);
//! assert_eq!(filter.check(b"never added")?, false);
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - Bloom, B. H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch, A., & Mitzenmacher, M. (2006). "Less Hashing, Same Performance: Building a Better Bloom Filter"

use crate::core::arena::BitArena;
use crate::core::params::{FilterParams, DEFAULT_MIN_ENTRIES};
use crate::error::{QueryError, QueryResult, SizingResult};
use crate::hash::{MixHasher, Murmur2Hasher};

use std::fmt;

use tracing::{debug, warn};

/// Probabilistic membership filter over raw byte strings.
///
/// Generic over the mixing hash `H` the way the probe sequence is derived;
/// the default [`Murmur2Hasher`] is what the sizing and error-rate math were
/// validated against, and there is rarely a reason to substitute it.
///
/// The filter stores no keys — only bit positions derived from them — and
/// supports neither removal nor resizing.
///
/// # Examples
///
/// ```
/// use bloomsieve::BloomFilter;
///
/// // Two-phase construction mirrors callers that embed the filter and size
/// // it later.
/// let mut filter = BloomFilter::empty();
/// assert!(filter.check(b"anything").is_err()); // not initialized yet
///
/// filter.init(1002, 0.1).unwrap();
/// assert!(filter.is_ready());
/// ```
#[derive(Debug)]
pub struct BloomFilter<H: MixHasher = Murmur2Hasher> {
    /// Derived sizing; `Some` exactly while `ready`.
    params: Option<FilterParams>,
    /// Bit storage; `Some` exactly while `ready`.
    arena: Option<BitArena>,
    /// Gate checked by every query/insert operation.
    ready: bool,
    /// Hard upper bound on `byte_count`, fixed per filter instance.
    arena_ceiling: u32,
    /// Sizing rejects entry capacities below this.
    min_entries: u32,
    /// Mixing hash engine.
    hasher: H,
}

/// Lazy probe-position sequence for one input.
///
/// Yields `(a + i·b) mod bit_count` for `i in 0..k` with wrapping u32
/// arithmetic. Owns plain copies of the digests, so iterating it never
/// borrows the filter.
#[derive(Debug, Clone)]
struct ProbeSequence {
    a: u32,
    b: u32,
    i: u32,
    k: u32,
    bit_count: u32,
}

impl Iterator for ProbeSequence {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.i >= self.k {
            return None;
        }
        let position = self.a.wrapping_add(self.i.wrapping_mul(self.b)) % self.bit_count;
        self.i += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.k - self.i) as usize;
        (remaining, Some(remaining))
    }
}

impl BloomFilter<Murmur2Hasher> {
    /// Create and size a filter in one call.
    ///
    /// # Arguments
    ///
    /// * `entry_capacity` - Planned number of distinct elements (≥ 1000 by default)
    /// * `target_error_rate` - Desired false-positive probability, in `(0, 1)`
    ///
    /// # Errors
    ///
    /// - [`SizingError::InvalidParameters`](crate::SizingError::InvalidParameters)
    ///   for out-of-range inputs
    /// - [`SizingError::CapacityExceeded`](crate::SizingError::CapacityExceeded)
    ///   if the derived footprint exceeds the default arena ceiling
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomsieve::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1002, 0.1).unwrap();
    /// assert!(filter.is_ready());
    ///
    /// assert!(BloomFilter::new(0, 1.0).is_err());
    /// assert!(BloomFilter::new(10, 0.0).is_err());
    /// ```
    pub fn new(entry_capacity: u32, target_error_rate: f64) -> SizingResult<Self> {
        let mut filter = Self::empty();
        filter.init(entry_capacity, target_error_rate)?;
        Ok(filter)
    }

    /// Create an uninitialized filter.
    ///
    /// Every `add`/`check` on it fails with
    /// [`QueryError::NotInitialized`] until [`BloomFilter::init`] succeeds.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_hasher(Murmur2Hasher::new())
    }
}

impl Default for BloomFilter<Murmur2Hasher> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<H: MixHasher> BloomFilter<H> {
    /// Create an uninitialized filter with a custom mixing hash.
    #[must_use]
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            params: None,
            arena: None,
            ready: false,
            arena_ceiling: BitArena::DEFAULT_CEILING,
            min_entries: DEFAULT_MIN_ENTRIES,
            hasher,
        }
    }

    pub(crate) fn configured(hasher: H, arena_ceiling: u32, min_entries: u32) -> Self {
        Self {
            arena_ceiling,
            min_entries,
            ..Self::with_hasher(hasher)
        }
    }

    /// Size the filter and zero its storage.
    ///
    /// Derives the bit/byte/hash counts from the targets, allocates a zeroed
    /// arena, and marks the filter ready. Calling `init` on a filter that
    /// was already ready re-sizes it from scratch (prior contents are
    /// discarded); a failed call always leaves the filter uninitialized.
    ///
    /// # Errors
    ///
    /// - [`SizingError::InvalidParameters`](crate::SizingError::InvalidParameters)
    ///   for an entry capacity below the configured minimum, an error rate
    ///   outside `(0, 1)`, or a degenerate zero-bit sizing
    /// - [`SizingError::CapacityExceeded`](crate::SizingError::CapacityExceeded)
    ///   if `byte_count` exceeds the configured arena ceiling
    pub fn init(&mut self, entry_capacity: u32, target_error_rate: f64) -> SizingResult<()> {
        self.ready = false;
        self.params = None;
        self.arena = None;

        let params =
            FilterParams::with_min_entries(entry_capacity, target_error_rate, self.min_entries)?;

        let arena = BitArena::zeroed(params.byte_count, self.arena_ceiling).map_err(|err| {
            warn!(
                required = params.byte_count,
                ceiling = self.arena_ceiling,
                "filter sizing exceeds arena ceiling"
            );
            err
        })?;

        debug!(
            entries = params.entry_capacity,
            error_rate = params.target_error_rate,
            bits = params.bit_count,
            bytes = params.byte_count,
            hashes = params.hash_function_count,
            "sized bloom filter"
        );

        self.params = Some(params);
        self.arena = Some(arena);
        self.ready = true;
        Ok(())
    }

    /// Insert a byte string.
    ///
    /// Probes all k positions, setting each bit, and returns `Ok(true)` iff
    /// every probed bit was already set — i.e. the element was (up to the
    /// false-positive probability) already present. All k positions are
    /// visited even after a miss, so the element is fully inserted either
    /// way.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotInitialized`] if the filter never reached ready.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomsieve::BloomFilter;
    ///
    /// let mut filter = BloomFilter::new(1002, 0.1).unwrap();
    /// assert_eq!(filter.add(b"hello").unwrap(), false);
    /// assert_eq!(filter.add(b"hello").unwrap(), true);
    /// ```
    pub fn add(&mut self, data: &[u8]) -> QueryResult<bool> {
        let probes = self.probe_positions(data)?;
        let Some(arena) = self.arena.as_mut() else {
            return Err(QueryError::NotInitialized);
        };

        let mut hits = 0;
        let mut probed = 0;
        for position in probes {
            if arena.test_and_maybe_set(position, true) {
                hits += 1;
            }
            probed += 1;
        }
        Ok(hits == probed)
    }

    /// Query a byte string without modifying the filter.
    ///
    /// Returns `Ok(true)` iff every probed bit is set: the element is
    /// present, or a false positive with probability near the configured
    /// target. `Ok(false)` is definitive — the element was never added.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotInitialized`] if the filter never reached ready.
    pub fn check(&self, data: &[u8]) -> QueryResult<bool> {
        let probes = self.probe_positions(data)?;
        let Some(arena) = self.arena.as_ref() else {
            return Err(QueryError::NotInitialized);
        };

        let mut hits = 0;
        let mut probed = 0;
        for position in probes {
            if arena.test(position) {
                hits += 1;
            }
            probed += 1;
        }
        Ok(hits == probed)
    }

    /// Read-only sizing and state snapshot.
    ///
    /// Never fails: an uninitialized filter reports zeroed counts and
    /// `ready = false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomsieve::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1002, 0.1).unwrap();
    /// let desc = filter.describe();
    /// assert_eq!(desc.entry_capacity, 1002);
    /// assert!(desc.ready);
    /// println!("{desc}");
    /// ```
    #[must_use]
    pub fn describe(&self) -> FilterDescription {
        match self.params {
            Some(p) => FilterDescription {
                entry_capacity: p.entry_capacity,
                target_error_rate: p.target_error_rate,
                bits_per_element: p.bits_per_element,
                bit_count: p.bit_count,
                byte_count: p.byte_count,
                hash_function_count: p.hash_function_count,
                ready: self.ready,
            },
            None => FilterDescription {
                entry_capacity: 0,
                target_error_rate: 0.0,
                bits_per_element: 0.0,
                bit_count: 0,
                byte_count: 0,
                hash_function_count: 0,
                ready: false,
            },
        }
    }

    /// Whether the filter has been successfully sized and zeroed.
    #[must_use]
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Planned entry capacity, or 0 when uninitialized.
    #[must_use]
    pub fn entry_capacity(&self) -> u32 {
        self.params.map_or(0, |p| p.entry_capacity)
    }

    /// Target false-positive rate, or 0.0 when uninitialized.
    #[must_use]
    pub fn target_error_rate(&self) -> f64 {
        self.params.map_or(0.0, |p| p.target_error_rate)
    }

    /// Bits of storage per planned element, or 0.0 when uninitialized.
    #[must_use]
    pub fn bits_per_element(&self) -> f64 {
        self.params.map_or(0.0, |p| p.bits_per_element)
    }

    /// Total bits in the filter, or 0 when uninitialized.
    #[must_use]
    pub fn bit_count(&self) -> u32 {
        self.params.map_or(0, |p| p.bit_count)
    }

    /// Bytes of backing storage, or 0 when uninitialized.
    #[must_use]
    pub fn byte_count(&self) -> u32 {
        self.params.map_or(0, |p| p.byte_count)
    }

    /// Probe positions per element (k), or 0 when uninitialized.
    #[must_use]
    pub fn hash_function_count(&self) -> u32 {
        self.params.map_or(0, |p| p.hash_function_count)
    }

    /// Derive the probe-position sequence for one input.
    ///
    /// Two chained digests feed the Kirsch–Mitzenmacher construction; the
    /// returned iterator yields exactly `hash_function_count` positions,
    /// each already reduced modulo `bit_count`.
    fn probe_positions(&self, data: &[u8]) -> QueryResult<ProbeSequence> {
        if !self.ready {
            return Err(QueryError::NotInitialized);
        }
        let Some(params) = self.params else {
            return Err(QueryError::NotInitialized);
        };

        let (a, b) = self.hasher.probe_pair(data);
        Ok(ProbeSequence {
            a,
            b,
            i: 0,
            k: params.hash_function_count,
            bit_count: params.bit_count,
        })
    }
}

/// Read-only description of a filter's sizing and state.
///
/// Returned by [`BloomFilter::describe`]; carries no references back into
/// the filter, so it can outlive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDescription {
    /// Planned number of distinct elements.
    pub entry_capacity: u32,
    /// Target false-positive probability.
    pub target_error_rate: f64,
    /// Bits of storage per planned element.
    pub bits_per_element: f64,
    /// Total bits in the filter.
    pub bit_count: u32,
    /// Bytes of backing storage.
    pub byte_count: u32,
    /// Probe positions per element.
    pub hash_function_count: u32,
    /// Whether the filter reached the ready state.
    pub ready: bool,
}

impl fmt::Display for FilterDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bloom filter")?;
        writeln!(f, " ->entries = {}", self.entry_capacity)?;
        writeln!(f, " ->error = {}", self.target_error_rate)?;
        writeln!(f, " ->bits = {}", self.bit_count)?;
        writeln!(f, " ->bits per elem = {:.6}", self.bits_per_element)?;
        writeln!(f, " ->bytes = {}", self.byte_count)?;
        writeln!(f, " ->hash functions = {}", self.hash_function_count)?;
        write!(f, " ->ready = {}", self.ready)
    }
}
