//! Capacity/error-driven sizing for the filter.
//!
//! Sizing starts from two design inputs — the planned number of distinct
//! entries `n` and the target false-positive probability `p` — and derives
//! everything else:
//!
//! ```text
//! bits_per_element   = -ln(p) / (ln 2)²
//! bit_count          = ⌊n × bits_per_element⌋
//! byte_count         = ⌈bit_count / 8⌉
//! hash_function_count = ⌈ln 2 × bits_per_element⌉
//! ```
//!
//! Note the *floor* on `bit_count` (libbloom's convention, not the
//! round-up some libraries use); the probe arithmetic depends on
//! reproducing it exactly.
//!
//! # Validation Policy
//!
//! - `n` below the configured minimum (default 1000) is rejected: the
//!   error-rate math stops being meaningful for tiny filters. The threshold
//!   is a policy knob, not a law — see [`FilterParams::with_min_entries`].
//! - `p` must lie in the open interval `(0, 1)`; zero, one, and NaN are all
//!   rejected.
//! - A derived `bit_count` of zero (p pathologically close to 1) is
//!   rejected; a zero-bit filter cannot host a probe sequence.
//!
//! # Examples
//!
//! ```
//! use bloomsieve::core::params::FilterParams;
//!
//! let params = FilterParams::from_targets(1002, 0.1).unwrap();
//! assert!((params.bits_per_element - 4.79).abs() < 0.01);
//! assert_eq!(params.byte_count, (params.bit_count + 7) / 8);
//! ```
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{SizingError, SizingResult};
use std::f64::consts::LN_2;

/// Mathematical constant: (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Default minimum entry capacity accepted by sizing.
///
/// Inherited from the original library's guard; configurations below this
/// are rejected as `InvalidParameters` unless the threshold is lowered.
pub const DEFAULT_MIN_ENTRIES: u32 = 1000;

/// Derived sizing record for one filter.
///
/// Computed once at construction and immutable afterwards. The invariants
/// in the module docs hold for every successfully constructed value:
/// `bit_count = ⌊entry_capacity × bits_per_element⌋`,
/// `byte_count = ⌈bit_count / 8⌉`, `hash_function_count ≥ 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Planned number of distinct elements (design input).
    pub entry_capacity: u32,
    /// Target false-positive probability (design input).
    pub target_error_rate: f64,
    /// Bits of storage per planned element.
    pub bits_per_element: f64,
    /// Total bits in the filter.
    pub bit_count: u32,
    /// Bytes of backing storage.
    pub byte_count: u32,
    /// Number of probe positions per element (k).
    pub hash_function_count: u32,
}

impl FilterParams {
    /// Derive sizing from design targets, using the default entry minimum.
    ///
    /// # Arguments
    ///
    /// * `entry_capacity` - Planned number of distinct elements (≥ [`DEFAULT_MIN_ENTRIES`])
    /// * `target_error_rate` - Desired false-positive probability, in `(0, 1)`
    ///
    /// # Errors
    ///
    /// [`SizingError::InvalidParameters`] if either input is out of range or
    /// the derived bit count collapses to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomsieve::core::params::FilterParams;
    ///
    /// let params = FilterParams::from_targets(10_000, 0.01).unwrap();
    /// assert!(params.hash_function_count >= 1);
    ///
    /// assert!(FilterParams::from_targets(10, 0.01).is_err());
    /// assert!(FilterParams::from_targets(10_000, 0.0).is_err());
    /// ```
    pub fn from_targets(entry_capacity: u32, target_error_rate: f64) -> SizingResult<Self> {
        Self::with_min_entries(entry_capacity, target_error_rate, DEFAULT_MIN_ENTRIES)
    }

    /// Derive sizing with a caller-chosen minimum entry capacity.
    ///
    /// The formulas are valid for any positive entry count; the 1000-entry
    /// floor is a usability guard, so callers who know what they are doing
    /// may lower it (it is clamped to at least 1).
    ///
    /// # Errors
    ///
    /// Same as [`FilterParams::from_targets`], with `min_entries` in place
    /// of the default threshold.
    pub fn with_min_entries(
        entry_capacity: u32,
        target_error_rate: f64,
        min_entries: u32,
    ) -> SizingResult<Self> {
        let min_entries = min_entries.max(1);
        if entry_capacity < min_entries {
            return Err(SizingError::invalid_parameters(format!(
                "entry capacity {} is below the minimum of {}",
                entry_capacity, min_entries
            )));
        }

        // The open-interval check also rejects NaN.
        if !(target_error_rate > 0.0 && target_error_rate < 1.0) {
            return Err(SizingError::invalid_parameters(format!(
                "target error rate {} is outside (0, 1)",
                target_error_rate
            )));
        }

        let bits_per_element = bits_per_element(target_error_rate);
        let bit_count_exact = (f64::from(entry_capacity) * bits_per_element).floor();
        if bit_count_exact < 1.0 {
            return Err(SizingError::invalid_parameters(format!(
                "error rate {} sizes the filter to zero bits",
                target_error_rate
            )));
        }
        if bit_count_exact > f64::from(u32::MAX) {
            return Err(SizingError::invalid_parameters(format!(
                "derived bit count {:.0} exceeds the 32-bit addressing range",
                bit_count_exact
            )));
        }

        let bit_count = bit_count_exact as u32;
        let byte_count = bit_count / 8 + u32::from(bit_count % 8 != 0);
        let hash_function_count = (LN_2 * bits_per_element).ceil() as u32;

        Ok(Self {
            entry_capacity,
            target_error_rate,
            bits_per_element,
            bit_count,
            byte_count,
            hash_function_count,
        })
    }
}

/// Bits of storage needed per element for a target error rate.
///
/// Formula: `-ln(p) / (ln 2)²`. The caller is responsible for range
/// checking `p`; out-of-range inputs produce meaningless (possibly
/// non-finite) values rather than errors.
///
/// # Examples
///
/// ```
/// use bloomsieve::core::params::bits_per_element;
///
/// // 1% error rate costs ~9.6 bits per element.
/// assert!((bits_per_element(0.01) - 9.6).abs() < 0.1);
/// ```
#[must_use]
pub fn bits_per_element(target_error_rate: f64) -> f64 {
    -target_error_rate.ln() / LN2_SQUARED
}

/// Expected false-positive rate after `inserted` elements.
///
/// Formula: `(1 - e^(-k·n/m))^k`. Used by the statistical tests to derive
/// tolerance bounds from the actual (floored/ceiled) sizing rather than the
/// nominal target.
///
/// # Examples
///
/// ```
/// use bloomsieve::core::params::{expected_error_rate, FilterParams};
///
/// let p = FilterParams::from_targets(10_000, 0.01).unwrap();
/// let rate = expected_error_rate(p.bit_count, p.entry_capacity, p.hash_function_count);
/// assert!((rate - 0.01).abs() < 0.005);
/// ```
#[must_use]
pub fn expected_error_rate(bit_count: u32, inserted: u32, hash_function_count: u32) -> f64 {
    if bit_count == 0 || inserted == 0 {
        return 0.0;
    }
    let m = f64::from(bit_count);
    let n = f64::from(inserted);
    let k = f64::from(hash_function_count);

    let prob_bit_set = 1.0 - (-(k * n) / m).exp();
    prob_bit_set.powf(k).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln2_squared_constant() {
        let expected = 0.480_453_013_918_201_4;
        assert!((LN2_SQUARED - expected).abs() < 1e-10);
    }

    #[test]
    fn test_sizing_concrete_case_1002_at_10_percent() {
        // Verified against the formulas, not hardcoded outputs.
        let params = FilterParams::from_targets(1002, 0.1).unwrap();

        let bpe = -(0.1f64).ln() / LN2_SQUARED;
        assert!((params.bits_per_element - bpe).abs() < 1e-12);
        assert!((params.bits_per_element - 4.8).abs() < 0.05);

        assert_eq!(params.bit_count, (1002.0 * bpe).floor() as u32);
        assert_eq!(params.byte_count, (params.bit_count + 7) / 8);
        assert_eq!(
            params.hash_function_count,
            (std::f64::consts::LN_2 * bpe).ceil() as u32
        );
        assert!(params.hash_function_count >= 1 && params.hash_function_count < 10);
    }

    #[test]
    fn test_sizing_scales_linearly_with_entries() {
        let small = FilterParams::from_targets(1000, 0.01).unwrap();
        let large = FilterParams::from_targets(100_000, 0.01).unwrap();

        assert_eq!(small.hash_function_count, large.hash_function_count);
        let ratio = f64::from(large.bit_count) / f64::from(small.bit_count);
        assert!((ratio - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_tighter_error_rate_needs_more_bits_and_hashes() {
        let loose = FilterParams::from_targets(10_000, 0.1).unwrap();
        let tight = FilterParams::from_targets(10_000, 0.001).unwrap();

        assert!(tight.bit_count > loose.bit_count);
        assert!(tight.hash_function_count > loose.hash_function_count);
    }

    #[test]
    fn test_rejects_entry_capacity_below_minimum() {
        assert!(FilterParams::from_targets(0, 0.01).is_err());
        assert!(FilterParams::from_targets(999, 0.01).is_err());
        assert!(FilterParams::from_targets(1000, 0.01).is_ok());
    }

    #[test]
    fn test_rejects_error_rate_outside_open_interval() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let result = FilterParams::from_targets(1000, bad);
            assert!(
                matches!(result, Err(SizingError::InvalidParameters { .. })),
                "rate {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_zero_bit_sizing() {
        // bpe ≈ 0.0002 at p = 0.9999, flooring 1000 entries to 0 bits.
        let result = FilterParams::from_targets(1000, 0.9999);
        assert!(matches!(result, Err(SizingError::InvalidParameters { .. })));
    }

    #[test]
    fn test_custom_minimum_entries() {
        assert!(FilterParams::with_min_entries(10, 0.01, 10).is_ok());
        assert!(FilterParams::with_min_entries(9, 0.01, 10).is_err());
        // Threshold zero clamps to one; zero entries stay invalid.
        assert!(FilterParams::with_min_entries(0, 0.01, 0).is_err());
        assert!(FilterParams::with_min_entries(1, 0.01, 0).is_ok());
    }

    #[test]
    fn test_byte_count_rounds_up() {
        let params = FilterParams::from_targets(1000, 0.01).unwrap();
        if params.bit_count % 8 == 0 {
            assert_eq!(params.byte_count, params.bit_count / 8);
        } else {
            assert_eq!(params.byte_count, params.bit_count / 8 + 1);
        }
    }

    #[test]
    fn test_bits_per_element_reference_points() {
        assert!((bits_per_element(0.01) - 9.6).abs() < 0.1);
        assert!((bits_per_element(0.001) - 14.4).abs() < 0.1);
    }

    #[test]
    fn test_expected_error_rate_tracks_target() {
        for target in [0.1, 0.01, 0.001] {
            let p = FilterParams::from_targets(10_000, target).unwrap();
            let rate =
                expected_error_rate(p.bit_count, p.entry_capacity, p.hash_function_count);
            let relative = (rate - target).abs() / target;
            assert!(
                relative < 0.35,
                "target {} produced expected rate {}",
                target,
                rate
            );
        }
    }

    #[test]
    fn test_expected_error_rate_empty_filter() {
        assert_eq!(expected_error_rate(1000, 0, 7), 0.0);
    }

    #[test]
    fn test_params_are_copy_and_comparable() {
        let a = FilterParams::from_targets(1002, 0.1).unwrap();
        let b = a;
        assert_eq!(a, b);
    }
}
