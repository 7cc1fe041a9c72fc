//! Core building blocks: sizing math and bit storage.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── params.rs  - capacity/error-driven sizing (FilterParams)
//! ├── arena.rs   - fixed-capacity zeroed bit arena (BitArena)
//! └── mod.rs     - this file (public API)
//! ```
//!
//! The filter itself lives one level up in [`crate::filter`]; it composes a
//! [`FilterParams`] sizing record, a [`BitArena`], and a hash engine from
//! [`crate::hash`].
//!
//! # Examples
//!
//! ```
//! use bloomsieve::core::{arena::BitArena, params::FilterParams};
//!
//! let params = FilterParams::from_targets(1002, 0.1).unwrap();
//! let arena = BitArena::zeroed(params.byte_count, BitArena::DEFAULT_CEILING).unwrap();
//! assert_eq!(arena.len_bytes(), params.byte_count);
//! assert_eq!(arena.count_ones(), 0);
//! ```

pub mod arena;
pub mod params;

pub use arena::BitArena;
pub use params::{bits_per_element, expected_error_rate, FilterParams, DEFAULT_MIN_ENTRIES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_compile() {
        let _ = bits_per_element(0.01);
        let _ = FilterParams::from_targets(1000, 0.01);
        let _ = BitArena::zeroed(10, BitArena::DEFAULT_CEILING);
    }

    #[test]
    fn test_params_size_a_matching_arena() {
        let params = FilterParams::from_targets(5000, 0.01).unwrap();
        let arena = BitArena::zeroed(params.byte_count, BitArena::DEFAULT_CEILING).unwrap();

        assert_eq!(arena.len_bytes(), params.byte_count);
        // Every bit position the probe loop can produce fits the arena.
        assert!(params.bit_count <= params.byte_count * 8);
    }

    #[test]
    fn test_ceiling_flows_through_sizing() {
        let params = FilterParams::from_targets(100_000, 0.001).unwrap();
        // A ceiling below the derived footprint rejects construction.
        let result = BitArena::zeroed(params.byte_count, params.byte_count - 1);
        assert!(result.is_err());
    }
}
