//! End-to-end filter behavior through the public API.

use bloomsieve::core::params::expected_error_rate;
use bloomsieve::{BloomFilter, FilterBuilder, QueryError, SizingError};

#[test]
fn test_basic_add_and_find() {
    let mut filter = BloomFilter::new(1002, 0.1).unwrap();

    assert!(!filter.add(b"test-item").unwrap());

    assert!(
        filter.check(b"test-item").unwrap(),
        "Should find the item we just added"
    );
}

/// The classic smoke sequence: bad params rejected, unready filter errors,
/// then a small filter exercises check/add/re-add on two keys.
#[test]
fn test_canonical_flow() {
    // Rejection cases.
    assert!(matches!(
        BloomFilter::new(0, 1.0),
        Err(SizingError::InvalidParameters { .. })
    ));
    assert!(matches!(
        BloomFilter::new(10, 0.0),
        Err(SizingError::InvalidParameters { .. })
    ));

    // Operations on a filter that never initialized.
    let mut unready = BloomFilter::empty();
    assert_eq!(unready.add(b"hello world"), Err(QueryError::NotInitialized));
    assert_eq!(unready.check(b"hello world"), Err(QueryError::NotInitialized));

    // A real filter.
    let mut filter = BloomFilter::new(1002, 0.1).unwrap();
    assert!(filter.is_ready());

    assert!(!filter.check(b"hello world").unwrap());
    assert!(!filter.add(b"hello world").unwrap());
    assert!(filter.check(b"hello world").unwrap());
    assert!(filter.add(b"hello world").unwrap());

    assert!(!filter.add(b"hello").unwrap());
    assert!(filter.add(b"hello").unwrap());

    assert!(filter.check(b"hello").unwrap());
    assert!(filter.check(b"hello world").unwrap());
}

#[test]
fn test_sizing_report_for_1002_at_10_percent() {
    let filter = BloomFilter::new(1002, 0.1).unwrap();
    let desc = filter.describe();

    assert!(desc.ready);
    assert!((desc.bits_per_element - 4.8).abs() < 0.05);
    assert!(desc.hash_function_count >= 1 && desc.hash_function_count < 10);

    // Derived fields obey the formulas, not hardcoded constants.
    assert_eq!(
        desc.bit_count,
        (f64::from(desc.entry_capacity) * desc.bits_per_element).floor() as u32
    );
    assert_eq!(desc.byte_count, (desc.bit_count + 7) / 8);
    assert_eq!(
        desc.hash_function_count,
        (std::f64::consts::LN_2 * desc.bits_per_element).ceil() as u32
    );
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilter::new(1000, 0.01).unwrap();

    for i in 0..1000u32 {
        filter.add(&i.to_le_bytes()).unwrap();
    }

    // All inserted items MUST be found (no false negatives allowed).
    for i in 0..1000u32 {
        assert!(
            filter.check(&i.to_le_bytes()).unwrap(),
            "False negative for {}",
            i
        );
    }
}

#[test]
fn test_no_false_negatives_with_interleaved_inserts() {
    let mut filter = BloomFilter::new(5000, 0.01).unwrap();

    filter.add(b"anchor").unwrap();
    for i in 0..2500u32 {
        filter.add(format!("other-{i}").as_bytes()).unwrap();
        // Later inserts never evict earlier elements.
        assert!(filter.check(b"anchor").unwrap());
    }
}

#[test]
fn test_observed_false_positive_rate_near_target() {
    const ENTRIES: u32 = 10_000;
    const TARGET: f64 = 0.01;

    let mut filter = BloomFilter::new(ENTRIES, TARGET).unwrap();
    for i in 0..ENTRIES {
        filter.add(format!("member-{i}").as_bytes()).unwrap();
    }

    let probes = 10_000u32;
    let mut false_positives = 0u32;
    for i in 0..probes {
        if filter.check(format!("absent-{i}").as_bytes()).unwrap() {
            false_positives += 1;
        }
    }

    let observed = f64::from(false_positives) / f64::from(probes);
    let predicted = expected_error_rate(
        filter.bit_count(),
        filter.entry_capacity(),
        filter.hash_function_count(),
    );

    // Tolerance-based: the observed rate must sit in a generous band
    // around the formula's prediction (~1%, sampling σ ≈ 0.1%).
    assert!(
        observed < 2.0 * TARGET,
        "observed {} far above target {} (predicted {})",
        observed,
        TARGET,
        predicted
    );
    assert!(
        observed > TARGET / 5.0,
        "observed {} implausibly below target {} (predicted {})",
        observed,
        TARGET,
        predicted
    );
}

#[test]
fn test_collision_count_while_inserting_distinct_keys() {
    // Inserting n distinct keys into a filter sized for n: `add` returning
    // true is a collision, and there should be only a handful.
    const ENTRIES: u32 = 5_000;

    let mut filter = BloomFilter::new(ENTRIES, 0.01).unwrap();
    let mut collisions = 0u32;
    for i in 0..ENTRIES {
        if filter.add(&i.to_le_bytes()).unwrap() {
            collisions += 1;
        }
    }

    // The fill rate (and hence collision odds) stays below the target rate
    // until the filter approaches capacity; 1% of n is a generous bound.
    assert!(
        collisions < ENTRIES / 100,
        "{} collisions while filling to capacity",
        collisions
    );
}

#[test]
fn test_capacity_exceeded_through_builder_ceiling() {
    let err = FilterBuilder::new()
        .expected_entries(100_000)
        .error_rate(0.001)
        .arena_ceiling(1024)
        .build()
        .unwrap_err();

    match err {
        SizingError::CapacityExceeded { required, max } => {
            assert_eq!(max, 1024);
            assert!(required > u64::from(max));
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
}

#[test]
fn test_describe_is_side_effect_free() {
    let mut filter = BloomFilter::new(1002, 0.1).unwrap();
    filter.add(b"payload").unwrap();

    let before = filter.describe();
    let _ = filter.describe();
    let after = filter.describe();

    assert_eq!(before, after);
    assert!(filter.check(b"payload").unwrap());
}

#[test]
fn test_binary_keys_with_embedded_nul_bytes() {
    let mut filter = BloomFilter::new(1002, 0.1).unwrap();

    let key_a = [0u8, 0, 1, 0, 0];
    let key_b = [0u8, 0, 0, 1, 0];

    assert!(!filter.add(&key_a).unwrap());
    assert!(filter.check(&key_a).unwrap());
    assert!(!filter.check(&key_b).unwrap());
}
