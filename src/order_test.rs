use super::*;

fn key(s: &str) -> OrderKey {
    OrderKey::parse(s).unwrap()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn first_key_is_a0() {
    assert_eq!(OrderKey::first().as_str(), "a0");
    assert_eq!(OrderKey::default(), OrderKey::first());
}

#[test]
fn parse_accepts_well_formed_keys() {
    for s in ["a0", "a1", "b00", "Zz", "a0V", "zzzzzzzzzzzzzzzzzzzzzzzzzzz"] {
        assert!(OrderKey::parse(s).is_ok(), "{s} should parse");
    }
}

#[test]
fn parse_rejects_malformed_keys() {
    for s in ["", "a", "!0", "a00", "a0 ", "b0", "A00000000000000000000000000"] {
        assert_eq!(OrderKey::parse(s), Err(OrderKeyError::Invalid(s.to_owned())), "{s} should not parse");
    }
}

#[test]
fn serde_validates_keys() {
    let ok: OrderKey = serde_json::from_str("\"a5\"").unwrap();
    assert_eq!(ok, key("a5"));
    assert!(serde_json::from_str::<OrderKey>("\"a50\"").is_err());
    assert_eq!(serde_json::to_string(&ok).unwrap(), "\"a5\"");
}

// =============================================================
// Integer stepping
// =============================================================

#[test]
fn after_steps_the_integer_part() {
    assert_eq!(key("a0").after(), key("a1"));
    assert_eq!(key("a9").after(), key("aA"));
    assert_eq!(key("az").after(), key("b00"));
    assert_eq!(key("Zz").after(), key("a0"));
}

#[test]
fn after_drops_the_fraction() {
    assert_eq!(key("a0V").after(), key("a1"));
}

#[test]
fn before_steps_down() {
    assert_eq!(key("a1").before().unwrap(), key("a0"));
    assert_eq!(key("a0").before().unwrap(), key("Zz"));
    assert_eq!(key("b00").before().unwrap(), key("az"));
    assert_eq!(key("a0V").before().unwrap(), key("a0"));
}

#[test]
fn repeated_after_is_strictly_increasing() {
    let mut k = OrderKey::first();
    for _ in 0..500 {
        let next = k.after();
        assert!(next > k, "{next} should sort after {k}");
        k = next;
    }
    // Integer parts grow logarithmically, not one char per step.
    assert!(k.as_str().len() <= 3);
}

#[test]
fn repeated_before_is_strictly_decreasing() {
    let mut k = OrderKey::first();
    for _ in 0..500 {
        let next = k.before().unwrap();
        assert!(next < k, "{next} should sort before {k}");
        k = next;
    }
}

// =============================================================
// between
// =============================================================

#[test]
fn between_open_ends() {
    assert_eq!(OrderKey::between(None, None).unwrap(), OrderKey::first());
    assert_eq!(OrderKey::between(Some(&key("a0")), None).unwrap(), key("a1"));
    assert_eq!(OrderKey::between(None, Some(&key("a0"))).unwrap(), key("Zz"));
}

#[test]
fn between_adjacent_integers_uses_fraction() {
    let mid = OrderKey::between(Some(&key("a0")), Some(&key("a1"))).unwrap();
    assert_eq!(mid, key("a0V"));
}

#[test]
fn between_distant_integers_increments() {
    let mid = OrderKey::between(Some(&key("a0")), Some(&key("a5"))).unwrap();
    assert_eq!(mid, key("a1"));
}

#[test]
fn between_rejects_unordered_bounds() {
    let err = OrderKey::between(Some(&key("a1")), Some(&key("a0"))).unwrap_err();
    assert!(matches!(err, OrderKeyError::NotAscending { .. }));
    assert!(OrderKey::between(Some(&key("a1")), Some(&key("a1"))).is_err());
}

#[test]
fn repeated_bisection_stays_between() {
    let low = key("a0");
    let mut high = key("a1");
    for _ in 0..100 {
        let mid = OrderKey::between(Some(&low), Some(&high)).unwrap();
        assert!(low < mid && mid < high, "{low} < {mid} < {high}");
        high = mid;
    }
    let mut low = key("a0");
    let high = key("a1");
    for _ in 0..100 {
        let mid = OrderKey::between(Some(&low), Some(&high)).unwrap();
        assert!(low < mid && mid < high, "{low} < {mid} < {high}");
        low = mid;
    }
}

#[test]
fn generated_keys_never_end_in_zero() {
    let mut k = key("a0");
    let top = key("a1");
    for _ in 0..50 {
        k = OrderKey::between(Some(&k), Some(&top)).unwrap();
        assert!(!k.as_str().ends_with('0'), "{k}");
        assert!(OrderKey::parse(k.as_str()).is_ok());
    }
}
