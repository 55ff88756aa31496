//! Comprehensive tests for the primitive coercion library
//!
//! Covers each primitive's accepted shapes, its fallback behaviour, and the
//! reason recorded when a fallback is taken.

use chrono::{TimeZone, Utc};
use pagekit_domain::coercion::{
    DEFAULT_ARRAY_SEPARATOR, coerce_array, coerce_boolean, coerce_date, coerce_enum,
    coerce_json, coerce_number, coerce_string, parse_array, parse_boolean, parse_date,
    parse_enum, parse_json, parse_number, parse_string,
};
use pagekit_domain::{Coerced, DefaultReason, RawValue};

fn text(s: &str) -> RawValue {
    RawValue::text(s)
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_number_absent_and_empty_use_default() {
    assert_eq!(parse_number(None, Some(7.0), None, None), Some(7.0));
    assert_eq!(parse_number(Some(&RawValue::Null), Some(7.0), None, None), Some(7.0));
    assert_eq!(parse_number(Some(&text("   ")), Some(7.0), None, None), Some(7.0));
    assert_eq!(parse_number(None, None, None, None), None);
}

#[test]
fn test_number_reasons() {
    assert_eq!(
        coerce_number(None, None, None, None).reason(),
        Some(DefaultReason::Absent)
    );
    assert_eq!(
        coerce_number(Some(&text("abc")), None, None, None).reason(),
        Some(DefaultReason::Malformed)
    );
    assert_eq!(
        coerce_number(Some(&text("inf")), None, None, None).reason(),
        Some(DefaultReason::NonFinite)
    );
    assert_eq!(
        coerce_number(Some(&text("NaN")), None, None, None).reason(),
        Some(DefaultReason::NonFinite)
    );
}

#[test]
fn test_number_bounds_act_as_secondary_defaults() {
    let below = coerce_number(Some(&text("0")), None, Some(1.0), Some(100.0));
    assert_eq!(below, Coerced::Defaulted(Some(1.0), DefaultReason::BelowMinimum));

    let above = coerce_number(Some(&text("9999")), None, Some(1.0), Some(100.0));
    assert_eq!(above, Coerced::Defaulted(Some(100.0), DefaultReason::AboveMaximum));

    // An explicit default wins over the violated bound
    let above = parse_number(Some(&text("9999")), Some(10.0), Some(1.0), Some(100.0));
    assert_eq!(above, Some(10.0));
}

#[test]
fn test_number_accepts_structured_and_list_input() {
    assert_eq!(
        parse_number(Some(&RawValue::Number(3.5)), None, None, None),
        Some(3.5)
    );
    assert_eq!(
        parse_number(Some(&RawValue::from(vec!["12"])), None, None, None),
        Some(12.0)
    );
    assert_eq!(
        coerce_number(Some(&RawValue::from(vec!["1", "2"])), None, None, None).reason(),
        Some(DefaultReason::Malformed)
    );
}

#[test]
fn test_number_in_range_is_parsed() {
    let coerced = coerce_number(Some(&text(" -2.5 ")), None, Some(-10.0), Some(10.0));
    assert_eq!(coerced, Coerced::Parsed(Some(-2.5)));
}

// ============================================================================
// Booleans
// ============================================================================

#[test]
fn test_boolean_literals() {
    for literal in ["true", "1", "yes", "on", " TRUE ", "Yes"] {
        assert_eq!(parse_boolean(Some(&text(literal)), None), Some(true), "{literal}");
    }
    for literal in ["false", "0", "no", "off", "OFF"] {
        assert_eq!(parse_boolean(Some(&text(literal)), None), Some(false), "{literal}");
    }
}

#[test]
fn test_boolean_unrecognized_uses_default() {
    assert_eq!(parse_boolean(Some(&text("maybe")), Some(false)), Some(false));
    assert_eq!(parse_boolean(Some(&text("2")), None), None);
    assert_eq!(
        coerce_boolean(Some(&text("maybe")), None).reason(),
        Some(DefaultReason::Malformed)
    );
    assert_eq!(parse_boolean(Some(&RawValue::Bool(true)), None), Some(true));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_trims_and_defaults() {
    assert_eq!(parse_string(Some(&text("  hi  ")), None, None), Some("hi".to_string()));
    assert_eq!(
        parse_string(Some(&text("   ")), Some("fallback"), None),
        Some("fallback".to_string())
    );
    assert_eq!(parse_string(None, None, None), None);
}

#[test]
fn test_string_truncates_instead_of_rejecting() {
    let long = "x".repeat(300);
    let coerced = coerce_string(Some(&text(&long)), None, Some(255));
    assert_eq!(coerced.reason(), Some(DefaultReason::Truncated));
    assert_eq!(coerced.into_value().map(|s| s.len()), Some(255));
}

#[test]
fn test_string_truncation_respects_characters() {
    let coerced = parse_string(Some(&text("héllo wörld")), None, Some(7));
    assert_eq!(coerced, Some("héllo w".to_string()));

    // Whitespace exposed by the cut is trimmed
    let coerced = parse_string(Some(&text("ab   cd")), None, Some(4));
    assert_eq!(coerced, Some("ab".to_string()));
}

#[test]
fn test_string_without_limit_keeps_long_text() {
    let long = "y".repeat(300);
    assert_eq!(parse_string(Some(&text(&long)), None, None), Some(long));
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn test_array_splits_text() {
    assert_eq!(
        parse_array(Some(&text("a, b,,c ")), DEFAULT_ARRAY_SEPARATOR),
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
    assert_eq!(
        parse_array(Some(&text("a|b")), "|"),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn test_array_lists_pass_through() {
    let list = RawValue::List(vec![text("x"), text(""), RawValue::Number(2.0)]);
    assert_eq!(
        parse_array(Some(&list), ","),
        Some(vec!["x".to_string(), "2".to_string()])
    );
}

#[test]
fn test_array_absent_is_none() {
    assert_eq!(parse_array(None, ","), None);
    assert_eq!(
        coerce_array(Some(&RawValue::Null), ",").reason(),
        Some(DefaultReason::Absent)
    );
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn test_enum_case_insensitive_returns_allowed_spelling() {
    let allowed = ["createdAt", "name"];
    assert_eq!(
        parse_enum(Some(&text("CREATEDAT")), &allowed, None),
        Some("createdAt")
    );
}

#[test]
fn test_enum_no_match_uses_default() {
    let allowed = vec!["asc".to_string(), "desc".to_string()];
    let coerced = coerce_enum(Some(&text("sideways")), &allowed, Some("desc".to_string()));
    assert_eq!(
        coerced,
        Coerced::Defaulted(Some("desc".to_string()), DefaultReason::NotAllowed)
    );
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_date_formats() {
    let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_date(Some(&text("2024-03-01")), None), Some(midnight));

    let noon = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    assert_eq!(parse_date(Some(&text("2024-03-01T12:30:00Z")), None), Some(noon));
    assert_eq!(parse_date(Some(&text("2024-03-01T14:30:00+02:00")), None), Some(noon));
    assert_eq!(parse_date(Some(&text("2024-03-01 12:30:00")), None), Some(noon));
    assert_eq!(parse_date(Some(&text("2024-03-01T12:30:00")), None), Some(noon));
}

#[test]
fn test_date_from_instances_and_epoch_millis() {
    let at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_date(Some(&RawValue::Date(at)), None), Some(at));
    assert_eq!(
        parse_date(Some(&RawValue::Number(at.timestamp_millis() as f64)), None),
        Some(at)
    );
}

#[test]
fn test_date_invalid_uses_default() {
    let fallback = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_date(Some(&text("not a date")), Some(fallback)), Some(fallback));
    assert_eq!(
        coerce_date(Some(&text("2024-13-45")), None).reason(),
        Some(DefaultReason::Malformed)
    );
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_parses_text() {
    assert_eq!(
        parse_json(Some(&text(r#"{"status":"active"}"#)), None),
        Some(serde_json::json!({"status": "active"}))
    );
}

#[test]
fn test_json_malformed_uses_default() {
    let fallback = serde_json::json!({});
    assert_eq!(parse_json(Some(&text("{oops")), Some(fallback.clone())), Some(fallback));
    assert_eq!(
        coerce_json(Some(&text("{oops")), None).reason(),
        Some(DefaultReason::Malformed)
    );
}

#[test]
fn test_json_structured_input_converted() {
    let raw = RawValue::from(serde_json::json!({"a": [1, 2]}));
    assert_eq!(parse_json(Some(&raw), None), Some(serde_json::json!({"a": [1.0, 2.0]})));
}

#[test]
fn test_strict_view_surfaces_reason() {
    let strict = coerce_number(Some(&text("abc")), Some(10.0), None, None).into_strict();
    assert_eq!(strict, Err(DefaultReason::Malformed));

    let strict = coerce_boolean(Some(&text("yes")), None).into_strict();
    assert_eq!(strict, Ok(Some(true)));
}
