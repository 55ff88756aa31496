use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::{Coerced, DefaultReason};
use crate::value_objects::RawValue;

/// Separator used by [`parse_array`] when splitting text
pub const DEFAULT_ARRAY_SEPARATOR: &str = ",";

const TRUE_LITERALS: [&str; 4] = ["true", "1", "yes", "on"];
const FALSE_LITERALS: [&str; 4] = ["false", "0", "no", "off"];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Trimmed scalar text, or the reason there is none
fn scalar_text(value: Option<&RawValue>) -> Result<String, DefaultReason> {
    match value {
        None | Some(RawValue::Null) => Err(DefaultReason::Absent),
        Some(raw) => {
            let text = raw.as_scalar().ok_or(DefaultReason::Malformed)?;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err(DefaultReason::Absent)
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

/// Coerce a number with optional bounds
///
/// Out-of-range input falls back to `default`, or to the violated bound
/// when no default is given. The bound is a secondary default here, not a
/// hard clamp.
pub fn coerce_number(
    value: Option<&RawValue>,
    default: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
) -> Coerced<Option<f64>> {
    let number = match value {
        Some(RawValue::Number(n)) => *n,
        other => match scalar_text(other) {
            Ok(text) => match text.parse::<f64>() {
                Ok(n) => n,
                Err(_) => return Coerced::Defaulted(default, DefaultReason::Malformed),
            },
            Err(reason) => return Coerced::Defaulted(default, reason),
        },
    };

    if !number.is_finite() {
        return Coerced::Defaulted(default, DefaultReason::NonFinite);
    }
    if let Some(min) = min
        && number < min
    {
        return Coerced::Defaulted(default.or(Some(min)), DefaultReason::BelowMinimum);
    }
    if let Some(max) = max
        && number > max
    {
        return Coerced::Defaulted(default.or(Some(max)), DefaultReason::AboveMaximum);
    }

    Coerced::Parsed(Some(number))
}

/// Collapsed form of [`coerce_number`]
///
/// # Examples
/// ```
/// # use pagekit_domain::coercion::parse_number;
/// # use pagekit_domain::RawValue;
/// assert_eq!(parse_number(Some(&RawValue::text(" 42 ")), None, None, None), Some(42.0));
/// assert_eq!(parse_number(Some(&RawValue::text("abc")), Some(10.0), None, None), Some(10.0));
/// assert_eq!(parse_number(Some(&RawValue::text("500")), None, Some(1.0), Some(100.0)), Some(100.0));
/// ```
pub fn parse_number(
    value: Option<&RawValue>,
    default: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
) -> Option<f64> {
    coerce_number(value, default, min, max).into_value()
}

/// Coerce a boolean from `true/1/yes/on` or `false/0/no/off`
pub fn coerce_boolean(value: Option<&RawValue>, default: Option<bool>) -> Coerced<Option<bool>> {
    if let Some(RawValue::Bool(b)) = value {
        return Coerced::Parsed(Some(*b));
    }

    let text = match scalar_text(value) {
        Ok(text) => text.to_ascii_lowercase(),
        Err(reason) => return Coerced::Defaulted(default, reason),
    };

    if TRUE_LITERALS.contains(&text.as_str()) {
        Coerced::Parsed(Some(true))
    } else if FALSE_LITERALS.contains(&text.as_str()) {
        Coerced::Parsed(Some(false))
    } else {
        Coerced::Defaulted(default, DefaultReason::Malformed)
    }
}

/// Collapsed form of [`coerce_boolean`]
pub fn parse_boolean(value: Option<&RawValue>, default: Option<bool>) -> Option<bool> {
    coerce_boolean(value, default).into_value()
}

/// Coerce trimmed text, truncating to `max_length` characters
///
/// Truncation never splits a character. Whitespace exposed at the end by
/// the cut is trimmed as well, and a cut that leaves nothing yields
/// `default`.
pub fn coerce_string(
    value: Option<&RawValue>,
    default: Option<&str>,
    max_length: Option<usize>,
) -> Coerced<Option<String>> {
    let text = match scalar_text(value) {
        Ok(text) => text,
        Err(reason) => return Coerced::Defaulted(default.map(str::to_string), reason),
    };

    match max_length {
        Some(max) if text.chars().count() > max => {
            let truncated: String = text.chars().take(max).collect();
            let truncated = truncated.trim_end();
            if truncated.is_empty() {
                return Coerced::Defaulted(default.map(str::to_string), DefaultReason::Truncated);
            }
            Coerced::Defaulted(Some(truncated.to_string()), DefaultReason::Truncated)
        }
        _ => Coerced::Parsed(Some(text)),
    }
}

/// Collapsed form of [`coerce_string`]
///
/// Truncated text is right-trimmed, so `"red shoes"` cut to 4 characters
/// yields `"red"` rather than `"red "`. The result is always a fixed point:
/// parsing it again with the same `max_length` returns it unchanged.
pub fn parse_string(
    value: Option<&RawValue>,
    default: Option<&str>,
    max_length: Option<usize>,
) -> Option<String> {
    coerce_string(value, default, max_length).into_value()
}

/// Coerce a list of strings
///
/// Lists pass through with every entry stringified and empty entries
/// dropped. Text is split on `separator`, trimmed, and empties dropped.
/// Absent or empty input yields `None`.
pub fn coerce_array(value: Option<&RawValue>, separator: &str) -> Coerced<Option<Vec<String>>> {
    match value {
        None | Some(RawValue::Null) => Coerced::Defaulted(None, DefaultReason::Absent),
        Some(RawValue::List(items)) => Coerced::Parsed(Some(
            items
                .iter()
                .filter_map(|item| item.as_scalar().map(|s| s.into_owned()))
                .filter(|s| !s.is_empty())
                .collect(),
        )),
        Some(RawValue::Map(_)) => Coerced::Defaulted(None, DefaultReason::Malformed),
        Some(raw) => match raw.as_scalar() {
            Some(text) if !text.is_empty() => Coerced::Parsed(Some(
                text.split(separator)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            _ => Coerced::Defaulted(None, DefaultReason::Absent),
        },
    }
}

/// Collapsed form of [`coerce_array`]
pub fn parse_array(value: Option<&RawValue>, separator: &str) -> Option<Vec<String>> {
    coerce_array(value, separator).into_value()
}

/// Case-insensitive match against `allowed`
///
/// Returns the matching member of `allowed` (its spelling, not the input's).
pub fn coerce_enum<T>(value: Option<&RawValue>, allowed: &[T], default: Option<T>) -> Coerced<Option<T>>
where
    T: AsRef<str> + Clone,
{
    let text = match scalar_text(value) {
        Ok(text) => text,
        Err(reason) => return Coerced::Defaulted(default, reason),
    };

    match allowed.iter().find(|candidate| {
        let candidate: &str = (*candidate).as_ref();
        candidate.eq_ignore_ascii_case(&text)
    }) {
        Some(found) => Coerced::Parsed(Some(found.clone())),
        None => Coerced::Defaulted(default, DefaultReason::NotAllowed),
    }
}

/// Collapsed form of [`coerce_enum`]
///
/// # Examples
/// ```
/// # use pagekit_domain::coercion::parse_enum;
/// # use pagekit_domain::RawValue;
/// let allowed = ["asc", "desc"];
/// assert_eq!(parse_enum(Some(&RawValue::text("DESC")), &allowed, None), Some("desc"));
/// assert_eq!(parse_enum(Some(&RawValue::text("up")), &allowed, Some("asc")), Some("asc"));
/// ```
pub fn parse_enum<T>(value: Option<&RawValue>, allowed: &[T], default: Option<T>) -> Option<T>
where
    T: AsRef<str> + Clone,
{
    coerce_enum(value, allowed, default).into_value()
}

/// Coerce a timestamp
///
/// Accepts [`RawValue::Date`], numbers as epoch milliseconds, RFC 3339
/// text, `YYYY-MM-DD` (midnight UTC) and `YYYY-MM-DD[T ]HH:MM:SS` (UTC).
pub fn coerce_date(
    value: Option<&RawValue>,
    default: Option<DateTime<Utc>>,
) -> Coerced<Option<DateTime<Utc>>> {
    let parsed = match value {
        Some(RawValue::Date(date)) => Some(*date),
        Some(RawValue::Number(millis)) if millis.is_finite() => {
            DateTime::from_timestamp_millis(millis.floor() as i64)
        }
        other => match scalar_text(other) {
            Ok(text) => parse_date_text(&text),
            Err(reason) => return Coerced::Defaulted(default, reason),
        },
    };

    match parsed {
        Some(date) => Coerced::Parsed(Some(date)),
        None => Coerced::Defaulted(default, DefaultReason::Malformed),
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|dt| dt.and_utc())
}

/// Collapsed form of [`coerce_date`]
pub fn parse_date(value: Option<&RawValue>, default: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    coerce_date(value, default).into_value()
}

/// Best-effort JSON decoding
///
/// Text is parsed as JSON; already-structured input (lists, maps, numbers,
/// booleans) is converted as is.
pub fn coerce_json(
    value: Option<&RawValue>,
    default: Option<serde_json::Value>,
) -> Coerced<Option<serde_json::Value>> {
    match value {
        None | Some(RawValue::Null) => Coerced::Defaulted(default, DefaultReason::Absent),
        Some(RawValue::Text(text)) => match serde_json::from_str(text) {
            Ok(json) => Coerced::Parsed(Some(json)),
            Err(_) => Coerced::Defaulted(default, DefaultReason::Malformed),
        },
        Some(raw) => Coerced::Parsed(Some(raw.to_json())),
    }
}

/// Collapsed form of [`coerce_json`]
pub fn parse_json(
    value: Option<&RawValue>,
    default: Option<serde_json::Value>,
) -> Option<serde_json::Value> {
    coerce_json(value, default).into_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::text(s)
    }

    #[test]
    fn test_number_absent_and_empty() {
        assert_eq!(
            coerce_number(None, Some(1.0), None, None),
            Coerced::Defaulted(Some(1.0), DefaultReason::Absent)
        );
        assert_eq!(
            coerce_number(Some(&text("   ")), None, None, None),
            Coerced::Defaulted(None, DefaultReason::Absent)
        );
    }

    #[test]
    fn test_number_non_finite() {
        assert_eq!(
            coerce_number(Some(&text("Infinity")), Some(3.0), None, None),
            Coerced::Defaulted(Some(3.0), DefaultReason::NonFinite)
        );
        assert_eq!(
            coerce_number(Some(&text("NaN")), None, None, None).reason(),
            Some(DefaultReason::NonFinite)
        );
    }

    #[test]
    fn test_number_bounds_are_secondary_defaults() {
        assert_eq!(
            parse_number(Some(&text("0")), None, Some(1.0), Some(100.0)),
            Some(1.0)
        );
        assert_eq!(
            parse_number(Some(&text("0")), Some(10.0), Some(1.0), Some(100.0)),
            Some(10.0)
        );
        assert_eq!(
            parse_number(Some(&text("9999")), Some(10.0), Some(1.0), Some(100.0)),
            Some(10.0)
        );
        assert_eq!(
            parse_number(Some(&text("50")), Some(10.0), Some(1.0), Some(100.0)),
            Some(50.0)
        );
    }

    #[test]
    fn test_number_from_structured_input() {
        assert_eq!(parse_number(Some(&RawValue::Number(2.5)), None, None, None), Some(2.5));
        assert_eq!(
            parse_number(Some(&RawValue::from(vec!["7"])), None, None, None),
            Some(7.0)
        );
        assert_eq!(
            coerce_number(Some(&RawValue::from(vec!["1", "2"])), None, None, None).reason(),
            Some(DefaultReason::Malformed)
        );
    }

    #[test]
    fn test_boolean_literals() {
        for literal in ["true", "1", "YES", " on "] {
            assert_eq!(parse_boolean(Some(&text(literal)), None), Some(true), "{literal}");
        }
        for literal in ["false", "0", "No", "OFF"] {
            assert_eq!(parse_boolean(Some(&text(literal)), None), Some(false), "{literal}");
        }
        assert_eq!(parse_boolean(Some(&text("maybe")), Some(true)), Some(true));
        assert_eq!(parse_boolean(None, None), None);
        assert_eq!(parse_boolean(Some(&RawValue::Bool(false)), Some(true)), Some(false));
    }

    #[test]
    fn test_string_trim_and_default() {
        assert_eq!(parse_string(Some(&text("  hi  ")), None, None), Some("hi".to_string()));
        assert_eq!(parse_string(Some(&text("   ")), Some("x"), None), Some("x".to_string()));
        assert_eq!(parse_string(None, None, None), None);
    }

    #[test]
    fn test_string_truncates() {
        let coerced = coerce_string(Some(&text("abcdef")), None, Some(3));
        assert_eq!(coerced, Coerced::Defaulted(Some("abc".to_string()), DefaultReason::Truncated));
    }

    #[test]
    fn test_string_cut_to_nothing_yields_default() {
        let coerced = coerce_string(Some(&text("shoes")), None, Some(0));
        assert_eq!(coerced, Coerced::Defaulted(None, DefaultReason::Truncated));
        assert_eq!(parse_string(Some(&text("shoes")), Some("x"), Some(0)), Some("x".to_string()));
        assert_eq!(parse_string(Some(&text("red shoes")), None, Some(4)), Some("red".to_string()));
    }

    #[test]
    fn test_string_truncation_respects_char_boundaries() {
        let value = text("héllo wörld");
        assert_eq!(parse_string(Some(&value), None, Some(2)), Some("hé".to_string()));
        assert_eq!(parse_string(Some(&value), None, Some(6)), Some("héllo".to_string()));
    }

    #[test]
    fn test_array_from_text_and_list() {
        assert_eq!(
            parse_array(Some(&text("a, b,,c ")), DEFAULT_ARRAY_SEPARATOR),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(
            parse_array(Some(&text("a|b")), "|"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            parse_array(Some(&RawValue::from(vec!["x", "", "y"])), ","),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(parse_array(None, ","), None);
        assert_eq!(parse_array(Some(&text("")), ","), None);
    }

    #[test]
    fn test_enum_case_insensitive_returns_canonical() {
        let allowed = ["createdAt", "price"];
        assert_eq!(parse_enum(Some(&text("PRICE")), &allowed, None), Some("price"));
        assert_eq!(
            coerce_enum(Some(&text("bogus")), &allowed, Some("createdAt")),
            Coerced::Defaulted(Some("createdAt"), DefaultReason::NotAllowed)
        );
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        assert_eq!(parse_date(Some(&text("2024-03-01")), None), Some(expected));
        assert_eq!(
            parse_date(Some(&text("2024-03-01T00:00:00Z")), None),
            Some(expected)
        );
        assert_eq!(
            parse_date(Some(&text("2024-03-01T02:00:00+02:00")), None),
            Some(expected)
        );
        assert_eq!(
            parse_date(Some(&text("2024-03-01 00:00:00")), None),
            Some(expected)
        );
        assert_eq!(
            parse_date(Some(&RawValue::Number(expected.timestamp_millis() as f64)), None),
            Some(expected)
        );
        assert_eq!(parse_date(Some(&RawValue::Date(expected)), None), Some(expected));
    }

    #[test]
    fn test_date_invalid_returns_default() {
        let fallback = DateTime::from_timestamp(0, 0);
        assert_eq!(parse_date(Some(&text("2024-13-45")), fallback), fallback);
        assert_eq!(
            coerce_date(Some(&text("yesterday")), None).reason(),
            Some(DefaultReason::Malformed)
        );
    }

    #[test]
    fn test_json_best_effort() {
        assert_eq!(
            parse_json(Some(&text(r#"{"a":1}"#)), None),
            Some(serde_json::json!({"a": 1}))
        );
        assert_eq!(
            parse_json(Some(&text("{broken")), Some(serde_json::json!({}))),
            Some(serde_json::json!({}))
        );
        assert_eq!(
            parse_json(Some(&RawValue::from(vec!["x"])), None),
            Some(serde_json::json!(["x"]))
        );
    }
}
