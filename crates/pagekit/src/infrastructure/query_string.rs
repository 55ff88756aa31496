//! Query-string decoding
//!
//! Percent-decodes `application/x-www-form-urlencoded` text and folds the
//! pairs into a [`RawQuery`], keeping first-seen order.

use pagekit_domain::RawQuery;
use url::form_urlencoded;

/// Decode a raw query string (with or without a leading `?`)
///
/// # Examples
/// ```
/// # use pagekit::infrastructure::parse_query_string;
/// # use pagekit::domain::value_objects::RawValue;
/// let query = parse_query_string("?search=red%20shoes&sortBy[price]=asc");
/// assert_eq!(query.get("search"), Some(&RawValue::text("red shoes")));
/// assert!(query.get("sortBy").and_then(RawValue::as_map).is_some());
/// ```
pub fn parse_query_string(input: &str) -> RawQuery {
    let input = input.strip_prefix('?').unwrap_or(input);
    RawQuery::from_pairs(form_urlencoded::parse(input.as_bytes()))
}
