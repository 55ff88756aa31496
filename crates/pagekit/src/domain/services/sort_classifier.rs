//! Sort syntax classification
//!
//! The single place that inspects the shape of the raw `sort` / `sortBy`
//! parameters. Everything downstream matches on the resulting [`SortSpec`].

use pagekit_domain::{RawQuery, RawValue, SortOptions, SortSpec};

/// Key holding the bracketed map form (`sortBy[price]=asc`)
pub const SORT_BY_KEY: &str = "sortBy";

/// Key holding the colon-list or legacy single-field form
pub const SORT_KEY: &str = "sort";

/// Detect which sort syntax a query uses
///
/// Detection order:
/// 1. non-empty map under `sortBy`, or a non-empty map under `sort`
/// 2. scalar `sort` containing `:` (colon list)
/// 3. any other non-empty scalar `sort` (legacy single field)
/// 4. nothing usable
///
/// An empty bracketed map counts as absent so the legacy form still gets a
/// chance.
///
/// # Examples
/// ```
/// # use pagekit::domain::services::classify_sort;
/// # use pagekit::domain::value_objects::{RawQuery, SortSpec};
/// let query = RawQuery::from_pairs([("sort", "price:asc,name:desc")]);
/// assert!(matches!(classify_sort(&query), SortSpec::ColonList(_)));
///
/// let query = RawQuery::from_pairs([("sort", "name"), ("order", "asc")]);
/// assert_eq!(classify_sort(&query), SortSpec::Legacy("name".to_string()));
/// ```
pub fn classify_sort(query: &RawQuery) -> SortSpec {
    let bracketed = [SORT_BY_KEY, SORT_KEY]
        .into_iter()
        .filter_map(|key| query.get(key).and_then(RawValue::as_map))
        .find(|map| !map.is_empty());
    if let Some(map) = bracketed {
        return SortSpec::Bracketed(map.clone());
    }

    classify_sort_text(query.get(SORT_KEY).and_then(RawValue::as_scalar).as_deref())
}

/// Classify the scalar `sort` text alone
pub fn classify_sort_text(text: Option<&str>) -> SortSpec {
    match text.map(str::trim) {
        None | Some("") => SortSpec::Absent,
        Some(text) if text.contains(':') => SortSpec::ColonList(SortOptions::from_colon_list(text)),
        Some(field) => SortSpec::Legacy(field.to_string()),
    }
}
