//! Raw, untyped request input
//!
//! [`RawValue`] is what a query-string decoder hands over for one parameter:
//! usually text, sometimes a list (repeated keys) or a nested map
//! (`sortBy[price]=asc`). [`RawQuery`] is the whole parameter bag.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{DomainError, DomainResult};

/// One untyped input value
///
/// Maps keep insertion order; for sort maps that order is the evaluation
/// priority, so it must survive decoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Explicit null / absent marker
    #[default]
    Null,
    /// Boolean (only produced from structured input such as JSON bodies)
    Bool(bool),
    /// Number (only produced from structured input such as JSON bodies)
    Number(f64),
    /// Text, the common case for query strings
    Text(String),
    /// Already-typed timestamp supplied by an in-process caller
    Date(DateTime<Utc>),
    /// Repeated keys or `key[]=` entries
    List(Vec<RawValue>),
    /// Bracketed keys such as `filters[status]=active`
    Map(IndexMap<String, RawValue>),
}

impl RawValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether this is the null marker
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Scalar textual view of the value
    ///
    /// Text is returned as is, numbers and booleans are rendered, and a
    /// single-element list yields its sole element. Everything else has no
    /// scalar view.
    pub fn as_scalar(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Date(date) => Some(Cow::Owned(date.to_rfc3339())),
            Self::List(items) if items.len() == 1 => items[0].as_scalar(),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Nested map view, if this value is a map
    pub fn as_map(&self) -> Option<&IndexMap<String, RawValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert into a JSON value
    ///
    /// Non-finite numbers become `null`; dates become RFC 3339 strings.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Text(text) => Value::String(text.clone()),
            Self::Date(date) => Value::String(date.to_rfc3339()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    fn append(map: &mut IndexMap<String, RawValue>, key: &str, value: RawValue) {
        match map.get_mut(key) {
            Some(RawValue::List(items)) => items.push(value),
            Some(existing) => {
                let previous = std::mem::take(existing);
                *existing = RawValue::List(vec![previous, value]);
            }
            None => {
                map.insert(key.to_string(), value);
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Date(date) => date.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// Loosely-typed parameter bag, keyed by parameter name
///
/// # Examples
/// ```
/// # use pagekit_domain::value_objects::{RawQuery, RawValue};
/// let query = RawQuery::from_pairs([("page", "2"), ("sortBy[price]", "asc")]);
/// assert_eq!(query.get("page"), Some(&RawValue::text("2")));
/// assert!(query.get("sortBy").and_then(RawValue::as_map).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawQuery(IndexMap<String, RawValue>);

impl RawQuery {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold decoded `key=value` pairs into a bag
    ///
    /// - repeated keys collect into a [`RawValue::List`]
    /// - `key[]=v` always appends to a list
    /// - `key[sub]=v` builds a one-level [`RawValue::Map`]
    ///
    /// Deeper nesting such as `a[b][c]` is kept as a literal key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = IndexMap::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = RawValue::Text(value.into());

            match split_bracketed_key(key) {
                Some((base, "")) => match params.get_mut(base) {
                    Some(RawValue::List(items)) => items.push(value),
                    Some(existing) => {
                        let previous = std::mem::take(existing);
                        *existing = RawValue::List(vec![previous, value]);
                    }
                    None => {
                        params.insert(base.to_string(), RawValue::List(vec![value]));
                    }
                },
                Some((base, sub)) => {
                    let entry = params
                        .entry(base.to_string())
                        .or_insert_with(|| RawValue::Map(IndexMap::new()));
                    if !matches!(entry, RawValue::Map(_)) {
                        *entry = RawValue::Map(IndexMap::new());
                    }
                    if let RawValue::Map(nested) = entry {
                        RawValue::append(nested, sub, value);
                    }
                }
                None => RawValue::append(&mut params, key, value),
            }
        }

        Self(params)
    }

    /// Build a bag from a JSON object
    ///
    /// # Errors
    /// Returns `DomainError::InvalidInput` if `value` is not an object
    pub fn from_json(value: serde_json::Value) -> DomainResult<Self> {
        match RawValue::from(value) {
            RawValue::Map(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidInput(format!(
                "query bag must be an object, got {}",
                other.to_json()
            ))),
        }
    }

    /// Look up one parameter
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    /// Insert or replace one parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove one parameter, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.0.shift_remove(key)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, RawValue)> for RawQuery {
    fn from_iter<T: IntoIterator<Item = (String, RawValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn split_bracketed_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(']')?;
    let open = inner.find('[')?;
    if open == 0 {
        return None;
    }
    let (base, sub) = (&inner[..open], &inner[open + 1..]);
    if sub.contains(['[', ']']) {
        return None;
    }
    Some((base, sub))
}
