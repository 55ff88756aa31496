//! Sort value objects
//!
//! A listing endpoint accepts three historical sort syntaxes. They are all
//! classified into one [`SortSpec`] and finally reconciled into a
//! [`SortOptions`] map, the only sort representation handed to consumers.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::RawValue;
use crate::DomainError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first)
    Asc,
    /// Descending order (largest first)
    #[default]
    Desc,
}

impl SortDirection {
    /// Accepted literals, in canonical spelling
    pub const LITERALS: [&'static str; 2] = ["asc", "desc"];

    /// Canonical lowercase literal
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(DomainError::InvalidSortDirection(s.to_string()))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered field → direction map
///
/// Insertion order is evaluation priority. Re-inserting an existing field
/// keeps its original position and replaces its direction.
///
/// # Examples
/// ```
/// # use pagekit_domain::value_objects::{SortDirection, SortOptions};
/// let sort = SortOptions::from_colon_list("price:asc, createdAt:desc");
/// assert_eq!(sort.get("price"), Some(SortDirection::Asc));
/// assert_eq!(sort.to_string(), "price:asc,createdAt:desc");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortOptions(IndexMap<String, SortDirection>);

// Equality is order-sensitive: priority is part of the value.
impl PartialEq for SortOptions {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for SortOptions {}

impl SortOptions {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with exactly one entry
    pub fn single(field: impl Into<String>, direction: SortDirection) -> Self {
        let mut options = Self::new();
        options.insert(field, direction);
        options
    }

    /// Parse the colon-list syntax (`price:asc,createdAt:desc`)
    ///
    /// Pairs without a field name or with a direction other than
    /// `asc`/`desc` (case-insensitive) are dropped.
    pub fn from_colon_list(input: &str) -> Self {
        input
            .split(',')
            .filter_map(|pair| {
                let (field, direction) = pair.split_once(':')?;
                let field = field.trim();
                if field.is_empty() {
                    return None;
                }
                let direction = direction.parse::<SortDirection>().ok()?;
                Some((field.to_string(), direction))
            })
            .collect()
    }

    /// Insert or update a field
    pub fn insert(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.0.insert(field.into(), direction);
    }

    /// Direction for a field
    pub fn get(&self, field: &str) -> Option<SortDirection> {
        self.0.get(field).copied()
    }

    /// Whether the field is present
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Keep only the first `len` entries
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Number of sort keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no sort key is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest-priority entry
    pub fn first(&self) -> Option<(&str, SortDirection)> {
        self.0
            .get_index(0)
            .map(|(field, direction)| (field.as_str(), *direction))
    }

    /// Field names in priority order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in priority order
    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.0
            .iter()
            .map(|(field, direction)| (field.as_str(), *direction))
    }

    /// Bracketed-map form (`{field: "asc"}`) used when re-feeding as input
    pub fn to_raw_map(&self) -> IndexMap<String, RawValue> {
        self.0
            .iter()
            .map(|(field, direction)| (field.clone(), RawValue::text(direction.as_str())))
            .collect()
    }
}

impl FromIterator<(String, SortDirection)> for SortOptions {
    fn from_iter<T: IntoIterator<Item = (String, SortDirection)>>(iter: T) -> Self {
        let mut options = Self::new();
        for (field, direction) in iter {
            options.insert(field, direction);
        }
        options
    }
}

impl fmt::Display for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, direction)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{field}:{direction}")?;
        }
        Ok(())
    }
}

/// Sort syntax detected in a raw query
///
/// Produced by one classification step so that adding a syntax is a local
/// change.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SortSpec {
    /// No sort input at all
    #[default]
    Absent,
    /// Single field name with a separate `order` parameter
    Legacy(String),
    /// `sort=price:asc,createdAt:desc`, invalid pairs already dropped
    ColonList(SortOptions),
    /// `sortBy[price]=asc`, directions not yet coerced
    Bracketed(IndexMap<String, RawValue>),
}

impl SortSpec {
    /// Short name used in logs
    pub fn syntax_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Legacy(_) => "legacy",
            Self::ColonList(_) => "colon-list",
            Self::Bracketed(_) => "bracketed",
        }
    }

    /// Whether the syntax carries several fields
    pub fn is_multi_field(&self) -> bool {
        matches!(self, Self::ColonList(_) | Self::Bracketed(_))
    }
}
