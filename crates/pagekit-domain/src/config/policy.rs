//! Per-endpoint pagination policy
//!
//! [`PaginationConfig`] is the loose, partially-specified form an endpoint
//! declares (or loads from a config file). [`PaginationPolicy`] is the
//! resolved value: every field filled in, checked once, never mutated.

use indexmap::IndexSet;
use serde::Deserialize;

use super::defaults::{
    DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, DEFAULT_MAX_SORT_FIELDS, DEFAULT_MIN_LIMIT,
    DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD,
};
use crate::value_objects::{SortDirection, SortOptions};
use crate::{DomainError, DomainResult};

/// Fallback sort used when the request carries no usable sort input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DefaultSort {
    /// One field, paired with the request's `order` or the default order
    Field(String),
    /// Pre-built multi-field map, used verbatim
    Multi(SortOptions),
}

impl Default for DefaultSort {
    fn default() -> Self {
        Self::Field(DEFAULT_SORT_FIELD.to_string())
    }
}

/// Endpoint pagination settings before resolution
///
/// All options are optional; missing ones take the shared defaults.
/// Deserializes from camelCase keys:
///
/// ```
/// # use pagekit_domain::PaginationConfig;
/// let config: PaginationConfig = serde_json::from_str(r#"{
///     "allowedSortFields": ["name", "price", "createdAt"],
///     "maxLimit": 50
/// }"#).unwrap();
/// let policy = config.build().unwrap();
/// assert_eq!(policy.max_limit(), 50);
/// assert_eq!(policy.default_limit(), 10);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PaginationConfig {
    allowed_sort_fields: Vec<String>,
    default_sort: Option<DefaultSort>,
    default_order: Option<SortDirection>,
    default_limit: Option<u64>,
    min_limit: Option<u64>,
    max_limit: Option<u64>,
    max_sort_fields: Option<usize>,
    search_max_length: Option<usize>,
}

impl PaginationConfig {
    /// Start from all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict sortable fields; an empty set means unrestricted
    pub fn with_allowed_sort_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_sort_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Single default sort field
    pub fn with_default_sort(mut self, field: impl Into<String>) -> Self {
        self.default_sort = Some(DefaultSort::Field(field.into()));
        self
    }

    /// Pre-built multi-field default sort
    pub fn with_default_sort_options(mut self, options: SortOptions) -> Self {
        self.default_sort = Some(DefaultSort::Multi(options));
        self
    }

    /// Default direction
    pub fn with_default_order(mut self, order: SortDirection) -> Self {
        self.default_order = Some(order);
        self
    }

    /// Page size used when the request has none
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Smallest accepted page size
    pub fn with_min_limit(mut self, limit: u64) -> Self {
        self.min_limit = Some(limit);
        self
    }

    /// Largest accepted page size
    pub fn with_max_limit(mut self, limit: u64) -> Self {
        self.max_limit = Some(limit);
        self
    }

    /// Cap on simultaneous sort keys
    pub fn with_max_sort_fields(mut self, max: usize) -> Self {
        self.max_sort_fields = Some(max);
        self
    }

    /// Truncate search text to this many characters
    pub fn with_search_max_length(mut self, max: usize) -> Self {
        self.search_max_length = Some(max);
        self
    }

    /// Resolve into an immutable policy
    ///
    /// # Errors
    /// Returns `DomainError::InvalidConfig` when the limits are inconsistent,
    /// `maxSortFields` or `searchMaxLength` is zero, the default sort is
    /// empty, or a default sort field is outside a non-empty allow-list.
    pub fn build(self) -> DomainResult<PaginationPolicy> {
        let min_limit = self.min_limit.unwrap_or(DEFAULT_MIN_LIMIT);
        let max_limit = self.max_limit.unwrap_or(DEFAULT_MAX_LIMIT);
        let default_limit = self
            .default_limit
            .unwrap_or_else(|| DEFAULT_LIMIT.clamp(min_limit.min(max_limit), max_limit));
        let max_sort_fields = self.max_sort_fields.unwrap_or(DEFAULT_MAX_SORT_FIELDS);

        if min_limit == 0 {
            return Err(DomainError::invalid_config("minLimit must be at least 1"));
        }
        if min_limit > max_limit {
            return Err(DomainError::invalid_config(format!(
                "minLimit {min_limit} exceeds maxLimit {max_limit}"
            )));
        }
        if !(min_limit..=max_limit).contains(&default_limit) {
            return Err(DomainError::invalid_config(format!(
                "defaultLimit {default_limit} not in [{min_limit}, {max_limit}]"
            )));
        }
        if max_sort_fields == 0 {
            return Err(DomainError::invalid_config("maxSortFields must be at least 1"));
        }

        if self.search_max_length == Some(0) {
            return Err(DomainError::invalid_config("searchMaxLength must be at least 1"));
        }

        let allowed_sort_fields: IndexSet<String> = self
            .allowed_sort_fields
            .into_iter()
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty())
            .collect();

        let default_sort = match self.default_sort.unwrap_or_default() {
            DefaultSort::Field(field) => {
                let field = field.trim().to_string();
                if field.is_empty() {
                    return Err(DomainError::invalid_config("defaultSort must not be empty"));
                }
                DefaultSort::Field(field)
            }
            DefaultSort::Multi(mut options) => {
                if options.is_empty() {
                    return Err(DomainError::invalid_config("defaultSort must not be empty"));
                }
                options.truncate(max_sort_fields);
                DefaultSort::Multi(options)
            }
        };

        if !allowed_sort_fields.is_empty() {
            let outside = match &default_sort {
                DefaultSort::Field(field) => (!allowed_sort_fields.contains(field))
                    .then(|| field.clone()),
                DefaultSort::Multi(options) => options
                    .fields()
                    .find(|field| !allowed_sort_fields.contains(*field))
                    .map(str::to_string),
            };
            if let Some(field) = outside {
                return Err(DomainError::invalid_config(format!(
                    "defaultSort field '{field}' is not in allowedSortFields"
                )));
            }
        }

        Ok(PaginationPolicy {
            allowed_sort_fields,
            default_sort,
            default_order: self.default_order.unwrap_or(DEFAULT_SORT_DIRECTION),
            default_limit,
            min_limit,
            max_limit,
            max_sort_fields,
            search_max_length: self.search_max_length,
        })
    }
}

/// Resolved, immutable pagination policy for one endpoint
///
/// Construct once (typically in a `LazyLock` or behind an `Arc`) and share
/// read-only across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationPolicy {
    allowed_sort_fields: IndexSet<String>,
    default_sort: DefaultSort,
    default_order: SortDirection,
    default_limit: u64,
    min_limit: u64,
    max_limit: u64,
    max_sort_fields: usize,
    search_max_length: Option<usize>,
}

impl PaginationPolicy {
    /// Start a configuration
    pub fn builder() -> PaginationConfig {
        PaginationConfig::new()
    }

    /// Permitted sort fields; empty means unrestricted
    pub fn allowed_sort_fields(&self) -> &IndexSet<String> {
        &self.allowed_sort_fields
    }

    /// Whether `field` may be sorted on
    pub fn is_sort_field_allowed(&self, field: &str) -> bool {
        self.allowed_sort_fields.is_empty() || self.allowed_sort_fields.contains(field)
    }

    /// Fallback sort
    pub fn default_sort(&self) -> &DefaultSort {
        &self.default_sort
    }

    /// Highest-priority field of the fallback sort
    pub fn default_sort_field(&self) -> &str {
        match &self.default_sort {
            DefaultSort::Field(field) => field,
            DefaultSort::Multi(options) => options
                .first()
                .map_or(DEFAULT_SORT_FIELD, |(field, _)| field),
        }
    }

    /// Fallback direction
    pub fn default_order(&self) -> SortDirection {
        self.default_order
    }

    /// Page size used when the request has none
    pub fn default_limit(&self) -> u64 {
        self.default_limit
    }

    /// Smallest accepted page size
    pub fn min_limit(&self) -> u64 {
        self.min_limit
    }

    /// Largest accepted page size
    pub fn max_limit(&self) -> u64 {
        self.max_limit
    }

    /// Cap on simultaneous sort keys
    pub fn max_sort_fields(&self) -> usize {
        self.max_sort_fields
    }

    /// Search truncation length, if the endpoint opted in
    pub fn search_max_length(&self) -> Option<usize> {
        self.search_max_length
    }

    /// Sort map synthesized when no usable sort input remains
    ///
    /// A single default field is paired with `order` (or the default order);
    /// a pre-built map is returned as configured.
    pub fn fallback_sort(&self, order: Option<SortDirection>) -> SortOptions {
        match &self.default_sort {
            DefaultSort::Field(field) => {
                SortOptions::single(field.clone(), order.unwrap_or(self.default_order))
            }
            DefaultSort::Multi(options) => options.clone(),
        }
    }
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            allowed_sort_fields: IndexSet::new(),
            default_sort: DefaultSort::default(),
            default_order: DEFAULT_SORT_DIRECTION,
            default_limit: DEFAULT_LIMIT,
            min_limit: DEFAULT_MIN_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            max_sort_fields: DEFAULT_MAX_SORT_FIELDS,
            search_max_length: None,
        }
    }
}
