//! Pagination and sort orchestrator
//!
//! Turns one raw query bag into one [`CanonicalPaginationParams`] under one
//! [`PaginationPolicy`]. Every step is total: malformed input degrades to
//! the policy's defaults and nothing here returns an error.
//!
//! The work is split in two so other front ends can share the second half:
//! - [`PaginationValidator::parse_from_query`] extracts a loose
//!   [`PaginationInput`] and classifies the sort syntax
//! - [`PaginationValidator::validate`] applies bounds, the sort allow-list
//!   and the sort-field cap, then reconciles everything into one sort map

use std::borrow::Cow;

use indexmap::IndexMap;
use pagekit_domain::coercion::{coerce_enum, coerce_number, coerce_string, parse_enum};
use pagekit_domain::config::defaults::{DEFAULT_PAGE, MAX_PAGE};
use pagekit_domain::{
    CanonicalPaginationParams, Coerced, DefaultReason, PaginationConfig, PaginationPolicy,
    RawQuery, RawValue, SortDirection, SortOptions, SortSpec,
};
use tracing::{debug, trace};

use super::schema_validator::decode_map;
use super::sort_classifier::classify_sort;
use super::PaginationSchema;
use crate::error::Result;
use crate::infrastructure::query_string::parse_query_string;

/// Extracted, not yet validated request parameters
///
/// Numbers are kept as parsed (possibly fractional or out of range); the
/// sort syntax has been classified but not checked against the policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationInput {
    /// Requested page
    pub page: Option<f64>,
    /// Requested page size
    pub limit: Option<f64>,
    /// Direction for the legacy single-field sort
    pub order: Option<SortDirection>,
    /// Free-text search
    pub search: Option<String>,
    /// Opaque filters
    pub filters: Option<IndexMap<String, RawValue>>,
    /// Classified sort input
    pub sort: SortSpec,
}

/// Imperative pagination validator
///
/// Holds (or borrows) one resolved policy and can be shared across threads.
///
/// # Examples
/// ```
/// # use pagekit::domain::services::PaginationValidator;
/// # use pagekit::domain::value_objects::SortDirection;
/// let validator = PaginationValidator::default();
/// let params = validator.process_query_string("page=2&limit=9999&sort=price:asc");
///
/// assert_eq!(params.page(), 2);
/// assert_eq!(params.limit(), 100);
/// assert_eq!(params.sort_options().get("price"), Some(SortDirection::Asc));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaginationValidator<'p> {
    policy: Cow<'p, PaginationPolicy>,
}

impl PaginationValidator<'static> {
    /// Create a validator that owns its policy
    pub fn new(policy: PaginationPolicy) -> Self {
        Self {
            policy: Cow::Owned(policy),
        }
    }

    /// Resolve `config` and create a validator from it
    ///
    /// # Errors
    /// Returns `Error::Domain` if the configuration is inconsistent
    pub fn from_config(config: PaginationConfig) -> Result<Self> {
        Ok(Self::new(config.build()?))
    }
}

impl<'p> From<&'p PaginationPolicy> for PaginationValidator<'p> {
    fn from(policy: &'p PaginationPolicy) -> Self {
        Self {
            policy: Cow::Borrowed(policy),
        }
    }
}

impl PaginationValidator<'_> {
    /// The policy in effect
    pub fn policy(&self) -> &PaginationPolicy {
        &self.policy
    }

    /// Extract step: coerce primitives and classify the sort syntax
    pub fn parse_from_query(&self, query: &RawQuery) -> PaginationInput {
        let page = logged("page", coerce_number(query.get("page"), None, None, None));
        let limit = logged("limit", coerce_number(query.get("limit"), None, None, None));
        let order = logged(
            "order",
            coerce_enum(query.get("order"), &SortDirection::LITERALS, None),
        )
        .and_then(|literal| literal.parse().ok());
        let search = logged(
            "search",
            coerce_string(query.get("search"), None, self.policy.search_max_length()),
        );
        let filters = decode_map(query.get("filters"));

        let sort = classify_sort(query);
        trace!(syntax = sort.syntax_name(), "classified sort input");

        PaginationInput {
            page,
            limit,
            order,
            search,
            filters,
            sort,
        }
    }

    /// Validate step: bounds, allow-list, sort cap and reconciliation
    pub fn validate(&self, input: PaginationInput) -> CanonicalPaginationParams {
        let policy = &*self.policy;

        let page = input
            .page
            .map_or(DEFAULT_PAGE, |page| (page.floor().max(1.0) as u64).min(MAX_PAGE));

        let (min_limit, max_limit) = (policy.min_limit(), policy.max_limit());
        let limit = input.limit.map_or(policy.default_limit(), |requested| {
            let clamped = requested
                .floor()
                .max(min_limit as f64)
                .min(max_limit as f64) as u64;
            if clamped as f64 != requested {
                debug!(requested, clamped, "limit clamped to policy bounds");
            }
            clamped
        });

        let (mut sort_options, legacy_field) = match input.sort {
            SortSpec::Absent => (SortOptions::new(), None),
            SortSpec::Legacy(field) => (SortOptions::new(), Some(field)),
            SortSpec::ColonList(options) => (
                self.limit_sort_fields(options.iter().map(|(field, dir)| (field.to_string(), dir))),
                None,
            ),
            SortSpec::Bracketed(map) => {
                let entries = map.iter().map(|(field, direction)| {
                    let direction = parse_enum(Some(direction), &SortDirection::LITERALS, None)
                        .and_then(|literal| literal.parse().ok())
                        .unwrap_or(policy.default_order());
                    (field.trim().to_string(), direction)
                });
                (self.limit_sort_fields(entries), None)
            }
        };

        if sort_options.is_empty() {
            sort_options = match legacy_field {
                Some(field) if policy.is_sort_field_allowed(&field) => {
                    SortOptions::single(field, input.order.unwrap_or(policy.default_order()))
                }
                rejected => {
                    if let Some(field) = rejected {
                        debug!(%field, "sort field not allowed, using default sort");
                    }
                    policy.fallback_sort(input.order)
                }
            };
        }

        CanonicalPaginationParams::new(page, limit, input.search, input.filters, sort_options)
    }

    /// Keep the first `max_sort_fields` entries, then drop disallowed fields
    fn limit_sort_fields(
        &self,
        entries: impl Iterator<Item = (String, SortDirection)>,
    ) -> SortOptions {
        let policy = &*self.policy;
        entries
            .filter(|(field, _)| !field.is_empty())
            .take(policy.max_sort_fields())
            .filter(|(field, _)| {
                let allowed = policy.is_sort_field_allowed(field);
                if !allowed {
                    debug!(%field, "dropping sort field not in allow-list");
                }
                allowed
            })
            .collect()
    }

    /// Extract and validate in one call
    pub fn process(&self, query: &RawQuery) -> CanonicalPaginationParams {
        self.validate(self.parse_from_query(query))
    }

    /// Decode a raw query string and validate it
    pub fn process_query_string(&self, query: &str) -> CanonicalPaginationParams {
        self.process(&parse_query_string(query))
    }

    /// Validate a JSON object of parameters (e.g. a search request body)
    ///
    /// # Errors
    /// Returns `Error::Domain` if `body` is not a JSON object
    pub fn process_json(&self, body: serde_json::Value) -> Result<CanonicalPaginationParams> {
        let query = RawQuery::from_json(body)?;
        Ok(self.process(&query))
    }

    /// Run the declarative schema first, then reconcile
    ///
    /// Unlike [`process`](Self::process) this can fail, e.g. on search text
    /// longer than the schema allows.
    ///
    /// # Errors
    /// Returns `Error::SchemaValidation` when a rejecting schema field fails
    pub fn process_checked(&self, query: &RawQuery) -> Result<CanonicalPaginationParams> {
        let checked = PaginationSchema::from_policy(&self.policy).parse(query)?;
        Ok(self.validate(checked.into()))
    }
}

fn logged<T>(field: &str, coerced: Coerced<Option<T>>) -> Option<T> {
    match coerced.reason() {
        None | Some(DefaultReason::Absent) => {}
        Some(reason) => debug!(field, %reason, "query parameter defaulted"),
    }
    coerced.into_value()
}
