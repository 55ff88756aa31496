//! Standard pagination schema
//!
//! The declarative counterpart of [`PaginationValidator`](super::PaginationValidator),
//! derived from the same [`PaginationPolicy`] so both paths share one
//! defaults and bounds table. Numeric and enum fields coerce as the
//! imperative path does; oversized `search` text is rejected outright.

use indexmap::IndexMap;
use pagekit_domain::config::defaults::{DEFAULT_PAGE, MAX_PAGE, SEARCH_MAX_LENGTH};
use pagekit_domain::{DefaultSort, PaginationPolicy, RawQuery, RawValue, SortDirection, SortSpec};

use super::pagination_validator::PaginationInput;
use super::schema_validator::SchemaValidator;
use super::sort_classifier::{SORT_KEY, classify_sort};
use crate::domain::value_objects::{
    FieldSchema, OnViolation, QuerySchema, SchemaValidationResult,
};

/// Pagination parameters that passed the declarative schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaPaginationQuery {
    /// Page, at least 1
    pub page: u64,
    /// Page size within the policy bounds
    pub limit: u64,
    /// Sort input; multi-field syntaxes pass through for reconciliation
    pub sort: SortSpec,
    /// Direction for the single-field sort
    pub order: SortDirection,
    /// Search text within the length cap
    pub search: Option<String>,
    /// Opaque filters
    pub filters: Option<IndexMap<String, RawValue>>,
}

impl From<SchemaPaginationQuery> for PaginationInput {
    fn from(query: SchemaPaginationQuery) -> Self {
        Self {
            page: Some(query.page as f64),
            limit: Some(query.limit as f64),
            order: Some(query.order),
            search: query.search,
            filters: query.filters,
            sort: query.sort,
        }
    }
}

/// Declarative pagination schema built from a policy
#[derive(Debug, Clone)]
pub struct PaginationSchema {
    schema: QuerySchema,
    default_limit: u64,
    validator: SchemaValidator,
}

impl PaginationSchema {
    /// Build the standard schema for `policy`
    ///
    /// | field | rule |
    /// |---|---|
    /// | `page` | integer in `[1, MAX_PAGE]`, default 1, clamped |
    /// | `limit` | integer in `[minLimit, maxLimit]`, default `defaultLimit`, clamped |
    /// | `sort` | exactly one of `allowedSortFields` (any text when unrestricted), default `defaultSort` |
    /// | `order` | `asc` or `desc`, default `defaultOrder` |
    /// | `search` | text up to 255 characters, rejected when longer |
    /// | `filters` | opaque map |
    pub fn from_policy(policy: &PaginationPolicy) -> Self {
        // A multi-field default cannot be expressed as one enum member; leave
        // the field empty and let reconciliation apply it.
        let sort_default = match policy.default_sort() {
            DefaultSort::Field(field) => Some(field.clone()),
            DefaultSort::Multi(_) => None,
        };

        let schema = QuerySchema::new()
            .field(
                "page",
                FieldSchema::Integer {
                    minimum: Some(DEFAULT_PAGE as i64),
                    maximum: Some(to_i64(MAX_PAGE)),
                    default: Some(DEFAULT_PAGE as i64),
                    on_violation: OnViolation::Clamp,
                },
            )
            .field(
                "limit",
                FieldSchema::Integer {
                    minimum: Some(to_i64(policy.min_limit())),
                    maximum: Some(to_i64(policy.max_limit())),
                    default: Some(to_i64(policy.default_limit())),
                    on_violation: OnViolation::Clamp,
                },
            )
            .field(
                SORT_KEY,
                FieldSchema::Enum {
                    allowed_values: policy.allowed_sort_fields().iter().cloned().collect(),
                    default: sort_default,
                    on_violation: OnViolation::Fallback,
                    case_sensitive: true,
                },
            )
            .field(
                "order",
                FieldSchema::Enum {
                    allowed_values: SortDirection::LITERALS
                        .iter()
                        .map(|literal| literal.to_string())
                        .collect(),
                    default: Some(policy.default_order().as_str().to_string()),
                    on_violation: OnViolation::Fallback,
                    case_sensitive: false,
                },
            )
            .field("search", FieldSchema::text(Some(SEARCH_MAX_LENGTH)))
            .field("filters", FieldSchema::Map);

        Self {
            schema,
            default_limit: policy.default_limit(),
            validator: SchemaValidator::new(),
        }
    }

    /// The underlying field table
    pub fn schema(&self) -> &QuerySchema {
        &self.schema
    }

    /// Validate `query` against the schema
    ///
    /// The single-field `sort` is checked by the schema; colon-list and
    /// bracketed sorts are classified and handed on unchanged, since their
    /// allow-list and cap are applied during reconciliation.
    ///
    /// # Errors
    /// Returns `SchemaValidationError::StringLengthConstraint` when `search`
    /// exceeds 255 characters
    pub fn parse(&self, query: &RawQuery) -> SchemaValidationResult<SchemaPaginationQuery> {
        let multi_field = match classify_sort(query) {
            spec @ (SortSpec::ColonList(_) | SortSpec::Bracketed(_)) => Some(spec),
            SortSpec::Absent | SortSpec::Legacy(_) => None,
        };

        let mut fields = match &multi_field {
            Some(_) => {
                let mut single_field_view = query.clone();
                single_field_view.remove(SORT_KEY);
                self.validator.validate(&single_field_view, &self.schema)?
            }
            None => self.validator.validate(query, &self.schema)?,
        };

        let sort = multi_field.unwrap_or_else(|| match fields.text(SORT_KEY) {
            Some(field) => SortSpec::Legacy(field.to_string()),
            None => SortSpec::Absent,
        });

        // Both fields always carry a default, so these fallbacks only guard
        // a hand-edited schema.
        let page = fields
            .integer("page")
            .and_then(|page| u64::try_from(page).ok())
            .unwrap_or(DEFAULT_PAGE);
        let limit = fields
            .integer("limit")
            .and_then(|limit| u64::try_from(limit).ok())
            .unwrap_or(self.default_limit);
        let order = fields
            .text("order")
            .and_then(|literal| literal.parse().ok())
            .unwrap_or_default();

        Ok(SchemaPaginationQuery {
            page,
            limit,
            sort,
            order,
            search: fields.text("search").map(str::to_string),
            filters: fields.take_map("filters"),
        })
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
