//! Canonical pagination parameters and the paginated response envelope

use indexmap::IndexMap;
use serde::Serialize;

use super::{RawQuery, RawValue, SortOptions};

/// Validated, bounded parameters for one listing request
///
/// The only shape downstream code (e.g. a data-access layer building a
/// query) may depend on. Produced fresh per request and immutable once
/// returned; fields are exposed through accessors only.
///
/// Guaranteed by the producing validator:
/// - `page >= 1`
/// - `min_limit <= limit <= max_limit`
/// - `sort_options` is non-empty, within `max_sort_fields`, and only names
///   allowed fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPaginationParams {
    page: u64,
    limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<IndexMap<String, RawValue>>,
    sort_options: SortOptions,
}

impl CanonicalPaginationParams {
    /// Assemble already-validated parts
    ///
    /// Callers normally obtain instances from a validator rather than
    /// building them directly.
    pub fn new(
        page: u64,
        limit: u64,
        search: Option<String>,
        filters: Option<IndexMap<String, RawValue>>,
        sort_options: SortOptions,
    ) -> Self {
        Self {
            page,
            limit,
            search,
            filters,
            sort_options,
        }
    }

    /// 1-based page number
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Page size
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Free-text search, if any
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Opaque filter map, if any
    pub fn filters(&self) -> Option<&IndexMap<String, RawValue>> {
        self.filters.as_ref()
    }

    /// Sort keys in priority order
    pub fn sort_options(&self) -> &SortOptions {
        &self.sort_options
    }

    /// Number of rows to skip: `(page - 1) * limit`, saturating
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Render back into a raw bag
    ///
    /// Sort keys are emitted in the bracketed `sortBy` form, so validating
    /// the result with the same policy yields an identical value.
    pub fn to_raw_query(&self) -> RawQuery {
        let mut query = RawQuery::new()
            .with("page", self.page.to_string())
            .with("limit", self.limit.to_string())
            .with("sortBy", RawValue::Map(self.sort_options.to_raw_map()));
        if let Some(search) = &self.search {
            query.insert("search", search.as_str());
        }
        if let Some(filters) = &self.filters {
            query.insert("filters", RawValue::Map(filters.clone()));
        }
        query
    }
}

impl From<&CanonicalPaginationParams> for RawQuery {
    fn from(params: &CanonicalPaginationParams) -> Self {
        params.to_raw_query()
    }
}

/// Page metadata returned next to a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total matching items
    pub total: u64,
    /// Number of pages at this page size
    pub total_pages: u64,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Compute metadata for a page
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of items with its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Page metadata
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Wrap a page of items fetched with `params`
    pub fn new(items: Vec<T>, params: &CanonicalPaginationParams, total: u64) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(params.page(), params.limit(), total),
        }
    }

    /// Transform items, keeping metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
