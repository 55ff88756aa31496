//! Pagekit benchmarking suite
//!
//! Shared fixtures for the criterion benches: a representative endpoint
//! policy and query strings covering each sort syntax.

pub use pagekit::{Error, PaginationPolicy, Result};

use pagekit::PaginationConfig;

/// Query strings exercised by every bench, by name
pub const QUERIES: [(&str, &str); 6] = [
    ("empty", ""),
    ("legacy", "page=3&limit=25&sort=price&order=asc"),
    ("colon_list", "sort=name:asc,price:desc,rating:asc,stock:desc"),
    (
        "bracketed",
        "sortBy%5Bprice%5D=asc&sortBy%5BcreatedAt%5D=desc&sortBy%5Bname%5D=asc",
    ),
    ("filters", "filters%5Bstatus%5D=active&filters%5Btier%5D=gold&search=red+shoes"),
    ("malformed", "page=abc&limit=-7&sort=bogus:sideways&order=up&filters=%7Boops"),
];

/// Policy of a typical catalog listing
///
/// # Errors
/// Never in practice; the configuration is fixed and consistent.
pub fn catalog_policy() -> Result<PaginationPolicy> {
    Ok(PaginationConfig::new()
        .with_allowed_sort_fields(["name", "price", "rating", "stock", "createdAt"])
        .with_max_limit(50)
        .with_search_max_length(255)
        .build()?)
}
