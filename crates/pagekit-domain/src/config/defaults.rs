//! Shared defaults table
//!
//! One table consumed by both the imperative validator and the declarative
//! schema path so the two cannot drift apart.
//!
//! # Production Tuning
//!
//! - **DEFAULT_MAX_LIMIT**: Increase only for endpoints whose rows are small.
//!   Memory per request grows with `limit * avg_row_size`.
//!
//! - **DEFAULT_MAX_SORT_FIELDS**: Every extra sort key needs a matching
//!   composite index to stay cheap on large tables.
//!
//! - **SEARCH_MAX_LENGTH**: Matches the usual `VARCHAR(255)` column used for
//!   search text; longer input is rejected by the schema path.

use crate::value_objects::SortDirection;

/// Page used when none is supplied
pub const DEFAULT_PAGE: u64 = 1;

/// Largest page either path will return
///
/// The declarative path reads integers through `i64`, so the cap is the
/// largest page representable there.
pub const MAX_PAGE: u64 = i64::MAX as u64;

/// Page size used when none is supplied
pub const DEFAULT_LIMIT: u64 = 10;

/// Smallest page size a client may request
pub const DEFAULT_MIN_LIMIT: u64 = 1;

/// Largest page size a client may request
pub const DEFAULT_MAX_LIMIT: u64 = 100;

/// Sort field used when no usable sort input is present
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Direction used when no usable direction is present
pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Desc;

/// Maximum number of simultaneous sort keys
pub const DEFAULT_MAX_SORT_FIELDS: usize = 3;

/// Maximum search text length, in characters
pub const SEARCH_MAX_LENGTH: usize = 255;
