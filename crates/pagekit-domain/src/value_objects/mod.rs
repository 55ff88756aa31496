//! Domain Value Objects
//!
//! Immutable objects that represent concepts in the domain
//! with no conceptual identity, only defined by their attributes.

mod params;
mod raw;
mod sort;

pub use params::{CanonicalPaginationParams, Paginated, PaginationMeta};
pub use raw::{RawQuery, RawValue};
pub use sort::{SortDirection, SortOptions, SortSpec};
