//! # Pagekit
//!
//! Request-parameter normalization for listing endpoints. Turns an untyped
//! query bag (`page`, `limit`, `sort`, `order`, `sortBy[...]`, `search`,
//! `filters`) into one bounded [`CanonicalPaginationParams`] under a
//! per-endpoint [`PaginationPolicy`].
//!
//! Two paths share the policy:
//! - [`PaginationValidator`] is fail-silent: every unusable value degrades
//!   to a default and the call cannot fail
//! - [`PaginationSchema`] is declarative and can reject, for typed API
//!   boundaries that want to answer with a 400
//!
//! ```
//! use pagekit::prelude::*;
//!
//! let validator = PaginationValidator::from_config(
//!     PaginationConfig::new().with_allowed_sort_fields(["name", "price", "createdAt"]),
//! )?;
//! let params = validator.process_query_string("sort=name:asc,price:desc");
//!
//! assert_eq!(params.page(), 1);
//! assert_eq!(params.limit(), 10);
//! assert_eq!(params.sort_options().to_string(), "name:asc,price:desc");
//! # Ok::<(), pagekit::Error>(())
//! ```

#![warn(rust_2018_idioms)]
#![warn(missing_docs)]

pub mod domain;
pub mod error;
pub mod infrastructure;

// Domain layer exports
pub use domain::{
    services::{
        PaginationInput, PaginationSchema, PaginationValidator, SchemaPaginationQuery,
        SchemaValidator, classify_sort,
    },
    value_objects::{
        FieldSchema, OnViolation, QuerySchema, SchemaValidationError, SchemaValidationResult,
        ValidatedFields, ValidatedValue,
    },
};
pub use pagekit_domain::{
    CanonicalPaginationParams, Coerced, DefaultReason, DefaultSort, DomainError, DomainResult,
    Paginated, PaginationConfig, PaginationMeta, PaginationPolicy, RawQuery, RawValue,
    SortDirection, SortOptions, SortSpec, coercion,
};

pub use error::{Error, Result};
pub use infrastructure::parse_query_string;

#[cfg(feature = "http-server")]
pub use infrastructure::http::{
    CheckedPagination, DefaultPagination, PaginationEndpoint, PaginationQuery, QueryRejection,
};

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        CanonicalPaginationParams, Error, Paginated, PaginationConfig, PaginationMeta,
        PaginationPolicy, PaginationSchema, PaginationValidator, RawQuery, RawValue, Result,
        SortDirection, SortOptions,
    };
}
