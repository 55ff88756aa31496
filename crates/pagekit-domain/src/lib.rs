//! Pagekit Domain Layer - Pure Business Logic
//!
//! This crate contains the side-effect free core of pagekit: the raw input
//! model produced by decoding a query string, the primitive coercion library
//! that turns one untyped value into one typed value, and the value objects
//! that describe a validated listing request.
//!
//! ## Architecture
//!
//! - **Value Objects**: Immutable concepts (`RawValue`, `RawQuery`, `SortDirection`,
//!   `SortOptions`, `SortSpec`, `CanonicalPaginationParams`)
//! - **Coercion**: Total, non-panicking conversions with an explicit
//!   [`Coerced`] outcome
//! - **Config**: The shared defaults table and the resolved [`PaginationPolicy`]
//!
//! Nothing in this crate performs I/O or holds shared mutable state.

#![warn(missing_docs)]

pub mod coercion;
pub mod config;
pub mod value_objects;

// Re-export core types
pub use coercion::{Coerced, DefaultReason};
pub use config::{DefaultSort, PaginationConfig, PaginationPolicy};
pub use value_objects::{
    CanonicalPaginationParams, Paginated, PaginationMeta, RawQuery, RawValue, SortDirection,
    SortOptions, SortSpec,
};

/// Domain Result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
///
/// Raised only while constructing values (configuration, parsing a
/// direction literal). Validation of request input never produces one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Pagination configuration is internally inconsistent
    #[error("Invalid pagination config: {0}")]
    InvalidConfig(String),

    /// Sort direction literal is neither `asc` nor `desc`
    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
