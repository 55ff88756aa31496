//! HTTP integration (axum)

pub mod extract;

pub use extract::{
    CheckedPagination, DefaultPagination, PaginationEndpoint, PaginationQuery, QueryRejection,
};
