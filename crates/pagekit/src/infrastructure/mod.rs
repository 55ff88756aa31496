//! Infrastructure layer - transport adapters
//!
//! Query-string decoding is always available; the axum extractors are
//! behind the `http-server` feature.

#[cfg(feature = "http-server")]
pub mod http;
pub mod query_string;

pub use query_string::parse_query_string;
