//! Axum extractors for paginated listing endpoints
//!
//! Each endpoint names its policy through a zero-sized marker type:
//!
//! ```
//! use std::sync::LazyLock;
//! use pagekit::infrastructure::http::{PaginationEndpoint, PaginationQuery};
//! use pagekit::{PaginationConfig, PaginationPolicy};
//!
//! struct Products;
//!
//! impl PaginationEndpoint for Products {
//!     fn policy() -> &'static PaginationPolicy {
//!         static POLICY: LazyLock<PaginationPolicy> = LazyLock::new(|| {
//!             PaginationConfig::new()
//!                 .with_allowed_sort_fields(["name", "price", "createdAt"])
//!                 .build()
//!                 .expect("static pagination policy")
//!         });
//!         &POLICY
//!     }
//! }
//!
//! async fn list_products(PaginationQuery(params, ..): PaginationQuery<Products>) -> String {
//!     format!("page {} of size {}", params.page(), params.limit())
//! }
//! ```

use std::convert::Infallible;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::LazyLock;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use pagekit_domain::{CanonicalPaginationParams, PaginationPolicy};
use tracing::debug;

use crate::domain::services::PaginationValidator;
use crate::error::Error;
use crate::infrastructure::query_string::parse_query_string;

/// Marker naming the policy of one listing endpoint
pub trait PaginationEndpoint {
    /// Policy shared by every request to the endpoint
    fn policy() -> &'static PaginationPolicy;
}

/// Endpoint marker using the default policy
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPagination;

impl PaginationEndpoint for DefaultPagination {
    fn policy() -> &'static PaginationPolicy {
        static POLICY: LazyLock<PaginationPolicy> = LazyLock::new(PaginationPolicy::default);
        &POLICY
    }
}

/// Lenient extractor: never rejects, malformed input becomes defaults
pub struct PaginationQuery<E = DefaultPagination>(
    pub CanonicalPaginationParams,
    pub PhantomData<fn() -> E>,
);

impl<E> PaginationQuery<E> {
    /// Unwrap the validated parameters
    pub fn into_inner(self) -> CanonicalPaginationParams {
        self.0
    }
}

impl<E> Deref for PaginationQuery<E> {
    type Target = CanonicalPaginationParams;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, E> FromRequestParts<S> for PaginationQuery<E>
where
    S: Send + Sync,
    E: PaginationEndpoint,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parse_query_string(parts.uri.query().unwrap_or_default());
        let params = PaginationValidator::from(E::policy()).process(&query);
        Ok(Self(params, PhantomData))
    }
}

/// Strict extractor: runs the declarative schema and rejects with 400
pub struct CheckedPagination<E = DefaultPagination>(
    pub CanonicalPaginationParams,
    pub PhantomData<fn() -> E>,
);

impl<E> CheckedPagination<E> {
    /// Unwrap the validated parameters
    pub fn into_inner(self) -> CanonicalPaginationParams {
        self.0
    }
}

impl<E> Deref for CheckedPagination<E> {
    type Target = CanonicalPaginationParams;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, E> FromRequestParts<S> for CheckedPagination<E>
where
    S: Send + Sync,
    E: PaginationEndpoint,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parse_query_string(parts.uri.query().unwrap_or_default());
        let params = PaginationValidator::from(E::policy())
            .process_checked(&query)
            .map_err(|err| {
                debug!(error = %err, "rejecting pagination query");
                QueryRejection(err)
            })?;
        Ok(Self(params, PhantomData))
    }
}

/// Rejection for [`CheckedPagination`]
///
/// Renders as `{"error": "...", "field": "..."}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct QueryRejection(pub Error);

impl QueryRejection {
    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for QueryRejection {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "field": self.0.field(),
        }));

        (self.status(), body).into_response()
    }
}
