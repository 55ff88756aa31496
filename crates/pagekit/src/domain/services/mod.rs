//! Domain services implementing the two validation paths

pub mod pagination_schema;
pub mod pagination_validator;
pub mod schema_validator;
pub mod sort_classifier;

pub use pagination_schema::{PaginationSchema, SchemaPaginationQuery};
pub use pagination_validator::{PaginationInput, PaginationValidator};
pub use schema_validator::SchemaValidator;
pub use sort_classifier::{classify_sort, classify_sort_text};
