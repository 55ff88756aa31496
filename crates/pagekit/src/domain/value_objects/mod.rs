//! Value objects of the application crate
//!
//! The pure request-input types live in `pagekit-domain` and are re-exported
//! here so callers need a single import path.

mod query_schema;

pub use pagekit_domain::value_objects::*;
pub use query_schema::{
    FieldSchema, OnViolation, QuerySchema, SchemaValidationError, SchemaValidationResult,
    ValidatedFields, ValidatedValue,
};
