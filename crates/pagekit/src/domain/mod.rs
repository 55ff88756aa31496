//! Domain layer - validation services and value objects
//!
//! Contains the imperative orchestrator, the declarative schema path, and
//! the value objects both consume. No dependencies on transport concerns.

pub mod services;
pub mod value_objects;

pub use pagekit_domain::{DomainError, DomainResult};
pub use services::{PaginationSchema, PaginationValidator, SchemaValidator};
