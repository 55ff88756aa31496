//! Error types for pagekit operations
//!
//! Request validation through [`PaginationValidator`](crate::PaginationValidator)
//! never fails; these errors come from building a policy or from the
//! declarative schema path.

use pagekit_domain::DomainError;

use crate::domain::value_objects::SchemaValidationError;

/// Result type alias for pagekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pagekit operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Invalid configuration or input shape
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A declarative schema field rejected its value
    #[error("Schema validation failed: {0}")]
    SchemaValidation(#[from] SchemaValidationError),
}

impl Error {
    /// Parameter responsible for the error, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::SchemaValidation(err) => Some(err.path()),
            Self::Domain(_) => None,
        }
    }

    /// Whether the client sent something the endpoint refuses
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaValidation(_) | Self::Domain(DomainError::InvalidInput(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_domain_error() {
        let err: Error = DomainError::invalid_config("minLimit must be at least 1").into();
        assert_eq!(err.to_string(), "Invalid pagination config: minLimit must be at least 1");
        assert_eq!(err.field(), None);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_from_schema_error() {
        let err: Error = SchemaValidationError::InvalidEnumValue {
            path: "order".to_string(),
            value: "up".to_string(),
        }
        .into();
        assert_eq!(err.field(), Some("order"));
        assert!(err.is_client_error());
        assert!(err.to_string().starts_with("Schema validation failed"));
    }
}
