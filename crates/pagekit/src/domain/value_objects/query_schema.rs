//! Declarative query schema
//!
//! A [`QuerySchema`] names the parameters an endpoint reads and how each one
//! is checked. Unlike the imperative validator, a schema can hard-reject a
//! value, which is what lets a typed API boundary answer with a 400.

use indexmap::IndexMap;
use pagekit_domain::RawValue;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What to do when a present value breaks its field's constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnViolation {
    /// Replace the value with the field's declared default
    Fallback,
    /// Move the value to the nearest bound; unparseable input takes the default
    Clamp,
    /// Fail validation
    #[default]
    Reject,
}

/// Constraint for one query parameter
///
/// # Examples
/// ```
/// # use pagekit::domain::value_objects::{FieldSchema, OnViolation};
/// let limit = FieldSchema::Integer {
///     minimum: Some(1),
///     maximum: Some(100),
///     default: Some(10),
///     on_violation: OnViolation::Clamp,
/// };
/// assert_eq!(limit.type_name(), "integer");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldSchema {
    /// Whole number; fractional input is floored
    Integer {
        /// Minimum value (inclusive)
        minimum: Option<i64>,
        /// Maximum value (inclusive)
        maximum: Option<i64>,
        /// Value used when absent or when a violation falls back
        default: Option<i64>,
        /// Violation handling
        on_violation: OnViolation,
    },

    /// Trimmed text with an optional length cap in characters
    ///
    /// `Clamp` truncates, `Fallback` drops the value.
    Text {
        /// Maximum length (inclusive)
        max_length: Option<usize>,
        /// Violation handling
        on_violation: OnViolation,
    },

    /// One of a fixed set of literals
    ///
    /// Matching ignores ASCII case and yields the canonical spelling unless
    /// `case_sensitive` is set. An empty `allowed_values` accepts any
    /// non-empty text.
    Enum {
        /// Accepted literals, in canonical spelling
        allowed_values: SmallVec<[String; 8]>,
        /// Value used when absent or when a violation falls back
        default: Option<String>,
        /// Violation handling
        on_violation: OnViolation,
        /// Require an exact match
        #[serde(default)]
        case_sensitive: bool,
    },

    /// Opaque nested map, or JSON text decoding to an object
    Map,
}

impl FieldSchema {
    /// Integer with bounds, no default, rejecting violations
    pub fn integer(minimum: Option<i64>, maximum: Option<i64>) -> Self {
        Self::Integer {
            minimum,
            maximum,
            default: None,
            on_violation: OnViolation::Reject,
        }
    }

    /// Text with a length cap, rejecting violations
    pub fn text(max_length: Option<usize>) -> Self {
        Self::Text {
            max_length,
            on_violation: OnViolation::Reject,
        }
    }

    /// Enum over `allowed_values`, no default, rejecting violations
    pub fn enumeration<I, S>(allowed_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            allowed_values: allowed_values.into_iter().map(Into::into).collect(),
            default: None,
            on_violation: OnViolation::Reject,
            case_sensitive: false,
        }
    }

    /// Require exact enum matches; no-op for other kinds
    pub fn case_sensitive(mut self) -> Self {
        if let Self::Enum { case_sensitive, .. } = &mut self {
            *case_sensitive = true;
        }
        self
    }

    /// Replace the violation handling; no-op for [`FieldSchema::Map`]
    pub fn on_violation(mut self, handling: OnViolation) -> Self {
        match &mut self {
            Self::Integer { on_violation, .. }
            | Self::Text { on_violation, .. }
            | Self::Enum { on_violation, .. } => *on_violation = handling,
            Self::Map => {}
        }
        self
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "integer",
            Self::Text { .. } => "string",
            Self::Enum { .. } => "enum",
            Self::Map => "object",
        }
    }
}

/// Ordered parameter name → constraint table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuerySchema {
    fields: IndexMap<String, FieldSchema>,
}

impl QuerySchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    /// Constraint for one field
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One value that passed its field's schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedValue {
    /// From [`FieldSchema::Integer`]
    Integer(i64),
    /// From [`FieldSchema::Text`] or [`FieldSchema::Enum`]
    Text(String),
    /// From [`FieldSchema::Map`]
    Map(IndexMap<String, RawValue>),
}

/// Validated values keyed by field name
///
/// Fields that were absent and had no default are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedFields(IndexMap<String, ValidatedValue>);

impl ValidatedFields {
    pub(crate) fn insert(&mut self, name: &str, value: ValidatedValue) {
        self.0.insert(name.to_string(), value);
    }

    /// Raw access to one field
    pub fn get(&self, name: &str) -> Option<&ValidatedValue> {
        self.0.get(name)
    }

    /// Integer field value
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(ValidatedValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Text or enum field value
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ValidatedValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Map field value
    pub fn map(&self, name: &str) -> Option<&IndexMap<String, RawValue>> {
        match self.0.get(name) {
            Some(ValidatedValue::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Take a map field value out
    pub fn take_map(&mut self, name: &str) -> Option<IndexMap<String, RawValue>> {
        match self.0.shift_remove(name) {
            Some(ValidatedValue::Map(map)) => Some(map),
            Some(other) => {
                self.0.insert(name.to_string(), other);
                None
            }
            None => None,
        }
    }

    /// Whether the field produced a value
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields with a value
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field produced a value
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Schema validation result
pub type SchemaValidationResult<T> = Result<T, SchemaValidationError>;

/// Schema validation error
///
/// Every variant carries the parameter name as `path` so a transport can
/// point the client at the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SchemaValidationError {
    /// Type mismatch error
    #[error("Type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Parameter name
        path: String,
        /// Expected type
        expected: String,
        /// Actual type
        actual: String,
    },

    /// Value out of range
    #[error("Value out of range at '{path}': {value} not in [{min}, {max}]")]
    OutOfRange {
        /// Parameter name
        path: String,
        /// Actual value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// String length constraint violation
    #[error("String length constraint at '{path}': length {actual} not in [{min}, {max}]")]
    StringLengthConstraint {
        /// Parameter name
        path: String,
        /// Actual length in characters
        actual: usize,
        /// Minimum allowed length
        min: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Invalid enum value
    #[error("Invalid enum value at '{path}': '{value}' not in allowed values")]
    InvalidEnumValue {
        /// Parameter name
        path: String,
        /// Actual value
        value: String,
    },
}

impl SchemaValidationError {
    /// Parameter the error refers to
    pub fn path(&self) -> &str {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::OutOfRange { path, .. }
            | Self::StringLengthConstraint { path, .. }
            | Self::InvalidEnumValue { path, .. } => path,
        }
    }
}
