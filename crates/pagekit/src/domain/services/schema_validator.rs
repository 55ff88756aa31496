//! Declarative schema validation service
//!
//! Checks a raw query against a [`QuerySchema`]. Each field either yields a
//! value, falls back or clamps as its schema allows, or fails the whole
//! validation with a [`SchemaValidationError`] naming the parameter.

use indexmap::IndexMap;
use pagekit_domain::coercion::{coerce_enum, coerce_number, coerce_string, parse_json};
use pagekit_domain::{Coerced, DefaultReason, RawQuery, RawValue};
use tracing::debug;

use crate::domain::value_objects::{
    FieldSchema, OnViolation, QuerySchema, SchemaValidationError, SchemaValidationResult,
    ValidatedFields, ValidatedValue,
};

/// Schema validation service
///
/// Stateless; one instance can serve any number of schemas and requests.
///
/// # Examples
/// ```
/// # use pagekit::domain::services::SchemaValidator;
/// # use pagekit::domain::value_objects::{FieldSchema, QuerySchema, RawQuery};
/// let schema = QuerySchema::new().field("page", FieldSchema::integer(Some(1), None));
/// let query = RawQuery::from_pairs([("page", "3")]);
///
/// let fields = SchemaValidator::new().validate(&query, &schema).unwrap();
/// assert_eq!(fields.integer("page"), Some(3));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Create a new validation service
    pub fn new() -> Self {
        Self
    }

    /// Validate every field declared in `schema`
    ///
    /// Parameters the schema does not mention are ignored.
    ///
    /// # Errors
    /// Returns the first `SchemaValidationError` raised by a field whose
    /// schema rejects violations
    pub fn validate(
        &self,
        query: &RawQuery,
        schema: &QuerySchema,
    ) -> SchemaValidationResult<ValidatedFields> {
        let mut fields = ValidatedFields::default();

        for (name, field) in schema.iter() {
            let raw = query.get(name);
            let value = match field {
                FieldSchema::Integer {
                    minimum,
                    maximum,
                    default,
                    on_violation,
                } => self
                    .validate_integer(name, raw, *minimum, *maximum, *default, *on_violation)?
                    .map(ValidatedValue::Integer),
                FieldSchema::Text {
                    max_length,
                    on_violation,
                } => self
                    .validate_text(name, raw, *max_length, *on_violation)?
                    .map(ValidatedValue::Text),
                FieldSchema::Enum {
                    allowed_values,
                    default,
                    on_violation,
                    case_sensitive,
                } => self
                    .validate_enum(
                        name,
                        raw,
                        allowed_values,
                        default.as_deref(),
                        *on_violation,
                        *case_sensitive,
                    )?
                    .map(ValidatedValue::Text),
                FieldSchema::Map => decode_map(raw).map(ValidatedValue::Map),
            };

            if let Some(value) = value {
                fields.insert(name, value);
            }
        }

        Ok(fields)
    }

    fn validate_integer(
        &self,
        path: &str,
        raw: Option<&RawValue>,
        minimum: Option<i64>,
        maximum: Option<i64>,
        default: Option<i64>,
        on_violation: OnViolation,
    ) -> SchemaValidationResult<Option<i64>> {
        let number = match coerce_number(raw, None, None, None) {
            Coerced::Parsed(Some(number)) => number,
            Coerced::Parsed(None) | Coerced::Defaulted(_, DefaultReason::Absent) => {
                return Ok(default);
            }
            Coerced::Defaulted(_, reason) => {
                if on_violation == OnViolation::Reject {
                    return Err(SchemaValidationError::TypeMismatch {
                        path: path.to_string(),
                        expected: "integer".to_string(),
                        actual: describe(raw),
                    });
                }
                debug!(field = path, %reason, "schema field fell back to default");
                return Ok(default);
            }
        };

        // `as` saturates, so huge input lands on i64::MIN / i64::MAX
        let value = number.floor() as i64;

        let bound = match (minimum, maximum) {
            (Some(min), _) if value < min => min,
            (_, Some(max)) if value > max => max,
            _ => return Ok(Some(value)),
        };

        match on_violation {
            OnViolation::Reject => Err(SchemaValidationError::OutOfRange {
                path: path.to_string(),
                value: value.to_string(),
                min: minimum.map_or_else(|| "-inf".to_string(), |min| min.to_string()),
                max: maximum.map_or_else(|| "inf".to_string(), |max| max.to_string()),
            }),
            OnViolation::Clamp => {
                debug!(field = path, value, bound, "schema field clamped");
                Ok(Some(bound))
            }
            OnViolation::Fallback => {
                debug!(field = path, value, "schema field out of range, using default");
                Ok(default.or(Some(bound)))
            }
        }
    }

    fn validate_text(
        &self,
        path: &str,
        raw: Option<&RawValue>,
        max_length: Option<usize>,
        on_violation: OnViolation,
    ) -> SchemaValidationResult<Option<String>> {
        let text = match coerce_string(raw, None, None) {
            Coerced::Parsed(Some(text)) => text,
            Coerced::Defaulted(_, DefaultReason::Malformed) => {
                if on_violation == OnViolation::Reject {
                    return Err(SchemaValidationError::TypeMismatch {
                        path: path.to_string(),
                        expected: "string".to_string(),
                        actual: describe(raw),
                    });
                }
                return Ok(None);
            }
            _ => return Ok(None),
        };

        let Some(max) = max_length else {
            return Ok(Some(text));
        };
        let length = text.chars().count();
        if length <= max {
            return Ok(Some(text));
        }

        match on_violation {
            OnViolation::Reject => Err(SchemaValidationError::StringLengthConstraint {
                path: path.to_string(),
                actual: length,
                min: 0,
                max,
            }),
            OnViolation::Clamp => {
                debug!(field = path, length, max, "schema field truncated");
                let truncated = coerce_string(Some(&RawValue::Text(text)), None, Some(max));
                Ok(truncated.into_value())
            }
            OnViolation::Fallback => {
                debug!(field = path, length, max, "schema field too long, dropped");
                Ok(None)
            }
        }
    }

    fn validate_enum(
        &self,
        path: &str,
        raw: Option<&RawValue>,
        allowed_values: &[String],
        default: Option<&str>,
        on_violation: OnViolation,
        case_sensitive: bool,
    ) -> SchemaValidationResult<Option<String>> {
        let coerced = if allowed_values.is_empty() {
            coerce_string(raw, None, None)
        } else if case_sensitive {
            match coerce_string(raw, None, None) {
                Coerced::Parsed(Some(text)) if !allowed_values.contains(&text) => {
                    Coerced::Defaulted(None, DefaultReason::NotAllowed)
                }
                other => other,
            }
        } else {
            coerce_enum(raw, allowed_values, None)
        };

        match coerced {
            Coerced::Parsed(value @ Some(_)) => Ok(value),
            Coerced::Parsed(None) | Coerced::Defaulted(_, DefaultReason::Absent) => {
                Ok(default.map(str::to_string))
            }
            Coerced::Defaulted(_, reason) => {
                if on_violation == OnViolation::Reject {
                    return Err(SchemaValidationError::InvalidEnumValue {
                        path: path.to_string(),
                        value: raw
                            .and_then(RawValue::as_scalar)
                            .map_or_else(|| describe(raw), |text| text.into_owned()),
                    });
                }
                debug!(field = path, %reason, "schema field fell back to default");
                Ok(default.map(str::to_string))
            }
        }
    }
}

/// Opaque map from a nested map or JSON object text
///
/// Anything else, including JSON that is not an object, yields `None`.
pub(crate) fn decode_map(raw: Option<&RawValue>) -> Option<IndexMap<String, RawValue>> {
    match raw? {
        RawValue::Map(map) => Some(map.clone()),
        RawValue::Text(_) => match parse_json(raw, None)? {
            json @ serde_json::Value::Object(_) => match RawValue::from(json) {
                RawValue::Map(map) => Some(map),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

fn describe(raw: Option<&RawValue>) -> String {
    let name = match raw {
        None | Some(RawValue::Null) => "null",
        Some(RawValue::Bool(_)) => "boolean",
        Some(RawValue::Number(_)) => "number",
        Some(RawValue::Text(_)) => "string",
        Some(RawValue::Date(_)) => "date",
        Some(RawValue::List(_)) => "array",
        Some(RawValue::Map(_)) => "object",
    };
    name.to_string()
}
