//! Primitive coercion library
//!
//! Stateless conversions from one [`RawValue`](crate::RawValue) into one
//! typed value. Every conversion is total: unusable input is replaced by a
//! caller-supplied default, never reported as a panic or error.
//!
//! Each primitive comes in two forms:
//! - `coerce_*` returns a [`Coerced`] that records *why* a default was used
//! - `parse_*` collapses that to the plain value
//!
//! At the `parse_*` level "absent", "invalid" and "out of range" are
//! indistinguishable; callers that need to tell them apart use the
//! `coerce_*` form and [`Coerced::into_strict`].

mod primitives;

pub use primitives::{
    DEFAULT_ARRAY_SEPARATOR, coerce_array, coerce_boolean, coerce_date, coerce_enum,
    coerce_json, coerce_number, coerce_string, parse_array, parse_boolean, parse_date,
    parse_enum, parse_json, parse_number, parse_string,
};

/// Outcome of one coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// Input was usable and produced this value
    Parsed(T),
    /// Input was unusable; this is the fallback that replaced it
    Defaulted(T, DefaultReason),
}

impl<T> Coerced<T> {
    /// Borrow the resulting value
    pub fn value(&self) -> &T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value, _) => value,
        }
    }

    /// Collapse to the resulting value
    pub fn into_value(self) -> T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value, _) => value,
        }
    }

    /// Whether a fallback replaced the input
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(..))
    }

    /// Why the fallback was used, if it was
    pub fn reason(&self) -> Option<DefaultReason> {
        match self {
            Self::Parsed(_) => None,
            Self::Defaulted(_, reason) => Some(*reason),
        }
    }

    /// Transform the value, keeping the outcome
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Coerced<U> {
        match self {
            Self::Parsed(value) => Coerced::Parsed(f(value)),
            Self::Defaulted(value, reason) => Coerced::Defaulted(f(value), reason),
        }
    }

    /// Strict view: any fallback becomes an error
    ///
    /// # Errors
    /// Returns the [`DefaultReason`] when the input was not used as given
    pub fn into_strict(self) -> Result<T, DefaultReason> {
        match self {
            Self::Parsed(value) => Ok(value),
            Self::Defaulted(_, reason) => Err(reason),
        }
    }
}

/// Why a coercion fell back instead of using the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DefaultReason {
    /// Missing, null, or empty after trimming
    #[error("value is absent")]
    Absent,
    /// Present but not of the expected shape or syntax
    #[error("value is malformed")]
    Malformed,
    /// Parsed to NaN or infinity
    #[error("value is not a finite number")]
    NonFinite,
    /// Numeric value below the lower bound
    #[error("value is below the minimum")]
    BelowMinimum,
    /// Numeric value above the upper bound
    #[error("value is above the maximum")]
    AboveMaximum,
    /// Not one of the permitted values
    #[error("value is not allowed")]
    NotAllowed,
    /// Text was shortened to the maximum length
    #[error("value was truncated")]
    Truncated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerced_accessors() {
        let parsed = Coerced::Parsed(5);
        assert_eq!(*parsed.value(), 5);
        assert!(!parsed.is_defaulted());
        assert_eq!(parsed.reason(), None);
        assert_eq!(parsed.into_strict(), Ok(5));

        let defaulted = Coerced::Defaulted(10, DefaultReason::Malformed);
        assert!(defaulted.is_defaulted());
        assert_eq!(defaulted.reason(), Some(DefaultReason::Malformed));
        assert_eq!(defaulted.clone().into_value(), 10);
        assert_eq!(defaulted.into_strict(), Err(DefaultReason::Malformed));
    }

    #[test]
    fn test_coerced_map_keeps_reason() {
        let mapped = Coerced::Defaulted(2, DefaultReason::AboveMaximum).map(|n| n * 2);
        assert_eq!(mapped, Coerced::Defaulted(4, DefaultReason::AboveMaximum));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(DefaultReason::NonFinite.to_string(), "value is not a finite number");
    }
}
