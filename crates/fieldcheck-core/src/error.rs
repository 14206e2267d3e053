//! # Error Types — Two Disjoint Taxonomies
//!
//! Data validation and schema validation fail in different ways and are
//! kept apart at the type level:
//!
//! - [`ViolationKind`] classifies a finding against *data*. Violations are
//!   plain values collected into a result; they are never raised.
//! - [`SchemaError`] signals a defect in a *schema definition*. It is a
//!   configuration error, returned fail-fast from schema self-validation,
//!   and should abort schema loading.
//!
//! [`CoercionError`] is the internal failure of numeric extraction; the
//! range checker folds it into a [`ViolationKind::RangeViolation`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a single data violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent from the record.
    MissingRequiredField,
    /// The runtime tag does not match the declared type.
    TypeMismatch,
    /// A numeric value is out of bounds or not coercible to the declared type.
    RangeViolation,
    /// A string is shorter or longer than allowed.
    LengthViolation,
    /// A string does not match the rule's pattern.
    PatternViolation,
    /// A value is not one of the rule's allowed values.
    DisallowedValue,
    /// A caller-supplied custom check reported a failure.
    CustomValidationFailure,
}

impl ViolationKind {
    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::TypeMismatch => "type_mismatch",
            Self::RangeViolation => "range_violation",
            Self::LengthViolation => "length_violation",
            Self::PatternViolation => "pattern_violation",
            Self::DisallowedValue => "disallowed_value",
            Self::CustomValidationFailure => "custom_validation_failure",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to interpret a value as a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The value is not numeric at all.
    #[error("cannot interpret {found} as {target}")]
    NotNumeric {
        /// Requested numeric representation ("integer" or "float").
        target: &'static str,
        /// Runtime tag of the offending value.
        found: &'static str,
    },

    /// A float has a fractional part (or is non-finite, or out of `i64` range).
    #[error("float {0} is not an exact integer")]
    NotIntegral(f64),
}

/// A structural defect in a schema definition.
///
/// Returned by schema self-validation on the first defect found. Nested
/// defects are wrapped in [`SchemaError::InvalidNestedSchema`], which keeps
/// the inner cause reachable through [`std::error::Error::source`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A field name contains whitespace or control characters.
    #[error("invalid field name: {field:?}")]
    InvalidFieldName {
        /// The rejected field name.
        field: String,
    },

    /// The declared type is outside the closed type set.
    #[error("invalid type '{type_name}' for field '{field}'")]
    UnknownType {
        /// Field carrying the rule.
        field: String,
        /// The unrecognized type name.
        type_name: String,
    },

    /// A default value does not match the declared type.
    #[error("default value for '{field}' does not match type '{declared}' (found {found})")]
    DefaultTypeMismatch {
        /// Field carrying the rule.
        field: String,
        /// Declared type name.
        declared: String,
        /// Runtime tag of the default value.
        found: &'static str,
    },

    /// `min`/`max` set on a non-numeric type.
    #[error("min/max can only be used for numeric fields, but found in '{field}' of type '{declared}'")]
    MisplacedRangeConstraint {
        /// Field carrying the rule.
        field: String,
        /// Declared type name.
        declared: String,
    },

    /// `min_length`/`max_length`/`pattern` set on a non-string type.
    #[error("{constraint} can only be used for string fields, but found in '{field}' of type '{declared}'")]
    MisplacedStringConstraint {
        /// Field carrying the rule.
        field: String,
        /// Declared type name.
        declared: String,
        /// The misplaced constraint.
        constraint: &'static str,
    },

    /// A pattern failed to compile.
    #[error("invalid pattern {pattern:?} for field '{field}': {reason}")]
    InvalidPattern {
        /// Field carrying the rule.
        field: String,
        /// Pattern source text.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A lower bound exceeds its upper bound.
    #[error("{constraint} bounds are inverted for field '{field}'")]
    InvertedBounds {
        /// Field carrying the rule.
        field: String,
        /// Which pair of bounds ("min/max" or "min_length/max_length").
        constraint: &'static str,
    },

    /// An allowed value does not match the declared type.
    #[error("allowed value for '{field}' does not match type '{declared}' (found {found})")]
    AllowedValueTypeMismatch {
        /// Field carrying the rule.
        field: String,
        /// Declared type name.
        declared: String,
        /// Runtime tag of the offending allowed value.
        found: &'static str,
    },

    /// Schema nesting exceeds the configured depth limit.
    #[error("schema nesting under '{field}' exceeds the depth limit of {limit}")]
    DepthExceeded {
        /// Field at which the limit was crossed.
        field: String,
        /// Configured limit.
        limit: usize,
    },

    /// A nested item rule or nested schema is itself invalid.
    #[error("invalid {container} schema in '{field}': {source}")]
    InvalidNestedSchema {
        /// Field carrying the container rule.
        field: String,
        /// "list" or "map".
        container: &'static str,
        /// The defect inside the nested schema.
        #[source]
        source: Box<SchemaError>,
    },
}

/// Fieldless discriminant of [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    InvalidFieldName,
    UnknownType,
    DefaultTypeMismatch,
    MisplacedRangeConstraint,
    MisplacedStringConstraint,
    InvalidPattern,
    InvertedBounds,
    AllowedValueTypeMismatch,
    DepthExceeded,
    InvalidNestedSchema,
}

impl SchemaError {
    /// Returns the discriminant of this error.
    pub fn kind(&self) -> SchemaErrorKind {
        match self {
            Self::InvalidFieldName { .. } => SchemaErrorKind::InvalidFieldName,
            Self::UnknownType { .. } => SchemaErrorKind::UnknownType,
            Self::DefaultTypeMismatch { .. } => SchemaErrorKind::DefaultTypeMismatch,
            Self::MisplacedRangeConstraint { .. } => SchemaErrorKind::MisplacedRangeConstraint,
            Self::MisplacedStringConstraint { .. } => SchemaErrorKind::MisplacedStringConstraint,
            Self::InvalidPattern { .. } => SchemaErrorKind::InvalidPattern,
            Self::InvertedBounds { .. } => SchemaErrorKind::InvertedBounds,
            Self::AllowedValueTypeMismatch { .. } => SchemaErrorKind::AllowedValueTypeMismatch,
            Self::DepthExceeded { .. } => SchemaErrorKind::DepthExceeded,
            Self::InvalidNestedSchema { .. } => SchemaErrorKind::InvalidNestedSchema,
        }
    }

    /// Returns the field name the error is reported against.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidFieldName { field }
            | Self::UnknownType { field, .. }
            | Self::DefaultTypeMismatch { field, .. }
            | Self::MisplacedRangeConstraint { field, .. }
            | Self::MisplacedStringConstraint { field, .. }
            | Self::InvalidPattern { field, .. }
            | Self::InvertedBounds { field, .. }
            | Self::AllowedValueTypeMismatch { field, .. }
            | Self::DepthExceeded { field, .. }
            | Self::InvalidNestedSchema { field, .. } => field,
        }
    }

    /// Follows [`SchemaError::InvalidNestedSchema`] wrappers to the innermost defect.
    pub fn root_cause(&self) -> &SchemaError {
        let mut current = self;
        while let Self::InvalidNestedSchema { source, .. } = current {
            current = source.as_ref();
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_violation_kind_serializes_snake_case() {
        let text = serde_json::to_string(&ViolationKind::MissingRequiredField).unwrap();
        assert_eq!(text, "\"missing_required_field\"");
        assert_eq!(ViolationKind::PatternViolation.to_string(), "pattern_violation");
    }

    #[test]
    fn test_nested_schema_error_exposes_source() {
        let inner = SchemaError::UnknownType {
            field: "zip".into(),
            type_name: "number".into(),
        };
        let err = SchemaError::InvalidNestedSchema {
            field: "address".into(),
            container: "map",
            source: Box::new(inner.clone()),
        };
        assert_eq!(err.kind(), SchemaErrorKind::InvalidNestedSchema);
        assert_eq!(err.field(), "address");
        assert_eq!(err.root_cause(), &inner);
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid map schema in 'address': invalid type 'number' for field 'zip'"
        );
    }

    #[test]
    fn test_misplaced_range_message() {
        let err = SchemaError::MisplacedRangeConstraint {
            field: "age".into(),
            declared: "string".into(),
        };
        assert!(err.to_string().contains("numeric"));
        assert!(err.to_string().contains("'age'"));
    }
}
