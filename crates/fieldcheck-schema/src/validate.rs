//! # Recursive Validator
//!
//! Walks a record against a schema and collects every discoverable
//! violation into one ordered result. Validation never fails: all findings
//! are data.
//!
//! ## Per-field algorithm
//!
//! Fields are visited in schema declaration order:
//!
//! 1. Absent: report `MissingRequiredField` if required, then move on.
//! 2. Type mismatch: report `TypeMismatch` and move on. Nothing else runs
//!    for a mistyped value.
//! 3. Type-specific checks: numeric range, string length and pattern,
//!    per-element recursion for lists, nested-record recursion for maps.
//! 4. Allowed values, then the custom check.
//!
//! Nested violations are re-rooted: `name` inside map field `user`
//! becomes `user.name`; element 2 of list field `tags` becomes `tags[2]`
//! (deeper suffixes are kept, e.g. `addresses[2].zip`).
//!
//! Fields present in the data but absent from the schema are ignored.

use std::fmt;
use std::sync::Arc;

use fieldcheck_core::{type_matches_with, FieldType, Record, SchemaError, Value, ViolationKind};
use serde::{Deserialize, Serialize};

use crate::check::{check_numeric, check_string, Finding};
use crate::config::ValidatorConfig;
use crate::messages::{resolve, MessageKey};
use crate::rule::Rule;
use crate::schema::Schema;
use crate::self_check::validate_schema_with;

/// Synthetic field name each list element is validated under.
const ITEM_FIELD: &str = "item";

/// A single violation, addressed by its path from the root record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted/bracketed path, e.g. `address.zip` or `tags[2]`.
    pub field: String,
    /// Human-readable message (default text or the rule's override).
    pub message: String,
    /// Violation category.
    pub kind: ViolationKind,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    /// Re-roots this violation under a map field: `zip` becomes `address.zip`.
    pub fn nested_under(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }

    /// Replaces a leading `synthetic` path segment with `replacement`.
    fn rerooted(mut self, synthetic: &str, replacement: &str) -> Self {
        self.field = match self.field.strip_prefix(synthetic) {
            Some(rest) => format!("{replacement}{rest}"),
            None => format!("{replacement}.{}", self.field),
        };
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A non-empty collection of violations, for callers that want `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Outcome of validating one record against one schema.
///
/// `is_valid` is always `errors.is_empty()`; both are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Violations reported against exactly `field`.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

/// Validates `data` against `schema` with the strict default policy.
///
/// Never fails; every violation is returned in the result, in schema
/// declaration order.
pub fn validate(data: &Record, schema: &Schema) -> ValidationResult {
    validate_with(data, schema, &ValidatorConfig::default())
}

/// [`validate`] under an explicit [`ValidatorConfig`].
pub fn validate_with(data: &Record, schema: &Schema, config: &ValidatorConfig) -> ValidationResult {
    let mut errors = Vec::new();
    validate_record(data, schema, config, &mut errors);
    tracing::trace!(
        fields = schema.len(),
        violations = errors.len(),
        "validated record"
    );
    ValidationResult::from_errors(errors)
}

fn validate_record(
    data: &Record,
    schema: &Schema,
    config: &ValidatorConfig,
    out: &mut Vec<ValidationError>,
) {
    for (name, rule) in schema.iter() {
        match data.get(name) {
            Some(value) => validate_field(name, value, rule, config, out),
            None if rule.is_required() => report(
                out,
                name,
                rule,
                Finding::new(
                    ViolationKind::MissingRequiredField,
                    MessageKey::Required,
                    "Field is required",
                ),
            ),
            None => {}
        }
    }
}

fn validate_field(
    name: &str,
    value: &Value,
    rule: &Rule,
    config: &ValidatorConfig,
    out: &mut Vec<ValidationError>,
) {
    let declared = rule.declared_type();
    if !type_matches_with(value, declared, config.integer_policy) {
        let message = format!(
            "Invalid type: expected {declared}, got {}",
            value.type_name()
        );
        report(
            out,
            name,
            rule,
            Finding::new(ViolationKind::TypeMismatch, MessageKey::TypeMismatch, message),
        );
        return;
    }

    match (declared.known(), value) {
        (Some(FieldType::Int | FieldType::Float), _) => {
            if let Some(finding) = check_numeric(value, rule) {
                report(out, name, rule, finding);
            }
        }
        (Some(FieldType::String), Value::String(s)) => {
            for finding in check_string(s, rule) {
                report(out, name, rule, finding);
            }
        }
        (Some(FieldType::List), Value::List(items)) => {
            if let Some(item_rule) = rule.item_rule() {
                for (index, item) in items.iter().enumerate() {
                    let mut nested = Vec::new();
                    validate_field(ITEM_FIELD, item, item_rule, config, &mut nested);
                    let path = format!("{name}[{index}]");
                    out.extend(nested.into_iter().map(|e| e.rerooted(ITEM_FIELD, &path)));
                }
            }
        }
        (Some(FieldType::Map), Value::Record(fields)) => {
            if let Some(nested_schema) = rule.nested_schema() {
                let mut nested = Vec::new();
                validate_record(fields, nested_schema, config, &mut nested);
                out.extend(nested.into_iter().map(|e| e.nested_under(name)));
            }
        }
        _ => {}
    }

    if let Some(allowed) = rule.allowed() {
        if !allowed.iter().any(|candidate| same_value(candidate, value)) {
            report(
                out,
                name,
                rule,
                Finding::new(
                    ViolationKind::DisallowedValue,
                    MessageKey::AllowedValues,
                    format!("Value {value} is not one of the allowed values"),
                ),
            );
        }
    }

    if let Some(check) = rule.custom_check() {
        if let Some(message) = check.check(value) {
            report(
                out,
                name,
                rule,
                Finding::new(
                    ViolationKind::CustomValidationFailure,
                    MessageKey::CustomError,
                    message,
                ),
            );
        }
    }
}

/// Equality for allowed-value membership. Numbers compare by value, so an
/// integral float accepted under the lenient policy can match an `Int`.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(n), Value::Float(x)) | (Value::Float(x), Value::Int(n)) => *n as f64 == *x,
        _ => a == b,
    }
}

fn report(out: &mut Vec<ValidationError>, field: &str, rule: &Rule, finding: Finding) {
    let message = resolve(rule.message_overrides(), finding.key, finding.message);
    out.push(ValidationError::new(field, finding.kind, message));
}

/// A schema that passed self-validation, published for concurrent use.
///
/// The schema is held behind an [`Arc`] and never exposed mutably, so a
/// `Validator` can be cloned into any number of threads and used without
/// locking.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Arc<Schema>,
    config: ValidatorConfig,
}

impl Validator {
    /// Self-validates `schema` with the default configuration and publishes it.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in the schema.
    pub fn new(schema: Schema) -> Result<Self, SchemaError> {
        Self::with_config(schema, ValidatorConfig::default())
    }

    /// Self-validates `schema` under `config` and publishes it.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in the schema.
    pub fn with_config(schema: Schema, config: ValidatorConfig) -> Result<Self, SchemaError> {
        validate_schema_with(&schema, &config)?;
        Ok(Self {
            schema: Arc::new(schema),
            config,
        })
    }

    pub fn validate(&self, data: &Record) -> ValidationResult {
        validate_with(data, &self.schema, &self.config)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}
