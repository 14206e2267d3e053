//! # Schema Self-Validation
//!
//! Walks a schema definition (not data) and rejects it on the first
//! structural defect. Intended to run once, when the schema is loaded; a
//! failure is a configuration error and should abort loading.
//!
//! Checks per field, in order:
//!
//! 1. Field name is a safe path segment: no control characters and no
//!    Unicode whitespace (`char::is_whitespace`, so NBSP and U+2028 are
//!    rejected along with ASCII space). The empty name is allowed.
//! 2. Declared type is in the closed set.
//! 3. `default`, if present, matches the declared type.
//! 4. `min`/`max` only on `int`/`float`.
//! 5. `min_length`/`max_length`/`pattern` only on `string`.
//! 6. `pattern` compiles.
//! 7. Bounds are not inverted.
//! 8. Every allowed value matches the declared type.
//! 9. Nested item rule / nested schema is itself valid (depth-limited when
//!    configured), wrapped as `InvalidNestedSchema`.

use fieldcheck_core::{type_matches_with, FieldType, SchemaError};

use crate::config::ValidatorConfig;
use crate::rule::Rule;
use crate::schema::Schema;

/// Synthetic field name an item rule is checked under.
const ITEMS_FIELD: &str = "items";

/// Checks that `schema` is well-formed, under the default configuration.
///
/// # Errors
///
/// Returns the first [`SchemaError`] found, in declaration order.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_schema_with(schema, &ValidatorConfig::default())
}

/// [`validate_schema`] under an explicit [`ValidatorConfig`].
///
/// # Errors
///
/// Returns the first [`SchemaError`] found, in declaration order.
pub fn validate_schema_with(schema: &Schema, config: &ValidatorConfig) -> Result<(), SchemaError> {
    check_schema(schema, config, 0).map_err(|e| {
        tracing::debug!(field = e.field(), error = %e, "schema rejected");
        e
    })
}

/// True if `name` can be used as a path segment in violation addresses.
pub fn is_valid_field_name(name: &str) -> bool {
    !name.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn check_schema(schema: &Schema, config: &ValidatorConfig, depth: usize) -> Result<(), SchemaError> {
    for (field, rule) in schema.iter() {
        check_rule(field, rule, config, depth)?;
    }
    Ok(())
}

fn check_rule(
    field: &str,
    rule: &Rule,
    config: &ValidatorConfig,
    depth: usize,
) -> Result<(), SchemaError> {
    if !is_valid_field_name(field) {
        return Err(SchemaError::InvalidFieldName {
            field: field.to_string(),
        });
    }

    let declared = rule.declared_type();
    let Some(field_type) = declared.known() else {
        return Err(SchemaError::UnknownType {
            field: field.to_string(),
            type_name: declared.name().to_string(),
        });
    };

    if let Some(default) = rule.declared_default() {
        if !type_matches_with(default, declared, config.integer_policy) {
            return Err(SchemaError::DefaultTypeMismatch {
                field: field.to_string(),
                declared: declared.name().to_string(),
                found: default.type_name(),
            });
        }
    }

    if (rule.min_bound().is_some() || rule.max_bound().is_some()) && !field_type.is_numeric() {
        return Err(SchemaError::MisplacedRangeConstraint {
            field: field.to_string(),
            declared: declared.name().to_string(),
        });
    }

    if field_type != FieldType::String {
        let misplaced = [
            (rule.min_len().is_some(), "min_length"),
            (rule.max_len().is_some(), "max_length"),
            (rule.pattern_ref().is_some(), "pattern"),
        ]
        .into_iter()
        .find_map(|(set, name)| set.then_some(name));
        if let Some(constraint) = misplaced {
            return Err(SchemaError::MisplacedStringConstraint {
                field: field.to_string(),
                declared: declared.name().to_string(),
                constraint,
            });
        }
    }

    if let Some(pattern) = rule.pattern_ref() {
        if let Some(reason) = pattern.compile_error() {
            return Err(SchemaError::InvalidPattern {
                field: field.to_string(),
                pattern: pattern.source().to_string(),
                reason: reason.to_string(),
            });
        }
    }

    if let (Some(min), Some(max)) = (rule.min_bound(), rule.max_bound()) {
        if min > max {
            return Err(SchemaError::InvertedBounds {
                field: field.to_string(),
                constraint: "min/max",
            });
        }
    }
    if let (Some(min), Some(max)) = (rule.min_len(), rule.max_len()) {
        if min > max {
            return Err(SchemaError::InvertedBounds {
                field: field.to_string(),
                constraint: "min_length/max_length",
            });
        }
    }

    if let Some(allowed) = rule.allowed() {
        if let Some(bad) = allowed
            .iter()
            .find(|v| !type_matches_with(v, declared, config.integer_policy))
        {
            return Err(SchemaError::AllowedValueTypeMismatch {
                field: field.to_string(),
                declared: declared.name().to_string(),
                found: bad.type_name(),
            });
        }
    }

    let nested_depth = depth + 1;
    let within_limit = |field: &str| match config.max_depth {
        Some(limit) if nested_depth > limit => Err(SchemaError::DepthExceeded {
            field: field.to_string(),
            limit,
        }),
        _ => Ok(()),
    };

    match field_type {
        FieldType::List => {
            if let Some(item_rule) = rule.item_rule() {
                within_limit(field)?;
                check_rule(ITEMS_FIELD, item_rule, config, nested_depth)
                    .map_err(|e| nested(field, "list", e))?;
            }
        }
        FieldType::Map => {
            if let Some(nested_schema) = rule.nested_schema() {
                within_limit(field)?;
                check_schema(nested_schema, config, nested_depth)
                    .map_err(|e| nested(field, "map", e))?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn nested(field: &str, container: &'static str, source: SchemaError) -> SchemaError {
    SchemaError::InvalidNestedSchema {
        field: field.to_string(),
        container,
        source: Box::new(source),
    }
}
