//! # fieldcheck-schema — Declarative Record Validation
//!
//! Validates untyped, recursively structured records against a declarative
//! [`Schema`] and reports *every* violation, each addressed by its path
//! from the root record (`address.zip`, `tags[2]`).
//!
//! ## Entry Points
//!
//! - [`validate_schema`]: checks a schema definition once, fail-fast, at
//!   load time. A malformed schema is a configuration error.
//! - [`validate`]: checks one record against a schema. Never fails; all
//!   findings are returned in a [`ValidationResult`].
//! - [`Validator`]: combines the two. It self-validates the schema
//!   at construction and shares it immutably across threads.
//!
//! ```
//! use fieldcheck_core::{Record, Value, ViolationKind};
//! use fieldcheck_schema::{validate, validate_schema, Rule, Schema};
//!
//! let schema = Schema::new()
//!     .field("name", Rule::string().required().min_length(2))
//!     .field("age", Rule::int().min(18.0).max(99.0));
//! validate_schema(&schema).unwrap();
//!
//! let mut data = Record::new();
//! data.insert("name".into(), Value::from("A"));
//! data.insert("age".into(), Value::from(17));
//!
//! let result = validate(&data, &schema);
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0].field, "name");
//! assert_eq!(result.errors[0].kind, ViolationKind::LengthViolation);
//! assert_eq!(result.errors[1].field, "age");
//! assert_eq!(result.errors[1].kind, ViolationKind::RangeViolation);
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `fieldcheck-core` internally.
//! - Pure and synchronous: no I/O, no global state, no background work.
//! - Schemas are never mutated by validation.
//! - Logs through `tracing`; installs no subscriber.

pub mod check;
pub mod config;
pub mod messages;
pub mod rule;
pub mod schema;
pub mod self_check;
pub mod validate;

pub use check::{check_numeric, check_string, Finding};
pub use config::ValidatorConfig;
pub use messages::{MessageKey, Messages};
pub use rule::{CustomCheck, Pattern, Rule};
pub use schema::Schema;
pub use self_check::{is_valid_field_name, validate_schema, validate_schema_with};
pub use validate::{
    validate, validate_with, ValidationError, ValidationErrors, ValidationResult, Validator,
};
