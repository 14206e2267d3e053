//! # fieldcheck-core — Foundational Types for fieldcheck
//!
//! The leaf of the workspace DAG. Defines what the validation engine can
//! *see* and how it classifies what it finds, independent of any schema:
//!
//! 1. **A closed value model.** [`Value`] is an exhaustive tagged union
//!    (null, bool, int, float, string, list, record). No reflection, no
//!    `Any`; every inspection is a `match`.
//!
//! 2. **A closed declared-type set.** [`FieldType`] is the one enumeration
//!    of type names a schema may declare. The Type Matcher
//!    ([`type_matches`]) and schema self-validation are its only consumers.
//!
//! 3. **Type identity is not coercion.** [`type_matches`] keeps `int` and
//!    `float` apart; [`extract_int`] / [`extract_float`] are the looser
//!    rules used only for range checking.
//!
//! 4. **Two disjoint error taxonomies.** [`ViolationKind`] classifies data
//!    findings (collected, never raised); [`SchemaError`] signals schema
//!    defects (returned fail-fast).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fieldcheck-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod numeric;
pub mod types;
pub mod value;

pub use error::{CoercionError, SchemaError, SchemaErrorKind, ViolationKind};
pub use numeric::{extract_float, extract_int};
pub use types::{
    type_matches, type_matches_with, DeclaredType, FieldType, IntegerPolicy, UnknownFieldType,
};
pub use value::{Record, Value};
