//! # Declared Types and the Type Matcher
//!
//! [`FieldType`] is the single, closed enumeration of type names a schema
//! may declare. It is consulted in exactly two places: the Type Matcher
//! below, and schema self-validation. Adding a variant forces both to
//! handle it at compile time.
//!
//! A rule may still carry a type name outside the set (it came from
//! configuration written by a human); that case is represented explicitly
//! as [`DeclaredType::Unknown`] rather than coerced or dropped.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::numeric::is_integral;
use crate::value::Value;

/// The closed set of declarable field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    List,
    Map,
}

impl FieldType {
    /// All declarable types, in canonical order.
    pub const ALL: [FieldType; 6] = [
        FieldType::String,
        FieldType::Int,
        FieldType::Float,
        FieldType::Bool,
        FieldType::List,
        FieldType::Map,
    ];

    /// The schema-facing type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::List => "list",
            FieldType::Map => "map",
        }
    }

    /// True for `int` and `float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Int | FieldType::Float)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a type name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0:?}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// The type a rule declares: either a member of the closed set, or the
/// raw name of something that is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Known(FieldType),
    Unknown(String),
}

impl DeclaredType {
    /// Returns the known type, if any.
    pub fn known(&self) -> Option<FieldType> {
        match self {
            DeclaredType::Known(t) => Some(*t),
            DeclaredType::Unknown(_) => None,
        }
    }

    /// The declared name, as written.
    pub fn name(&self) -> &str {
        match self {
            DeclaredType::Known(t) => t.as_str(),
            DeclaredType::Unknown(name) => name,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.known().is_some_and(|t| t.is_numeric())
    }
}

impl From<FieldType> for DeclaredType {
    fn from(t: FieldType) -> Self {
        DeclaredType::Known(t)
    }
}

impl From<&str> for DeclaredType {
    fn from(name: &str) -> Self {
        match name.parse::<FieldType>() {
            Ok(t) => DeclaredType::Known(t),
            Err(UnknownFieldType(raw)) => DeclaredType::Unknown(raw),
        }
    }
}

impl From<String> for DeclaredType {
    fn from(name: String) -> Self {
        DeclaredType::from(name.as_str())
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an integer-valued float satisfies a declared `int`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerPolicy {
    /// Only [`Value::Int`] matches `int`. `100.0` is a type mismatch.
    #[default]
    Strict,
    /// A [`Value::Float`] with a zero fractional part also matches `int`.
    AllowIntegralFloat,
}

/// Decides whether `value`'s runtime tag is compatible with `declared`,
/// under the strict integer policy.
///
/// An `Int` never matches `float`; an unknown declared type never matches.
pub fn type_matches(value: &Value, declared: &DeclaredType) -> bool {
    type_matches_with(value, declared, IntegerPolicy::Strict)
}

/// [`type_matches`] with an explicit [`IntegerPolicy`].
pub fn type_matches_with(value: &Value, declared: &DeclaredType, policy: IntegerPolicy) -> bool {
    let Some(declared) = declared.known() else {
        return false;
    };
    match (declared, value) {
        (FieldType::String, Value::String(_)) => true,
        (FieldType::Bool, Value::Bool(_)) => true,
        (FieldType::Float, Value::Float(_)) => true,
        (FieldType::Int, Value::Int(_)) => true,
        (FieldType::Int, Value::Float(x)) => {
            policy == IntegerPolicy::AllowIntegralFloat && is_integral(*x)
        }
        (FieldType::List, Value::List(_)) => true,
        (FieldType::Map, Value::Record(_)) => true,
        _ => false,
    }
}
