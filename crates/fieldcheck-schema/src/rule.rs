//! # Rules
//!
//! A [`Rule`] is the full constraint set for one field. Rules are built
//! once, top-down, by configuration code and are never mutated by the
//! engine. A rule owns its nested item rule and nested schema outright, so
//! the schema tree has no shared aliasing and no cycles.

use std::fmt;
use std::sync::Arc;

use fieldcheck_core::{DeclaredType, FieldType, Value};
use regex::Regex;

use crate::messages::Messages;
use crate::schema::Schema;

/// Caller-supplied check run in addition to the built-in constraints.
///
/// Returning `Some(message)` reports a failure with that message (subject
/// to the `custom_error` override). Any closure
/// `Fn(&Value) -> Option<String> + Send + Sync` is a `CustomCheck`.
pub trait CustomCheck: Send + Sync {
    fn check(&self, value: &Value) -> Option<String>;
}

impl<F> CustomCheck for F
where
    F: Fn(&Value) -> Option<String> + Send + Sync,
{
    fn check(&self, value: &Value) -> Option<String> {
        self(value)
    }
}

/// A string pattern, compiled once when the rule is built.
///
/// A pattern that fails to compile is kept (with its diagnostic) so schema
/// self-validation can report it.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, String>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source).map_err(|e| e.to_string());
        Self { source, compiled }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expression, or `None` if it failed to compile.
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref().ok()
    }

    /// The compile diagnostic, if compilation failed.
    pub fn compile_error(&self) -> Option<&str> {
        self.compiled.as_ref().err().map(String::as_str)
    }
}

/// Constraints for a single field.
#[derive(Clone)]
pub struct Rule {
    declared: DeclaredType,
    required: bool,
    default: Option<Value>,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Pattern>,
    items: Option<Box<Rule>>,
    schema: Option<Schema>,
    allowed_values: Option<Vec<Value>>,
    custom_check: Option<Arc<dyn CustomCheck>>,
    messages: Option<Messages>,
}

impl Rule {
    /// Creates an optional, unconstrained rule of the given declared type.
    ///
    /// Accepts a [`FieldType`] or a type name; a name outside the closed
    /// set is kept as [`DeclaredType::Unknown`] and rejected by
    /// [`crate::validate_schema`].
    pub fn new(declared: impl Into<DeclaredType>) -> Self {
        Self {
            declared: declared.into(),
            required: false,
            default: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            items: None,
            schema: None,
            allowed_values: None,
            custom_check: None,
            messages: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    pub fn int() -> Self {
        Self::new(FieldType::Int)
    }

    pub fn float() -> Self {
        Self::new(FieldType::Float)
    }

    pub fn bool() -> Self {
        Self::new(FieldType::Bool)
    }

    /// A list rule; every element is validated against `item` when given.
    pub fn list(item: Option<Rule>) -> Self {
        let mut rule = Self::new(FieldType::List);
        rule.items = item.map(Box::new);
        rule
    }

    /// A map rule; the value is validated as a record against `schema` when given.
    pub fn map(schema: Option<Schema>) -> Self {
        let mut rule = Self::new(FieldType::Map);
        rule.schema = schema;
        rule
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declares a default. Only checked for type compatibility during
    /// schema self-validation; never injected into data.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Minimum string length, in characters.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Maximum string length, in characters.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Requires a (substring) match of `source`. Compiled immediately.
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.pattern = Some(Pattern::new(source));
        self
    }

    pub fn items(mut self, item: Rule) -> Self {
        self.items = Some(Box::new(item));
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn check_with(mut self, check: impl CustomCheck + 'static) -> Self {
        self.custom_check = Some(Arc::new(check));
        self
    }

    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn min_bound(&self) -> Option<f64> {
        self.min
    }

    pub fn max_bound(&self) -> Option<f64> {
        self.max
    }

    pub fn min_len(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_length
    }

    pub fn pattern_ref(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn item_rule(&self) -> Option<&Rule> {
        self.items.as_deref()
    }

    pub fn nested_schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed_values.as_deref()
    }

    pub fn custom_check(&self) -> Option<&dyn CustomCheck> {
        self.custom_check.as_deref()
    }

    pub fn message_overrides(&self) -> Option<&Messages> {
        self.messages.as_ref()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("type", &self.declared)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Pattern::source))
            .field("items", &self.items)
            .field("schema", &self.schema)
            .field("allowed_values", &self.allowed_values)
            .field("custom_check", &self.custom_check.is_some())
            .field("messages", &self.messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_constraints() {
        let rule = Rule::string()
            .required()
            .min_length(2)
            .max_length(50)
            .pattern(r"^[a-z]+$");
        assert_eq!(rule.declared_type(), &DeclaredType::Known(FieldType::String));
        assert!(rule.is_required());
        assert_eq!(rule.min_len(), Some(2));
        assert_eq!(rule.max_len(), Some(50));
        assert_eq!(rule.pattern_ref().unwrap().source(), "^[a-z]+$");
        assert!(rule.pattern_ref().unwrap().regex().is_some());
    }

    #[test]
    fn test_zero_bound_is_a_real_bound() {
        let rule = Rule::int().min(0.0);
        assert_eq!(rule.min_bound(), Some(0.0));
        assert_eq!(rule.max_bound(), None);
    }

    #[test]
    fn test_malformed_pattern_is_retained() {
        let rule = Rule::string().pattern("([unclosed");
        let pattern = rule.pattern_ref().unwrap();
        assert!(pattern.regex().is_none());
        assert!(pattern.compile_error().is_some());
    }

    #[test]
    fn test_unknown_type_name_is_kept() {
        let rule = Rule::new("number");
        assert_eq!(rule.declared_type(), &DeclaredType::Unknown("number".into()));
    }

    #[test]
    fn test_custom_check_closure() {
        let rule = Rule::int().check_with(|v: &Value| match v {
            Value::Int(n) if n % 2 == 0 => None,
            _ => Some("Must be an even number".to_string()),
        });
        let check = rule.custom_check().unwrap();
        assert_eq!(check.check(&Value::Int(24)), None);
        assert_eq!(
            check.check(&Value::Int(25)).as_deref(),
            Some("Must be an even number")
        );
    }

    #[test]
    fn test_debug_does_not_require_check_debug() {
        let rule = Rule::bool().check_with(|_: &Value| -> Option<String> { None });
        let text = format!("{rule:?}");
        assert!(text.contains("custom_check: true"));
    }
}
