//! # Schema
//!
//! A mapping from field name to [`Rule`]. Field names are unique (map
//! semantics: re-inserting a name replaces its rule in place). Iteration
//! follows declaration order, which fixes the order in which violations
//! are emitted and the order in which schema defects are found.

use indexmap::IndexMap;

use crate::rule::Rule;

/// Declarative description of a record's expected shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Rule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::insert`].
    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Declares `name`, returning the rule it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.fields.insert(name.into(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Rule)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Rule)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, rule) in iter {
            schema.insert(name, rule);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = Schema::new()
            .field("name", Rule::string())
            .field("age", Rule::int())
            .field("active", Rule::bool());
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, vec!["name", "age", "active"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut schema = Schema::new()
            .field("a", Rule::string())
            .field("b", Rule::int());
        let previous = schema.insert("a", Rule::float());
        assert!(previous.is_some());
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.names().next(), Some("a"));
        assert_eq!(schema.get("a").unwrap().declared_type().name(), "float");
    }

    #[test]
    fn test_from_iterator() {
        let schema: Schema = vec![("x", Rule::int()), ("y", Rule::int())]
            .into_iter()
            .collect();
        assert!(schema.contains("x"));
        assert!(schema.contains("y"));
        assert!(!schema.contains("z"));
    }
}
