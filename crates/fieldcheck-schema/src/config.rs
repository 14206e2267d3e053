//! # Engine Configuration
//!
//! Policy knobs shared by data validation and schema self-validation.
//! Loaded by the caller from its own configuration source; every field
//! defaults to the strict behavior.

use fieldcheck_core::IntegerPolicy;
use serde::{Deserialize, Serialize};

/// Validation policy.
///
/// ```
/// use fieldcheck_schema::ValidatorConfig;
/// use fieldcheck_core::IntegerPolicy;
///
/// let config: ValidatorConfig =
///     serde_json::from_str(r#"{"integer_policy": "allow_integral_float", "max_depth": 8}"#).unwrap();
/// assert_eq!(config.integer_policy, IntegerPolicy::AllowIntegralFloat);
/// assert_eq!(config.max_depth, Some(8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Whether an integral float satisfies a declared `int`. Strict by default.
    pub integer_policy: IntegerPolicy,
    /// Maximum schema nesting depth accepted by schema self-validation.
    /// `None` imposes no limit.
    pub max_depth: Option<usize>,
}

impl ValidatorConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn with_integer_policy(mut self, policy: IntegerPolicy) -> Self {
        self.integer_policy = policy;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_strict() {
        let config: ValidatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ValidatorConfig::strict());
        assert_eq!(config.integer_policy, IntegerPolicy::Strict);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<ValidatorConfig, _> = serde_json::from_str(r#"{"lenient": true}"#);
        assert!(result.is_err());
    }
}
