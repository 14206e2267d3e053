//! # Constraint Checkers
//!
//! Independent, per-type checkers. Each returns the violations it finds
//! as [`Finding`]s carrying the violation kind, the message key used for
//! override lookup, and the default text. Field paths and overrides are
//! applied by the caller.
//!
//! Bounds are explicit `Option`s: a bound of zero is a real bound, never
//! "unset".

use fieldcheck_core::{extract_float, extract_int, FieldType, Value, ViolationKind};

use crate::messages::MessageKey;
use crate::rule::Rule;

/// One failed constraint, before path and message-override resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: ViolationKind,
    pub key: MessageKey,
    pub message: String,
}

impl Finding {
    pub fn new(kind: ViolationKind, key: MessageKey, message: impl Into<String>) -> Self {
        Self {
            kind,
            key,
            message: message.into(),
        }
    }
}

/// Range-checks a numeric value against `rule.min` / `rule.max`.
///
/// The value is extracted per the declared type (`int` via
/// [`extract_int`], `float` via [`extract_float`]); failure to extract is
/// itself a range violation. At most one finding is returned: the minimum
/// is checked before the maximum. Non-numeric declared types yield `None`.
///
/// Integers are compared against bounds in the `i64` domain, so values
/// beyond 2^53 are not rounded. A non-finite float cannot be ordered
/// against a bound and is reported as uninterpretable whenever the rule
/// carries one.
pub fn check_numeric(value: &Value, rule: &Rule) -> Option<Finding> {
    let declared = rule.declared_type().known()?;
    let extracted = match declared {
        FieldType::Int => extract_int(value).map(Number::Int),
        FieldType::Float => extract_float(value).map(Number::Float),
        _ => return None,
    };
    let uninterpretable = |reason: String| {
        Some(Finding::new(
            ViolationKind::RangeViolation,
            MessageKey::Range,
            format!("Value {value} cannot be interpreted as {declared}: {reason}"),
        ))
    };
    let number = match extracted {
        Ok(number) => number,
        Err(e) => return uninterpretable(e.to_string()),
    };
    let bounded = rule.min_bound().is_some() || rule.max_bound().is_some();
    if bounded && !number.is_finite() {
        return uninterpretable("value is not finite".to_string());
    }

    if let Some(min) = rule.min_bound() {
        if number.is_below(min) {
            return Some(Finding::new(
                ViolationKind::RangeViolation,
                MessageKey::Min,
                format!("Value {number} is less than minimum {min}"),
            ));
        }
    }
    if let Some(max) = rule.max_bound() {
        if number.is_above(max) {
            return Some(Finding::new(
                ViolationKind::RangeViolation,
                MessageKey::Max,
                format!("Value {number} is greater than maximum {max}"),
            ));
        }
    }
    None
}

/// 2^63 as `f64`: the exclusive upper end of the `i64` range.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// A number extracted for range checking, in its declared domain.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(x) => x.is_finite(),
        }
    }

    /// `self < bound`. For an integer, `n < b` iff `n < ceil(b)`.
    fn is_below(self, bound: f64) -> bool {
        match self {
            Number::Float(x) => x < bound,
            Number::Int(n) => {
                let b = bound.ceil();
                if b.is_nan() || b < -I64_END {
                    false
                } else if b >= I64_END {
                    true
                } else {
                    n < b as i64
                }
            }
        }
    }

    /// `self > bound`. For an integer, `n > b` iff `n > floor(b)`.
    fn is_above(self, bound: f64) -> bool {
        match self {
            Number::Float(x) => x > bound,
            Number::Int(n) => {
                let b = bound.floor();
                if b.is_nan() || b >= I64_END {
                    false
                } else if b < -I64_END {
                    true
                } else {
                    n > b as i64
                }
            }
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Checks a string's length (in characters) and pattern.
///
/// Length and pattern are independent: both may be reported. Within the
/// length check the minimum is tested first and at most one length finding
/// is returned. The pattern uses substring-search semantics; a pattern that
/// failed to compile is skipped here (schema self-validation reports it).
pub fn check_string(value: &str, rule: &Rule) -> Vec<Finding> {
    let mut findings = Vec::new();
    let len = value.chars().count();

    let too_short = rule.min_len().filter(|&min| len < min).map(|min| {
        Finding::new(
            ViolationKind::LengthViolation,
            MessageKey::MinLength,
            format!("String length {len} is less than minimum {min}"),
        )
    });
    let too_long = || {
        rule.max_len().filter(|&max| len > max).map(|max| {
            Finding::new(
                ViolationKind::LengthViolation,
                MessageKey::MaxLength,
                format!("String length {len} is greater than maximum {max}"),
            )
        })
    };
    findings.extend(too_short.or_else(too_long));

    if let Some(pattern) = rule.pattern_ref() {
        match pattern.regex() {
            Some(re) if !re.is_match(value) => findings.push(Finding::new(
                ViolationKind::PatternViolation,
                MessageKey::Pattern,
                format!("String does not match pattern '{}'", pattern.source()),
            )),
            Some(_) => {}
            None => tracing::warn!(
                pattern = pattern.source(),
                "skipping pattern that failed to compile"
            ),
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_within_range() {
        let rule = Rule::int().min(18.0).max(99.0);
        assert_eq!(check_numeric(&Value::Int(18), &rule), None);
        assert_eq!(check_numeric(&Value::Int(99), &rule), None);
    }

    #[test]
    fn test_int_below_min() {
        let rule = Rule::int().min(18.0).max(99.0);
        let finding = check_numeric(&Value::Int(17), &rule).unwrap();
        assert_eq!(finding.kind, ViolationKind::RangeViolation);
        assert_eq!(finding.key, MessageKey::Min);
        assert_eq!(finding.message, "Value 17 is less than minimum 18");
    }

    #[test]
    fn test_int_above_max() {
        let rule = Rule::int().max(99.0);
        let finding = check_numeric(&Value::Int(100), &rule).unwrap();
        assert_eq!(finding.key, MessageKey::Max);
        assert_eq!(finding.message, "Value 100 is greater than maximum 99");
    }

    #[test]
    fn test_zero_bounds_are_enforced() {
        let rule = Rule::int().min(0.0);
        assert!(check_numeric(&Value::Int(-1), &rule).is_some());
        assert!(check_numeric(&Value::Int(0), &rule).is_none());

        let rule = Rule::float().max(0.0);
        assert!(check_numeric(&Value::Float(0.5), &rule).is_some());
    }

    #[test]
    fn test_fractional_bound_on_int() {
        let rule = Rule::int().min(17.5);
        assert!(check_numeric(&Value::Int(17), &rule).is_some());
        assert!(check_numeric(&Value::Int(18), &rule).is_none());
    }

    #[test]
    fn test_float_range() {
        let rule = Rule::float().min(0.5).max(1.5);
        assert!(check_numeric(&Value::Float(1.0), &rule).is_none());
        let finding = check_numeric(&Value::Float(2.25), &rule).unwrap();
        assert_eq!(finding.message, "Value 2.25 is greater than maximum 1.5");
    }

    #[test]
    fn test_uncoercible_value_is_range_violation() {
        let rule = Rule::int().min(1.0);
        let finding = check_numeric(&Value::Float(2.5), &rule).unwrap();
        assert_eq!(finding.kind, ViolationKind::RangeViolation);
        assert_eq!(finding.key, MessageKey::Range);
        assert!(finding.message.contains("cannot be interpreted as int"));
    }

    #[test]
    fn test_no_bounds_passes_any_number() {
        assert!(check_numeric(&Value::Int(i64::MIN), &Rule::int()).is_none());
        assert!(check_numeric(&Value::Float(-1e300), &Rule::float()).is_none());
    }

    #[test]
    fn test_large_int_compared_without_rounding() {
        // 2^53 + 1 rounds to 2^53 as f64.
        let rule = Rule::int().max(9_007_199_254_740_992.0);
        let finding = check_numeric(&Value::Int(9_007_199_254_740_993), &rule).unwrap();
        assert_eq!(finding.key, MessageKey::Max);
        assert!(check_numeric(&Value::Int(9_007_199_254_740_992), &rule).is_none());

        let rule = Rule::int().min(9_007_199_254_740_994.0);
        assert!(check_numeric(&Value::Int(9_007_199_254_740_993), &rule).is_some());
    }

    #[test]
    fn test_int_bounds_outside_i64_range() {
        assert!(check_numeric(&Value::Int(i64::MAX), &Rule::int().max(1e19)).is_none());
        assert!(check_numeric(&Value::Int(i64::MAX), &Rule::int().min(1e19)).is_some());
        assert!(check_numeric(&Value::Int(i64::MIN), &Rule::int().min(-1e19)).is_none());
        assert!(check_numeric(&Value::Int(i64::MIN), &Rule::int().max(-1e19)).is_some());
    }

    #[test]
    fn test_non_finite_float_with_bounds_is_range_violation() {
        let rule = Rule::float().min(0.0).max(1.0);
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let finding = check_numeric(&Value::from(x), &rule).unwrap();
            assert_eq!(finding.kind, ViolationKind::RangeViolation);
            assert_eq!(finding.key, MessageKey::Range);
            assert!(finding.message.contains("not finite"));
        }
    }

    #[test]
    fn test_non_finite_float_without_bounds_passes() {
        assert!(check_numeric(&Value::Float(f64::NAN), &Rule::float()).is_none());
        assert!(check_numeric(&Value::Float(f64::INFINITY), &Rule::float()).is_none());
    }

    #[test]
    fn test_non_numeric_rule_is_ignored() {
        assert!(check_numeric(&Value::from("x"), &Rule::string().min(1.0)).is_none());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let rule = Rule::string().min_length(2).max_length(3);
        assert!(check_string("日本", &rule).is_empty());
        assert!(check_string("äöü", &rule).is_empty());
        let findings = check_string("äöüß", &rule);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, MessageKey::MaxLength);
        assert_eq!(findings[0].message, "String length 4 is greater than maximum 3");
    }

    #[test]
    fn test_string_too_short() {
        let findings = check_string("A", &Rule::string().min_length(2));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ViolationKind::LengthViolation);
        assert_eq!(findings[0].message, "String length 1 is less than minimum 2");
    }

    #[test]
    fn test_pattern_is_substring_search() {
        let rule = Rule::string().pattern("[0-9]+");
        assert!(check_string("abc123def", &rule).is_empty());
        let findings = check_string("abcdef", &rule);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ViolationKind::PatternViolation);
    }

    #[test]
    fn test_length_and_pattern_both_reported() {
        let rule = Rule::string().min_length(5).pattern("^[0-9]+$");
        let findings = check_string("ab", &rule);
        let kinds: Vec<ViolationKind> = findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::LengthViolation, ViolationKind::PatternViolation]
        );
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let rule = Rule::string().pattern("([unclosed");
        assert!(check_string("anything", &rule).is_empty());
    }
}
