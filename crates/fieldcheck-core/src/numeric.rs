//! # Numeric Coercion
//!
//! Extracts an integer or floating value from a [`Value`] for range
//! checking. These rules are intentionally looser than type identity: a
//! declared `int` field only reaches range checking once the Type Matcher
//! has accepted it, but the coercion itself tolerates any value that
//! denotes an integer exactly.
//!
//! | Input              | `extract_int`          | `extract_float` |
//! |--------------------|------------------------|-----------------|
//! | `Int(n)`           | `n`                    | `n as f64`      |
//! | `Float(x)`, whole  | `x as i64` (if in range)| `x`            |
//! | `Float(x)`, fraction | fails                | `x`             |
//! | anything else      | fails                  | fails           |

use crate::error::CoercionError;
use crate::value::Value;

/// Smallest `f64` that no longer fits in `i64` (2^63).
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

/// Extracts a 64-bit integer.
///
/// Succeeds for [`Value::Int`] and for a finite [`Value::Float`] whose
/// fractional part is exactly zero and whose magnitude fits in `i64`.
pub fn extract_int(value: &Value) -> Result<i64, CoercionError> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Float(x) if is_integral(*x) => Ok(*x as i64),
        Value::Float(x) => Err(CoercionError::NotIntegral(*x)),
        other => Err(CoercionError::NotNumeric {
            target: "integer",
            found: other.type_name(),
        }),
    }
}

/// Extracts a 64-bit float. Succeeds for [`Value::Int`] and [`Value::Float`].
pub fn extract_float(value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(x) => Ok(*x),
        other => Err(CoercionError::NotNumeric {
            target: "float",
            found: other.type_name(),
        }),
    }
}

/// True when `x` equals its truncation and is representable as `i64`.
pub fn is_integral(x: f64) -> bool {
    x.is_finite() && x.trunc() == x && x >= -I64_UPPER_EXCLUSIVE && x < I64_UPPER_EXCLUSIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_int_from_int() {
        assert_eq!(extract_int(&Value::Int(42)).unwrap(), 42);
        assert_eq!(extract_int(&Value::Int(i64::MAX)).unwrap(), i64::MAX);
        assert_eq!(extract_int(&Value::Int(i64::MIN)).unwrap(), i64::MIN);
    }

    #[test]
    fn test_extract_int_from_whole_float() {
        assert_eq!(extract_int(&Value::Float(100.0)).unwrap(), 100);
        assert_eq!(extract_int(&Value::Float(-3.0)).unwrap(), -3);
        assert_eq!(extract_int(&Value::Float(0.0)).unwrap(), 0);
    }

    #[test]
    fn test_extract_int_rejects_fractional_float() {
        let err = extract_int(&Value::Float(100.5)).unwrap_err();
        assert!(matches!(err, CoercionError::NotIntegral(x) if x == 100.5));
    }

    #[test]
    fn test_extract_int_rejects_non_finite_and_out_of_range() {
        assert!(extract_int(&Value::Float(f64::NAN)).is_err());
        assert!(extract_int(&Value::Float(f64::INFINITY)).is_err());
        assert!(extract_int(&Value::Float(1e19)).is_err());
        assert!(extract_int(&Value::Float(-1e19)).is_err());
    }

    #[test]
    fn test_extract_int_rejects_non_numeric() {
        for value in [
            Value::from("42"),
            Value::Bool(true),
            Value::Null,
            Value::List(vec![]),
        ] {
            let err = extract_int(&value).unwrap_err();
            assert!(
                matches!(err, CoercionError::NotNumeric { target: "integer", .. }),
                "unexpected error for {value:?}: {err}"
            );
        }
    }

    #[test]
    fn test_extract_float() {
        assert_eq!(extract_float(&Value::Float(3.14159)).unwrap(), 3.14159);
        assert_eq!(extract_float(&Value::Int(42)).unwrap(), 42.0);
        assert!(extract_float(&Value::from("3.14")).is_err());
        assert!(extract_float(&Value::Bool(true)).is_err());
        assert!(extract_float(&Value::Null).is_err());
    }

    #[test]
    fn test_error_message_names_found_type() {
        let err = extract_float(&Value::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "cannot interpret string as float");
    }
}
