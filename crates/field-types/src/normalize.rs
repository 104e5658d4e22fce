//! Constraint value normalization.
//!
//! Bounds and enum members are declared as JSON. They are converted once into
//! the same [`FieldValue`] representation the field produces when casting, so
//! later comparisons never mix declared text with typed values.

use crate::kind::{ResolvedFormat, ValueKind};
use field_core::{ConfigError, FieldValue};
use serde_json::Value;
use std::borrow::Cow;

pub fn normalize_value(
    kind: &ValueKind,
    constraint: &str,
    value: &Value,
    format: &ResolvedFormat,
) -> Result<FieldValue, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidConstraint {
        constraint: constraint.to_string(),
        field_type: kind.field_type(),
        message,
    };

    match (kind, value) {
        (_, Value::Null) => Err(invalid("value must not be null".to_string())),
        (ValueKind::Boolean(_), Value::Bool(b)) => Ok(FieldValue::Boolean(*b)),
        (ValueKind::Number(_), Value::Number(n)) => n
            .as_f64()
            .map(FieldValue::Number)
            .ok_or_else(|| invalid(format!("{n} is not representable as a number"))),
        _ => {
            let text: Cow<'_, str> = match value {
                Value::String(s) => Cow::Borrowed(s),
                other => Cow::Owned(other.to_string()),
            };
            let normalized = kind
                .parse(&text, format)
                .map_err(|e| invalid(e.to_string()))?;
            tracing::debug!(
                constraint,
                field_type = %kind.field_type(),
                declared = %value,
                "Normalized constraint value"
            );
            Ok(normalized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use field_core::FieldType;
    use num_bigint::BigInt;
    use serde_json::json;

    fn normalize(kind: &ValueKind, value: Value) -> Result<FieldValue, ConfigError> {
        normalize_value(kind, "minimum", &value, &ResolvedFormat::Default)
    }

    #[test]
    fn test_normalize_numeric() {
        let integer = ValueKind::for_type(FieldType::Integer);
        assert_eq!(
            normalize(&integer, json!(10)).unwrap(),
            FieldValue::Integer(BigInt::from(10))
        );
        assert_eq!(
            normalize(&integer, json!("10")).unwrap(),
            FieldValue::Integer(BigInt::from(10))
        );
        assert!(matches!(
            normalize(&integer, json!(10.5)),
            Err(ConfigError::InvalidConstraint { .. })
        ));

        let number = ValueKind::for_type(FieldType::Number);
        assert_eq!(normalize(&number, json!(2)).unwrap(), FieldValue::Number(2.0));
        assert_eq!(normalize(&number, json!("2.5")).unwrap(), FieldValue::Number(2.5));
    }

    #[test]
    fn test_normalize_temporal_uses_field_format() {
        let format = ValueKind::Date.resolve_format(Some("dd/MM/yyyy")).unwrap();
        assert_eq!(
            normalize_value(&ValueKind::Date, "maximum", &json!("31/12/2020"), &format).unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap())
        );
        assert!(normalize_value(&ValueKind::Date, "maximum", &json!("2020-12-31"), &format).is_err());

        assert_eq!(
            normalize(&ValueKind::Duration, json!("P1D")).unwrap(),
            FieldValue::Duration(TimeDelta::days(1))
        );
        assert_eq!(normalize(&ValueKind::Year, json!(1999)).unwrap(), FieldValue::Year(1999));
    }

    #[test]
    fn test_normalize_other_kinds() {
        let boolean = ValueKind::for_type(FieldType::Boolean);
        assert_eq!(normalize(&boolean, json!(true)).unwrap(), FieldValue::Boolean(true));
        assert_eq!(normalize(&boolean, json!("FALSE")).unwrap(), FieldValue::Boolean(false));

        assert_eq!(
            normalize(&ValueKind::String, json!(1)).unwrap(),
            FieldValue::String("1".to_string())
        );
        assert_eq!(
            normalize(&ValueKind::Array, json!([1, 2])).unwrap(),
            FieldValue::Array(vec![json!(1), json!(2)])
        );
        assert!(normalize(&ValueKind::String, Value::Null).is_err());
    }
}
