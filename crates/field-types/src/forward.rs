//! Forward conversion: FieldValue → text and JSON.

use crate::duration::format_duration;
use crate::infer::{FORMAT_ARRAY, FORMAT_OBJECT};
use crate::kind::{ResolvedFormat, ValueKind};
use crate::number::format_number;
use chrono::SecondsFormat;
use field_core::{CastError, FieldValue, GeoPoint};
use num_bigint::BigInt;
use serde_json::{json, Value};
use temporal_format::NativePattern;

/// Format a value as text.
pub fn format_value(
    kind: &ValueKind,
    value: &FieldValue,
    format: &ResolvedFormat,
) -> Result<String, CastError> {
    match (kind, value) {
        (ValueKind::String, FieldValue::String(s)) | (ValueKind::Any, FieldValue::Any(s)) => {
            Ok(s.clone())
        }
        (ValueKind::Integer { .. }, FieldValue::Integer(i)) => Ok(i.to_string()),
        (ValueKind::Number(options), FieldValue::Number(f)) => Ok(format_number(*f, options)),
        (ValueKind::Boolean(values), FieldValue::Boolean(b)) => Ok(values.format(*b).to_string()),

        (ValueKind::Date, FieldValue::Date(d)) => match format {
            ResolvedFormat::Pattern(pattern) => temporal(value, temporal_format::format(d, pattern)),
            _ => temporal(value, temporal_format::format(d, &NativePattern::iso_date())),
        },
        (ValueKind::Time, FieldValue::Time(t)) => match format {
            ResolvedFormat::Pattern(pattern) => temporal(value, temporal_format::format(t, pattern)),
            _ => temporal(value, temporal_format::format(t, &NativePattern::iso_time())),
        },
        (ValueKind::Datetime, FieldValue::Datetime(dt)) => match format {
            ResolvedFormat::Pattern(pattern) => {
                temporal(value, temporal_format::format(dt, pattern))
            }
            _ => Ok(dt.datetime().to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        },

        (ValueKind::Year, FieldValue::Year(y)) => Ok(y.to_string()),
        (ValueKind::YearMonth, FieldValue::YearMonth(ym)) => Ok(ym.to_string()),
        (ValueKind::Duration, FieldValue::Duration(d)) => Ok(format_duration(d)),

        (ValueKind::Object, FieldValue::Object(map)) => {
            serde_json::to_string(map).map_err(|e| mismatch(kind, value, &e.to_string()))
        }
        (ValueKind::Array, FieldValue::Array(items)) => {
            serde_json::to_string(items).map_err(|e| mismatch(kind, value, &e.to_string()))
        }
        (ValueKind::Geojson, FieldValue::Geojson(doc)) => Ok(doc.to_string()),

        (ValueKind::Geopoint, FieldValue::Geopoint(point)) => Ok(match format.name() {
            Some(FORMAT_ARRAY) | Some(FORMAT_OBJECT) => geopoint_json(point, format).to_string(),
            _ => format!("{}, {}", point.lon, point.lat),
        }),

        _ => Err(mismatch(kind, value, "value does not belong to this field type")),
    }
}

/// Format a value for a JSON document.
///
/// Years, integers that fit 64 bits, finite numbers, booleans and the JSON
/// kinds keep their JSON shape; everything else is emitted as text.
pub fn format_value_for_json(
    kind: &ValueKind,
    value: &FieldValue,
    format: &ResolvedFormat,
) -> Result<Value, CastError> {
    match (kind, value) {
        (ValueKind::Year, FieldValue::Year(y)) => Ok(json!(*y)),
        (ValueKind::Integer { .. }, FieldValue::Integer(i)) => Ok(integer_json(i)),
        (ValueKind::Number(_), FieldValue::Number(f)) if f.is_finite() => Ok(json!(*f)),
        (ValueKind::Boolean(_), FieldValue::Boolean(b)) => Ok(json!(*b)),
        (ValueKind::Object, FieldValue::Object(map)) => Ok(Value::Object(map.clone())),
        (ValueKind::Array, FieldValue::Array(items)) => Ok(Value::Array(items.clone())),
        (ValueKind::Geojson, FieldValue::Geojson(doc)) => Ok(doc.clone()),
        (ValueKind::Geopoint, FieldValue::Geopoint(point)) if !format.is_default() => {
            Ok(geopoint_json(point, format))
        }
        _ => format_value(kind, value, format).map(Value::String),
    }
}

fn integer_json(value: &BigInt) -> Value {
    match i64::try_from(value) {
        Ok(small) => json!(small),
        Err(_) => Value::String(value.to_string()),
    }
}

fn geopoint_json(point: &GeoPoint, format: &ResolvedFormat) -> Value {
    match format.name() {
        Some(FORMAT_OBJECT) => json!({"lon": point.lon, "lat": point.lat}),
        _ => json!([point.lon, point.lat]),
    }
}

fn temporal(
    value: &FieldValue,
    result: Result<String, temporal_format::TemporalError>,
) -> Result<String, CastError> {
    result.map_err(|e| {
        CastError::new(format!("{value:?}"), value.field_type(), e.to_string())
    })
}

fn mismatch(kind: &ValueKind, value: &FieldValue, message: &str) -> CastError {
    CastError::new(format!("{value:?}"), kind.field_type(), message)
}
