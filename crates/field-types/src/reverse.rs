//! Reverse conversion: raw text → FieldValue.
//!
//! Every failure becomes a [`CastError`] carrying the raw text, the field
//! type and the format in effect. A value that parses but fails the
//! date/time round trip is reported the same way as one that does not parse.

use crate::duration::parse_duration;
use crate::infer::{FORMAT_ARRAY, FORMAT_OBJECT, FORMAT_TOPOJSON};
use crate::kind::{ResolvedFormat, ValueKind};
use crate::number::{parse_integer, parse_number};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use field_core::{CastError, FieldValue, GeoPoint, YearMonth, ZonedDateTime};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use temporal_format::{parse_strict, NativePattern};

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("valid year regex"));

static YEAR_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-(1[0-2]|0[1-9])$").expect("valid year-month regex")
});

static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?(Z|[+-](?:2[0-3]|[01][0-9]):[0-5][0-9])?$",
    )
    .expect("valid datetime regex")
});

/// GeoJSON object types accepted by the default geojson format.
const GEOJSON_TYPES: &[&str] = &[
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
    "Feature",
    "FeatureCollection",
];

/// Parse raw text according to the value kind.
pub fn parse_value(
    kind: &ValueKind,
    raw: &str,
    format: &ResolvedFormat,
) -> Result<FieldValue, CastError> {
    let field_type = kind.field_type();
    let fail = |message: &str| {
        tracing::trace!(value = raw, %field_type, message, "Cast failed");
        CastError::new(raw, field_type, message).with_format(format.name())
    };

    match kind {
        ValueKind::String => Ok(FieldValue::String(raw.to_string())),

        ValueKind::Any => Ok(FieldValue::Any(raw.to_string())),

        ValueKind::Integer { bare_number } => parse_integer(raw, *bare_number)
            .map(FieldValue::Integer)
            .ok_or_else(|| fail("not an integer")),

        ValueKind::Number(options) => parse_number(raw, options)
            .map(FieldValue::Number)
            .ok_or_else(|| fail("not a number")),

        ValueKind::Boolean(values) => values
            .parse(raw)
            .map(FieldValue::Boolean)
            .ok_or_else(|| fail("not one of the declared trueValues or falseValues")),

        ValueKind::Date => {
            let date = match format {
                ResolvedFormat::Pattern(pattern) => parse_strict::<NaiveDate>(raw, pattern),
                _ => parse_strict::<NaiveDate>(raw, &NativePattern::iso_date()),
            };
            date.map(FieldValue::Date)
                .ok_or_else(|| fail("date does not match the pattern"))
        }

        ValueKind::Time => {
            let time = match format {
                ResolvedFormat::Pattern(pattern) => parse_strict::<NaiveTime>(raw, pattern),
                _ => parse_strict::<NaiveTime>(raw, &NativePattern::iso_time()),
            };
            time.map(FieldValue::Time)
                .ok_or_else(|| fail("time does not match the pattern"))
        }

        ValueKind::Datetime => {
            let datetime = match format {
                ResolvedFormat::Pattern(pattern) => parse_strict(raw, pattern),
                _ => parse_iso_datetime(raw).map(ZonedDateTime::new),
            };
            datetime
                .map(FieldValue::Datetime)
                .ok_or_else(|| fail("datetime does not match the pattern"))
        }

        ValueKind::Year => {
            if !YEAR_RE.is_match(raw) {
                return Err(fail("expected a four-digit year"));
            }
            raw.parse::<i32>()
                .map(FieldValue::Year)
                .map_err(|e| fail(&e.to_string()))
        }

        ValueKind::YearMonth => {
            let caps = YEAR_MONTH_RE
                .captures(raw)
                .ok_or_else(|| fail("expected YYYY-MM"))?;
            let year = caps[1].parse::<i32>().map_err(|e| fail(&e.to_string()))?;
            let month = caps[2].parse::<u32>().map_err(|e| fail(&e.to_string()))?;
            YearMonth::new(year, month)
                .map(FieldValue::YearMonth)
                .ok_or_else(|| fail("month out of range"))
        }

        ValueKind::Duration => parse_duration(raw)
            .map(FieldValue::Duration)
            .ok_or_else(|| fail("not an ISO 8601 duration")),

        ValueKind::Object => match parse_json(raw) {
            Some(Value::Object(map)) => Ok(FieldValue::Object(map)),
            _ => Err(fail("not a JSON object")),
        },

        ValueKind::Array => match parse_json(raw) {
            Some(Value::Array(items)) => Ok(FieldValue::Array(items)),
            _ => Err(fail("not a JSON array")),
        },

        ValueKind::Geopoint => parse_geopoint(raw, format.name())
            .map(FieldValue::Geopoint)
            .ok_or_else(|| fail("not a valid geopoint")),

        ValueKind::Geojson => {
            let doc = parse_json(raw).ok_or_else(|| fail("not valid JSON"))?;
            let doc_type = doc.get("type").and_then(Value::as_str);
            let valid = match format.name() {
                Some(FORMAT_TOPOJSON) => doc_type == Some("Topology"),
                _ => doc_type.is_some_and(|t| GEOJSON_TYPES.contains(&t)),
            };
            if valid {
                Ok(FieldValue::Geojson(doc))
            } else {
                Err(fail("missing or unknown geometry type"))
            }
        }
    }
}

/// Parse an ISO 8601 datetime. Values without an offset are taken as UTC.
pub fn parse_iso_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let caps = DATETIME_RE.captures(raw)?;
    if caps.get(8).is_some() {
        DateTime::parse_from_rfc3339(raw).ok()
    } else {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    }
}

fn parse_json(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!(error = %e, "Invalid JSON");
            None
        }
    }
}

/// Parse a geopoint in one of the three declared shapes.
fn parse_geopoint(raw: &str, format: Option<&str>) -> Option<GeoPoint> {
    let (lon, lat) = match format {
        Some(FORMAT_ARRAY) => match parse_json(raw)? {
            Value::Array(items) if items.len() == 2 => (coordinate(&items[0])?, coordinate(&items[1])?),
            _ => return None,
        },
        Some(FORMAT_OBJECT) => match parse_json(raw)? {
            Value::Object(map) if map.len() == 2 => {
                (coordinate(map.get("lon")?)?, coordinate(map.get("lat")?)?)
            }
            _ => return None,
        },
        _ => {
            let (lon, lat) = raw.split_once(',')?;
            (lon.trim().parse().ok()?, lat.trim().parse().ok()?)
        }
    };
    GeoPoint::new(lon, lat)
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NumberOptions;
    use chrono::{TimeDelta, Timelike};
    use field_core::FieldType;
    use num_bigint::BigInt;
    use serde_json::json;

    fn parse(kind: &ValueKind, raw: &str) -> Result<FieldValue, CastError> {
        parse_value(kind, raw, &ResolvedFormat::Default)
    }

    fn parse_with(kind: &ValueKind, raw: &str, format: &str) -> Result<FieldValue, CastError> {
        let format = kind.resolve_format(Some(format)).unwrap();
        parse_value(kind, raw, &format)
    }

    #[test]
    fn test_parse_string_and_any() {
        assert_eq!(
            parse(&ValueKind::String, " keep spaces ").unwrap(),
            FieldValue::String(" keep spaces ".to_string())
        );
        assert_eq!(
            parse(&ValueKind::Any, "42").unwrap(),
            FieldValue::Any("42".to_string())
        );
    }

    #[test]
    fn test_parse_integer() {
        let kind = ValueKind::Integer { bare_number: true };
        assert_eq!(
            parse(&kind, "-12").unwrap(),
            FieldValue::Integer(BigInt::from(-12))
        );
        let err = parse(&kind, "12.5").unwrap_err();
        assert_eq!(err.value, "12.5");
        assert_eq!(err.field_type, FieldType::Integer);

        let kind = ValueKind::Integer { bare_number: false };
        assert_eq!(
            parse(&kind, "€ 1200").unwrap(),
            FieldValue::Integer(BigInt::from(1200))
        );
    }

    #[test]
    fn test_parse_number() {
        let kind = ValueKind::Number(NumberOptions::default());
        assert_eq!(parse(&kind, "1.5").unwrap(), FieldValue::Number(1.5));
        assert!(parse(&kind, "one").is_err());
    }

    #[test]
    fn test_parse_boolean() {
        let kind = ValueKind::for_type(FieldType::Boolean);
        assert_eq!(parse(&kind, "TRUE").unwrap(), FieldValue::Boolean(true));
        assert_eq!(parse(&kind, "0").unwrap(), FieldValue::Boolean(false));
        assert!(parse(&kind, "yes").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse(&ValueKind::Date, "2024-02-29").unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(parse(&ValueKind::Date, "2024-2-29").is_err());
        assert!(parse(&ValueKind::Date, "2023-02-29").is_err());

        assert_eq!(
            parse_with(&ValueKind::Date, "2024/02/29", "yyyy/MM/dd").unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        let err = parse_with(&ValueKind::Date, "2023/02/29", "yyyy/MM/dd").unwrap_err();
        assert_eq!(err.format.as_deref(), Some("yyyy/MM/dd"));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse(&ValueKind::Time, "06:30:00").unwrap(),
            FieldValue::Time(NaiveTime::from_hms_opt(6, 30, 0).unwrap())
        );
        assert!(parse(&ValueKind::Time, "6:30:00").is_err());
        assert!(parse_with(&ValueKind::Time, "6:30", "H:mm").is_ok());
    }

    #[test]
    fn test_parse_datetime_default() {
        let value = parse(&ValueKind::Datetime, "2020-01-01T10:00:00Z").unwrap();
        let dt = value.as_datetime().unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.hour(), 10);

        let value = parse(&ValueKind::Datetime, "2020-01-01T10:00:00.250+02:00").unwrap();
        assert_eq!(value.as_datetime().unwrap().offset().local_minus_utc(), 7200);

        let value = parse(&ValueKind::Datetime, "2020-01-01T10:00:00").unwrap();
        assert_eq!(value.as_datetime().unwrap().offset().local_minus_utc(), 0);

        assert!(parse(&ValueKind::Datetime, "2020-01-01 10:00:00").is_err());
        assert!(parse(&ValueKind::Datetime, "2020-02-30T10:00:00Z").is_err());
    }

    #[test]
    fn test_parse_datetime_pattern() {
        let value =
            parse_with(&ValueKind::Datetime, "01/02/2020 10:00 +0100", "dd/MM/yyyy HH:mm Z").unwrap();
        assert_eq!(value.as_datetime().unwrap().offset().local_minus_utc(), 3600);

        let value =
            parse_with(&ValueKind::Datetime, "01/02/2020 10:00 GMT", "dd/MM/yyyy HH:mm zzz").unwrap();
        match value {
            FieldValue::Datetime(dt) => assert_eq!(dt.zone().map(|tz| tz.name()), Some("GMT")),
            other => panic!("expected a datetime, got {other:?}"),
        }
        assert!(parse_with(&ValueKind::Datetime, "01/02/2020 10:00 +00:00", "dd/MM/yyyy HH:mm zzz").is_err());
    }

    #[test]
    fn test_parse_year_and_year_month() {
        assert_eq!(parse(&ValueKind::Year, "1999").unwrap(), FieldValue::Year(1999));
        assert!(parse(&ValueKind::Year, "99").is_err());
        assert!(parse(&ValueKind::Year, "19999").is_err());
        assert!(parse(&ValueKind::Year, "+999").is_err());

        assert_eq!(
            parse(&ValueKind::YearMonth, "2020-07").unwrap(),
            FieldValue::YearMonth(YearMonth::new(2020, 7).unwrap())
        );
        assert!(parse(&ValueKind::YearMonth, "2020-7").is_err());
        assert!(parse(&ValueKind::YearMonth, "2020-13").is_err());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            parse(&ValueKind::Duration, "P1DT2H").unwrap(),
            FieldValue::Duration(TimeDelta::hours(26))
        );
        assert!(parse(&ValueKind::Duration, "P1Y").is_err());
    }

    #[test]
    fn test_parse_object_and_array() {
        assert_eq!(
            parse(&ValueKind::Object, r#"{"a": 1}"#).unwrap(),
            FieldValue::Object(json!({"a": 1}).as_object().unwrap().clone())
        );
        assert!(parse(&ValueKind::Object, "[1]").is_err());
        assert_eq!(
            parse(&ValueKind::Array, "[1, \"two\"]").unwrap(),
            FieldValue::Array(vec![json!(1), json!("two")])
        );
        assert!(parse(&ValueKind::Array, "{}").is_err());
    }

    #[test]
    fn test_parse_geopoint() {
        let point = GeoPoint::new(90.5, 45.0).unwrap();
        assert_eq!(
            parse(&ValueKind::Geopoint, "90.5, 45").unwrap(),
            FieldValue::Geopoint(point)
        );
        assert_eq!(
            parse_with(&ValueKind::Geopoint, "[90.5, 45]", "array").unwrap(),
            FieldValue::Geopoint(point)
        );
        assert_eq!(
            parse_with(&ValueKind::Geopoint, r#"{"lon": 90.5, "lat": 45}"#, "object").unwrap(),
            FieldValue::Geopoint(point)
        );
        assert!(parse(&ValueKind::Geopoint, "200, 45").is_err());
        assert!(parse(&ValueKind::Geopoint, "90.5").is_err());
        assert!(parse_with(&ValueKind::Geopoint, "[1, 2, 3]", "array").is_err());
    }

    #[test]
    fn test_parse_geojson() {
        assert!(parse(&ValueKind::Geojson, r#"{"type": "Point", "coordinates": [1, 2]}"#).is_ok());
        assert!(parse(&ValueKind::Geojson, r#"{"type": "Circle"}"#).is_err());
        assert!(parse(&ValueKind::Geojson, "[]").is_err());
        assert!(
            parse_with(&ValueKind::Geojson, r#"{"type": "Topology", "objects": {}}"#, "topojson")
                .is_ok()
        );
        assert!(parse_with(&ValueKind::Geojson, r#"{"type": "Point"}"#, "topojson").is_err());
    }
}
