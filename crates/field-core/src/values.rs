//! Typed value representations for tableschema.
//!
//! A `FieldValue` is what a field produces after casting a raw text cell.
//! Every variant corresponds to exactly one [`FieldType`], so comparisons
//! between a value and a normalized constraint bound never mix types.

use crate::types::FieldType;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use chrono_tz::Tz;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Calendar year and month.
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    /// Four-digit year
    pub year: i32,
    /// Month, 1 to 12
    pub month: u32,
}

impl YearMonth {
    /// Create a year-month, returning `None` when the month is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude, -180 to 180
    pub lon: f64,
    /// Latitude, -90 to 90
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point, returning `None` when a coordinate is out of range.
    pub fn new(lon: f64, lat: f64) -> Option<Self> {
        let valid = lon.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lon)
            && (-90.0..=90.0).contains(&lat);
        valid.then_some(Self { lon, lat })
    }
}

/// A datetime with its UTC offset and, when the text named one, its zone.
///
/// Two values are equal only when local time, offset and zone all agree, so
/// `10:00+02:00` and `08:00Z` are different values. Use
/// [`ZonedDateTime::cmp_instant`] to order by instant.
#[derive(Debug, Clone, Copy)]
pub struct ZonedDateTime {
    datetime: DateTime<FixedOffset>,
    zone: Option<Tz>,
}

impl ZonedDateTime {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self {
            datetime,
            zone: None,
        }
    }

    /// A datetime read in a named zone; the zone is kept for formatting.
    pub fn in_zone(datetime: DateTime<Tz>) -> Self {
        Self {
            datetime: datetime.fixed_offset(),
            zone: Some(datetime.timezone()),
        }
    }

    pub fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.datetime
    }

    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }

    /// The value in its named zone, if it has one.
    pub fn zoned(&self) -> Option<DateTime<Tz>> {
        self.zone.map(|tz| self.datetime.with_timezone(&tz))
    }

    /// Order by the UTC instant, ignoring offset and zone.
    pub fn cmp_instant(&self, other: &Self) -> Ordering {
        self.datetime.cmp(&other.datetime)
    }

    fn identity(&self) -> (NaiveDateTime, i32, Option<&'static str>) {
        (
            self.datetime.naive_local(),
            self.datetime.offset().local_minus_utc(),
            self.zone.map(|tz| tz.name()),
        )
    }
}

impl From<DateTime<FixedOffset>> for ZonedDateTime {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self::new(datetime)
    }
}

impl PartialEq for ZonedDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ZonedDateTime {}

impl Hash for ZonedDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// A value cast to the representation of its field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    String(String),

    /// Arbitrary-precision integer
    Integer(BigInt),

    /// 64-bit floating point
    Number(f64),

    /// Boolean value
    Boolean(bool),

    /// JSON object
    Object(serde_json::Map<String, serde_json::Value>),

    /// JSON array
    Array(Vec<serde_json::Value>),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Date and time with its UTC offset and optional named zone
    Datetime(ZonedDateTime),

    /// Calendar year
    Year(i32),

    /// Calendar year and month
    YearMonth(YearMonth),

    /// Signed exact duration
    Duration(TimeDelta),

    /// Longitude/latitude pair
    Geopoint(GeoPoint),

    /// GeoJSON or TopoJSON document
    Geojson(serde_json::Value),

    /// Raw text of an untyped field
    Any(String),
}

impl FieldValue {
    /// The field type this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String(_) => FieldType::String,
            Self::Integer(_) => FieldType::Integer,
            Self::Number(_) => FieldType::Number,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Object(_) => FieldType::Object,
            Self::Array(_) => FieldType::Array,
            Self::Date(_) => FieldType::Date,
            Self::Time(_) => FieldType::Time,
            Self::Datetime(_) => FieldType::Datetime,
            Self::Year(_) => FieldType::Year,
            Self::YearMonth(_) => FieldType::YearMonth,
            Self::Duration(_) => FieldType::Duration,
            Self::Geopoint(_) => FieldType::Geopoint,
            Self::Geojson(_) => FieldType::Geojson,
            Self::Any(_) => FieldType::Any,
        }
    }

    /// Text content of string-like values (`String` and `Any`).
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Any(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a datetime.
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Datetime(dt) => Some(dt.datetime()),
            _ => None,
        }
    }

    /// Length used by `minLength`/`maxLength`.
    ///
    /// Character count for text, member count for JSON objects and arrays.
    /// `None` for every other type, which those constraints skip.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::String(s) | Self::Any(s) => Some(s.chars().count()),
            Self::Object(map) => Some(map.len()),
            Self::Array(items) => Some(items.len()),
            Self::Geojson(serde_json::Value::Object(map)) => Some(map.len()),
            Self::Geojson(serde_json::Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    /// Order two values of the same ordered type.
    ///
    /// Integers compare as integers and numbers as floats; the two are never
    /// compared with each other. Returns `None` for mismatched or unordered
    /// types and for NaN.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            (Self::Datetime(a), Self::Datetime(b)) => Some(a.cmp_instant(b)),
            (Self::Year(a), Self::Year(b)) => Some(a.cmp(b)),
            (Self::YearMonth(a), Self::YearMonth(b)) => Some(a.cmp(b)),
            (Self::Duration(a), Self::Duration(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_ordering_and_display() {
        let a = YearMonth::new(2023, 12).unwrap();
        let b = YearMonth::new(2024, 1).unwrap();
        assert!(a < b);
        assert_eq!(a.to_string(), "2023-12");
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn test_geopoint_ranges() {
        assert!(GeoPoint::new(180.0, -90.0).is_some());
        assert!(GeoPoint::new(180.5, 0.0).is_none());
        assert!(GeoPoint::new(0.0, f64::NAN).is_none());
    }

    #[test]
    fn test_length() {
        assert_eq!(FieldValue::String("héllo".to_string()).length(), Some(5));
        assert_eq!(
            FieldValue::Array(vec![serde_json::json!(1), serde_json::json!(2)]).length(),
            Some(2)
        );
        assert_eq!(FieldValue::Boolean(true).length(), None);
        assert_eq!(FieldValue::Year(2000).length(), None);
    }

    #[test]
    fn test_compare_same_type_only() {
        let one = FieldValue::Integer(BigInt::from(1));
        let two = FieldValue::Integer(BigInt::from(2));
        assert_eq!(one.compare(&two), Some(Ordering::Less));

        let float = FieldValue::Number(1.0);
        assert_eq!(one.compare(&float), None);
        assert_eq!(
            FieldValue::Number(f64::NAN).compare(&FieldValue::Number(1.0)),
            None
        );

        let short = FieldValue::Duration(TimeDelta::minutes(5));
        let long = FieldValue::Duration(TimeDelta::hours(1));
        assert_eq!(long.compare(&short), Some(Ordering::Greater));
    }

    #[test]
    fn test_datetime_identity_keeps_offset() {
        let east = ZonedDateTime::new(DateTime::parse_from_rfc3339("2020-01-01T10:00:00+02:00").unwrap());
        let utc = ZonedDateTime::new(DateTime::parse_from_rfc3339("2020-01-01T08:00:00Z").unwrap());
        assert_ne!(east, utc);
        assert_eq!(east.cmp_instant(&utc), Ordering::Equal);
        assert_eq!(
            FieldValue::Datetime(east).compare(&FieldValue::Datetime(utc)),
            Some(Ordering::Equal)
        );

        let in_gmt = ZonedDateTime::in_zone(utc.datetime().with_timezone(&Tz::GMT));
        assert_ne!(in_gmt, utc);
        assert_eq!(in_gmt.datetime(), utc.datetime());
        assert_eq!(in_gmt.zone(), Some(Tz::GMT));
    }

    #[test]
    fn test_field_type_mapping() {
        assert_eq!(
            FieldValue::YearMonth(YearMonth::new(2020, 2).unwrap()).field_type(),
            FieldType::YearMonth
        );
        assert_eq!(FieldValue::Any("x".into()).field_type(), FieldType::Any);
        assert_eq!(FieldValue::Any("x".into()).as_text(), Some("x"));
    }
}
