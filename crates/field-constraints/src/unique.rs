//! Per-field uniqueness bookkeeping.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use field_core::{FieldValue, YearMonth, ZonedDateTime};
use num_bigint::BigInt;
use std::collections::HashSet;

/// Hashable identity of a cast value.
///
/// Numbers are keyed by their bit pattern with `-0.0` folded into `0.0` and
/// every NaN folded into one; JSON trees by their serialized text.
/// Datetimes are keyed by local time, offset and zone, so one instant written
/// with two offsets gives two keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UniqueKey {
    Text(String),
    Integer(BigInt),
    Number(u64),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Datetime(ZonedDateTime),
    Year(i32),
    YearMonth(YearMonth),
    Duration(TimeDelta),
    Geopoint(u64, u64),
    Json(String),
}

impl From<&FieldValue> for UniqueKey {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::String(s) | FieldValue::Any(s) => Self::Text(s.clone()),
            FieldValue::Integer(i) => Self::Integer(i.clone()),
            FieldValue::Number(f) => Self::Number(float_key(*f)),
            FieldValue::Boolean(b) => Self::Boolean(*b),
            FieldValue::Date(d) => Self::Date(*d),
            FieldValue::Time(t) => Self::Time(*t),
            FieldValue::Datetime(dt) => Self::Datetime(*dt),
            FieldValue::Year(y) => Self::Year(*y),
            FieldValue::YearMonth(ym) => Self::YearMonth(*ym),
            FieldValue::Duration(d) => Self::Duration(*d),
            FieldValue::Geopoint(p) => Self::Geopoint(float_key(p.lon), float_key(p.lat)),
            FieldValue::Object(map) => Self::Json(serde_json::Value::Object(map.clone()).to_string()),
            FieldValue::Array(items) => Self::Json(serde_json::Value::Array(items.clone()).to_string()),
            FieldValue::Geojson(doc) => Self::Json(doc.to_string()),
        }
    }
}

fn float_key(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}

/// The set of values a field has already produced.
///
/// Grows for the lifetime of its field and never shrinks. Owned by one
/// field's constraint engine and not shared.
#[derive(Debug, Clone, Default)]
pub struct UniquenessTracker {
    seen: HashSet<UniqueKey>,
}

impl UniquenessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value; returns `false` if it was already seen.
    pub fn insert(&mut self, value: &FieldValue) -> bool {
        self.seen.insert(UniqueKey::from(value))
    }

    pub fn contains(&self, value: &FieldValue) -> bool {
        self.seen.contains(&UniqueKey::from(value))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
