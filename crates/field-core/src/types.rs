//! Field type tags for tableschema.
//!
//! This module defines `FieldType`, the closed set of column types a field
//! descriptor can declare. The tag carries no configuration; per-type settings
//! (boolean literals, number decoration) live with the value kinds in the
//! `field-types` crate.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared type of a field.
///
/// Tags are the lower-case names used in field descriptors:
///
/// ```json
/// { "name": "born", "type": "date", "format": "%d/%m/%Y" }
/// { "name": "period", "type": "yearmonth" }
/// ```
///
/// Unknown tags resolve to [`FieldType::Any`] instead of failing, so a
/// descriptor written for a newer table schema still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    /// Free text
    String,
    /// Arbitrary-precision integer
    Integer,
    /// Floating point number
    Number,
    /// Boolean from configurable literals
    Boolean,
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Date and time with offset
    Datetime,
    /// Calendar year
    Year,
    /// Calendar year and month
    YearMonth,
    /// Exact duration
    Duration,
    /// Longitude/latitude pair
    Geopoint,
    /// GeoJSON or TopoJSON object
    Geojson,
    /// Untyped value
    Any,
}

impl FieldType {
    /// All field types, in descriptor documentation order.
    pub const ALL: [FieldType; 15] = [
        Self::String,
        Self::Integer,
        Self::Number,
        Self::Boolean,
        Self::Object,
        Self::Array,
        Self::Date,
        Self::Time,
        Self::Datetime,
        Self::Year,
        Self::YearMonth,
        Self::Duration,
        Self::Geopoint,
        Self::Geojson,
        Self::Any,
    ];

    /// The descriptor tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Year => "year",
            Self::YearMonth => "yearmonth",
            Self::Duration => "duration",
            Self::Geopoint => "geopoint",
            Self::Geojson => "geojson",
            Self::Any => "any",
        }
    }

    /// Resolve a descriptor tag. Unknown tags map to `Any`.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .unwrap_or(Self::Any)
    }

    /// Whether `tag` is one of the well-known type names.
    pub fn is_well_known(tag: &str) -> bool {
        Self::ALL.iter().any(|t| t.as_str() == tag)
    }

    /// Check if this type is parsed through a date/time pattern.
    pub fn uses_temporal_pattern(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Datetime)
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::Datetime | Self::Year | Self::YearMonth
        )
    }

    /// Check if this type represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }

    /// Check if values of this type are JSON trees.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Object | Self::Array | Self::Geojson)
    }

    /// Check if `minimum`/`maximum` constraints apply to this type.
    pub fn is_ordered(&self) -> bool {
        self.is_numeric() || self.is_temporal() || matches!(self, Self::Duration)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, Visitor};

        struct FieldTypeVisitor;

        impl<'de> Visitor<'de> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a field type name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(FieldType::from_tag(value))
            }
        }

        deserializer.deserialize_str(FieldTypeVisitor)
    }
}
