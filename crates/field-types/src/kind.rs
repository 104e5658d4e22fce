//! The closed set of value kinds and their configuration.

use crate::infer::{self, FORMAT_ARRAY, FORMAT_OBJECT, FORMAT_TOPOJSON};
use crate::options::{BooleanValues, KindSettings, NumberOptions};
use crate::{forward, normalize, reverse};
use field_core::{
    CastError, ConfigError, FieldOptions, FieldType, FieldValue, FORMAT_ANY, FORMAT_DEFAULT,
};
use std::borrow::Cow;
use temporal_format::NativePattern;

/// A field type together with its type-specific configuration.
///
/// Only the kinds with options carry data; the rest are plain tags. The
/// variant is fixed for the lifetime of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer { bare_number: bool },
    Number(NumberOptions),
    Boolean(BooleanValues),
    Object,
    Array,
    Date,
    Time,
    Datetime,
    Year,
    YearMonth,
    Duration,
    Geopoint,
    Geojson,
    Any,
}

/// A field format resolved against its kind.
///
/// Date, time and datetime patterns are compiled once here so a malformed
/// pattern is reported as a configuration error before any value is cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFormat {
    /// No format, `default` or `any`
    Default,
    /// A compiled native date/time pattern
    Pattern(NativePattern),
    /// A named format such as `email` or `array`
    Named(String),
}

impl ResolvedFormat {
    /// Format text for diagnostics; `None` for the default.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Pattern(p) => Some(p.as_str()),
            Self::Named(n) => Some(n),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl ValueKind {
    /// Build a kind from a field type and descriptor settings.
    pub fn new(field_type: FieldType, settings: &KindSettings) -> Self {
        match field_type {
            FieldType::String => Self::String,
            FieldType::Integer => Self::Integer {
                bare_number: settings.bare_number.unwrap_or(true),
            },
            FieldType::Number => Self::Number(NumberOptions::from_settings(settings)),
            FieldType::Boolean => Self::Boolean(BooleanValues::from_settings(settings)),
            FieldType::Object => Self::Object,
            FieldType::Array => Self::Array,
            FieldType::Date => Self::Date,
            FieldType::Time => Self::Time,
            FieldType::Datetime => Self::Datetime,
            FieldType::Year => Self::Year,
            FieldType::YearMonth => Self::YearMonth,
            FieldType::Duration => Self::Duration,
            FieldType::Geopoint => Self::Geopoint,
            FieldType::Geojson => Self::Geojson,
            FieldType::Any => Self::Any,
        }
    }

    /// A kind with default settings.
    pub fn for_type(field_type: FieldType) -> Self {
        Self::new(field_type, &KindSettings::default())
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String => FieldType::String,
            Self::Integer { .. } => FieldType::Integer,
            Self::Number(_) => FieldType::Number,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Object => FieldType::Object,
            Self::Array => FieldType::Array,
            Self::Date => FieldType::Date,
            Self::Time => FieldType::Time,
            Self::Datetime => FieldType::Datetime,
            Self::Year => FieldType::Year,
            Self::YearMonth => FieldType::YearMonth,
            Self::Duration => FieldType::Duration,
            Self::Geopoint => FieldType::Geopoint,
            Self::Geojson => FieldType::Geojson,
            Self::Any => FieldType::Any,
        }
    }

    /// Apply per-call options on top of the field's own settings.
    ///
    /// Borrows `self` unchanged when the options hold nothing for this kind.
    pub fn with_options(&self, options: &FieldOptions) -> Result<Cow<'_, ValueKind>, ConfigError> {
        if options.is_empty() {
            return Ok(Cow::Borrowed(self));
        }
        let overrides = KindSettings::from_options(options)?;
        if overrides.is_empty() {
            return Ok(Cow::Borrowed(self));
        }
        Ok(match self {
            Self::Integer { bare_number } => Cow::Owned(Self::Integer {
                bare_number: overrides.bare_number.unwrap_or(*bare_number),
            }),
            Self::Number(opts) => Cow::Owned(Self::Number(opts.overridden(&overrides))),
            Self::Boolean(values) => Cow::Owned(Self::Boolean(values.overridden(&overrides))),
            _ => Cow::Borrowed(self),
        })
    }

    /// Resolve a declared native format for this kind.
    pub fn resolve_format(&self, format: Option<&str>) -> Result<ResolvedFormat, ConfigError> {
        let format = match format {
            None => return Ok(ResolvedFormat::Default),
            Some(f) if f == FORMAT_DEFAULT || f == FORMAT_ANY => {
                return Ok(ResolvedFormat::Default)
            }
            Some(f) => f,
        };

        let invalid = |message: String| ConfigError::InvalidFormat {
            format: format.to_string(),
            field_type: self.field_type(),
            message,
        };

        match self {
            Self::Date | Self::Time | Self::Datetime => {
                let pattern = NativePattern::compile(format).map_err(|e| invalid(e.to_string()))?;
                if !pattern.is_supported() {
                    return Err(invalid("pattern uses an unsupported field".to_string()));
                }
                Ok(ResolvedFormat::Pattern(pattern))
            }
            Self::Geopoint if format != FORMAT_ARRAY && format != FORMAT_OBJECT => Err(invalid(
                "expected 'default', 'array' or 'object'".to_string(),
            )),
            Self::Geojson if format != FORMAT_TOPOJSON => {
                Err(invalid("expected 'default' or 'topojson'".to_string()))
            }
            _ => Ok(ResolvedFormat::Named(format.to_string())),
        }
    }

    /// Cast raw text to a typed value.
    pub fn parse(&self, raw: &str, format: &ResolvedFormat) -> Result<FieldValue, CastError> {
        reverse::parse_value(self, raw, format)
    }

    /// Format a typed value as text; the inverse of [`ValueKind::parse`].
    pub fn format(&self, value: &FieldValue, format: &ResolvedFormat) -> Result<String, CastError> {
        forward::format_value(self, value, format)
    }

    /// Format a typed value for a JSON document.
    pub fn format_for_json(
        &self,
        value: &FieldValue,
        format: &ResolvedFormat,
    ) -> Result<serde_json::Value, CastError> {
        forward::format_value_for_json(self, value, format)
    }

    /// Best-effort format detection from a single sample.
    pub fn infer_format(&self, sample: &str) -> &'static str {
        let inferred = match self {
            Self::String => infer::infer_string_format(sample),
            Self::Geopoint => match serde_json::from_str::<serde_json::Value>(sample.trim()) {
                Ok(serde_json::Value::Array(_)) => Some(FORMAT_ARRAY),
                Ok(serde_json::Value::Object(_)) => Some(FORMAT_OBJECT),
                _ => None,
            },
            Self::Geojson => match serde_json::from_str::<serde_json::Value>(sample) {
                Ok(doc) if doc.get("type").and_then(|t| t.as_str()) == Some("Topology") => {
                    Some(FORMAT_TOPOJSON)
                }
                _ => None,
            },
            _ => None,
        };
        inferred.unwrap_or(FORMAT_DEFAULT)
    }

    /// Whether a cast value satisfies the field's named format.
    ///
    /// Independent of casting: an invalid email still casts as a string.
    pub fn value_has_valid_format(&self, value: &FieldValue, format: &ResolvedFormat) -> bool {
        match (self, value, format) {
            (Self::String, FieldValue::String(text), ResolvedFormat::Named(name)) => {
                infer::string_has_format(text, name)
            }
            _ => true,
        }
    }

    /// Normalize a declared constraint bound or enum member to this kind.
    pub fn normalize_constraint_value(
        &self,
        constraint: &str,
        value: &serde_json::Value,
        format: &ResolvedFormat,
    ) -> Result<FieldValue, ConfigError> {
        normalize::normalize_value(self, constraint, value, format)
    }
}
