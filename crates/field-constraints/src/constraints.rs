//! Declared and normalized constraint sets.
//!
//! Constraints go through two phases. [`RawConstraints`] is the map as
//! declared in the field descriptor. [`TypedConstraints::validate`] turns it
//! into a [`TypedConstraints`] whose bounds and enum members are already
//! values of the field's kind, and whose pattern is compiled.

use crate::name::ConstraintName;
use field_core::{ConfigError, FieldType, FieldValue};
use field_types::{ResolvedFormat, ValueKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Constraints as declared: constraint key → JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConstraints(Map<String, Value>);

impl RawConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: ConstraintName) -> Option<&Value> {
        self.0.get(name.as_str())
    }

    pub fn insert(&mut self, name: ConstraintName, value: Value) {
        self.0.insert(name.as_str().to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawConstraints {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A compiled `pattern` constraint, anchored to match the whole value.
#[derive(Debug, Clone)]
pub struct ValuePattern {
    source: String,
    regex: Regex,
}

impl ValuePattern {
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as declared, without anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for ValuePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Constraints normalized to one field's kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedConstraints {
    pub required: bool,
    pub unique: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<FieldValue>,
    pub maximum: Option<FieldValue>,
    pub pattern: Option<ValuePattern>,
    pub enumeration: Option<Vec<FieldValue>>,
}

impl TypedConstraints {
    /// Normalize declared constraints against a kind and its resolved format.
    ///
    /// Unknown keys are ignored with a warning. A constraint that does not
    /// apply to the kind, or whose value cannot be normalized, is an error.
    pub fn validate(
        raw: &RawConstraints,
        kind: &ValueKind,
        format: &ResolvedFormat,
    ) -> Result<Self, ConfigError> {
        let field_type = kind.field_type();
        let mut typed = Self::default();

        for (key, value) in raw.as_map() {
            let Some(name) = ConstraintName::from_name(key) else {
                tracing::warn!(constraint = key.as_str(), %field_type, "Ignoring unknown constraint");
                continue;
            };

            if !supports(field_type, name) {
                return Err(ConfigError::UnsupportedConstraint {
                    constraint: name.to_string(),
                    field_type,
                });
            }

            let invalid = |message: &str| ConfigError::InvalidConstraint {
                constraint: name.to_string(),
                field_type,
                message: message.to_string(),
            };

            match name {
                ConstraintName::Required => {
                    typed.required = as_flag(value).ok_or_else(|| invalid("expected a boolean"))?;
                }
                ConstraintName::Unique => {
                    typed.unique = as_flag(value).ok_or_else(|| invalid("expected a boolean"))?;
                }
                ConstraintName::MinLength => {
                    typed.min_length = Some(
                        as_length(value).ok_or_else(|| invalid("expected a non-negative integer"))?,
                    );
                }
                ConstraintName::MaxLength => {
                    typed.max_length = Some(
                        as_length(value).ok_or_else(|| invalid("expected a non-negative integer"))?,
                    );
                }
                ConstraintName::Minimum => {
                    typed.minimum = Some(kind.normalize_constraint_value(key, value, format)?);
                }
                ConstraintName::Maximum => {
                    typed.maximum = Some(kind.normalize_constraint_value(key, value, format)?);
                }
                ConstraintName::Pattern => {
                    let source = value.as_str().ok_or_else(|| invalid("expected a string"))?;
                    let pattern =
                        ValuePattern::compile(source).map_err(|e| invalid(&e.to_string()))?;
                    typed.pattern = Some(pattern);
                }
                ConstraintName::Enum => {
                    let members = value.as_array().ok_or_else(|| invalid("expected a list"))?;
                    let normalized = members
                        .iter()
                        .map(|member| kind.normalize_constraint_value(key, member, format))
                        .collect::<Result<Vec<_>, _>>()?;
                    typed.enumeration = Some(normalized);
                }
            }
        }

        tracing::debug!(%field_type, constraints = raw.as_map().len(), "Validated constraints");
        Ok(typed)
    }

    /// Whether any constraint is in effect.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether a constraint can be declared on a field type.
pub fn supports(field_type: FieldType, name: ConstraintName) -> bool {
    match name {
        ConstraintName::Required
        | ConstraintName::Unique
        | ConstraintName::Pattern
        | ConstraintName::Enum => true,
        ConstraintName::MinLength | ConstraintName::MaxLength => {
            matches!(field_type, FieldType::String | FieldType::Any) || field_type.is_structured()
        }
        ConstraintName::Minimum | ConstraintName::Maximum => field_type.is_ordered(),
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

fn as_length(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
