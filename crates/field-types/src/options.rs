//! Type options for numeric and boolean fields.
//!
//! Options come from two places: the field descriptor (stored in a
//! [`KindSettings`] when the kind is built) and the per-call options map
//! passed to a cast. Per-call entries override the descriptor.

use field_core::{ConfigError, FieldOptions};
use serde_json::Value;

pub const OPTION_BARE_NUMBER: &str = "bareNumber";
pub const OPTION_DECIMAL_CHAR: &str = "decimalChar";
pub const OPTION_GROUP_CHAR: &str = "groupChar";
pub const OPTION_TRUE_VALUES: &str = "trueValues";
pub const OPTION_FALSE_VALUES: &str = "falseValues";

/// Literals accepted as `true` when a field declares none.
pub const DEFAULT_TRUE_VALUES: &[&str] = &["true", "True", "TRUE", "1"];

/// Literals accepted as `false` when a field declares none.
pub const DEFAULT_FALSE_VALUES: &[&str] = &["false", "False", "FALSE", "0"];

/// Descriptor-level settings that configure a value kind.
///
/// Every entry is optional; unset entries fall back to the type defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindSettings {
    pub bare_number: Option<bool>,
    pub decimal_char: Option<char>,
    pub group_char: Option<char>,
    pub true_values: Option<Vec<String>>,
    pub false_values: Option<Vec<String>>,
}

impl KindSettings {
    /// Read settings from an options map, ignoring keys that are not type options.
    pub fn from_options(options: &FieldOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            bare_number: read_bool(options, OPTION_BARE_NUMBER)?,
            decimal_char: read_char(options, OPTION_DECIMAL_CHAR)?,
            group_char: read_char(options, OPTION_GROUP_CHAR)?,
            true_values: read_strings(options, OPTION_TRUE_VALUES)?,
            false_values: read_strings(options, OPTION_FALSE_VALUES)?,
        })
    }

    /// Whether no setting is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Number parsing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberOptions {
    /// When false, leading and trailing decoration such as currency symbols is stripped
    pub bare_number: bool,
    /// Decimal separator
    pub decimal_char: char,
    /// Thousands separator, removed before parsing
    pub group_char: Option<char>,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            bare_number: true,
            decimal_char: '.',
            group_char: None,
        }
    }
}

impl NumberOptions {
    pub fn from_settings(settings: &KindSettings) -> Self {
        let defaults = Self::default();
        Self {
            bare_number: settings.bare_number.unwrap_or(defaults.bare_number),
            decimal_char: settings.decimal_char.unwrap_or(defaults.decimal_char),
            group_char: settings.group_char.or(defaults.group_char),
        }
    }

    /// Apply set entries of `overrides` on top of these options.
    pub fn overridden(&self, overrides: &KindSettings) -> Self {
        Self {
            bare_number: overrides.bare_number.unwrap_or(self.bare_number),
            decimal_char: overrides.decimal_char.unwrap_or(self.decimal_char),
            group_char: overrides.group_char.or(self.group_char),
        }
    }
}

/// The literal lists a boolean field accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanValues {
    pub true_values: Vec<String>,
    pub false_values: Vec<String>,
}

impl Default for BooleanValues {
    fn default() -> Self {
        Self {
            true_values: to_owned_list(DEFAULT_TRUE_VALUES),
            false_values: to_owned_list(DEFAULT_FALSE_VALUES),
        }
    }
}

impl BooleanValues {
    /// Build from settings. An empty list counts as unset.
    pub fn from_settings(settings: &KindSettings) -> Self {
        Self::default().overridden(settings)
    }

    pub fn overridden(&self, overrides: &KindSettings) -> Self {
        let pick = |list: &Option<Vec<String>>, current: &Vec<String>| match list {
            Some(values) if !values.is_empty() => values.clone(),
            _ => current.clone(),
        };
        Self {
            true_values: pick(&overrides.true_values, &self.true_values),
            false_values: pick(&overrides.false_values, &self.false_values),
        }
    }

    /// Exact, case-sensitive lookup of a literal.
    pub fn parse(&self, value: &str) -> Option<bool> {
        if self.true_values.iter().any(|v| v == value) {
            Some(true)
        } else if self.false_values.iter().any(|v| v == value) {
            Some(false)
        } else {
            None
        }
    }

    /// The first declared literal for `value`.
    pub fn format(&self, value: bool) -> &str {
        let (list, fallback) = if value {
            (&self.true_values, DEFAULT_TRUE_VALUES[0])
        } else {
            (&self.false_values, DEFAULT_FALSE_VALUES[0])
        };
        list.first().map(String::as_str).unwrap_or(fallback)
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn read_bool(options: &FieldOptions, key: &str) -> Result<Option<bool>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) if s == "true" => Ok(Some(true)),
        Some(Value::String(s)) if s == "false" => Ok(Some(false)),
        Some(other) => Err(ConfigError::InvalidOption {
            option: key.to_string(),
            message: format!("expected a boolean, got {other}"),
        }),
    }
}

fn read_char(options: &FieldOptions, key: &str) -> Result<Option<char>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => single_char(key, s).map(Some),
        Some(other) => Err(ConfigError::InvalidOption {
            option: key.to_string(),
            message: format!("expected a single character, got {other}"),
        }),
    }
}

fn read_strings(options: &FieldOptions, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ConfigError::InvalidOption {
                    option: key.to_string(),
                    message: format!("expected a list of strings, found {other}"),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(ConfigError::InvalidOption {
            option: key.to_string(),
            message: format!("expected a list of strings, got {other}"),
        }),
    }
}

/// Interpret a separator option, which must be exactly one character.
pub fn single_char(option: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidOption {
            option: option.to_string(),
            message: format!("expected a single character, got '{value}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> FieldOptions {
        match value {
            Value::Object(map) => map,
            _ => panic!("options must be an object"),
        }
    }

    #[test]
    fn test_kind_settings_from_options() {
        let settings = KindSettings::from_options(&options(json!({
            "bareNumber": false,
            "decimalChar": ",",
            "groupChar": ".",
            "trueValues": ["Y"],
            "unrelated": 42
        })))
        .unwrap();

        assert_eq!(settings.bare_number, Some(false));
        assert_eq!(settings.decimal_char, Some(','));
        assert_eq!(settings.group_char, Some('.'));
        assert_eq!(settings.true_values, Some(vec!["Y".to_string()]));
        assert_eq!(settings.false_values, None);
        assert!(!settings.is_empty());
        assert!(KindSettings::default().is_empty());
    }

    #[test]
    fn test_kind_settings_rejects_bad_shapes() {
        assert!(matches!(
            KindSettings::from_options(&options(json!({"decimalChar": ",,"}))),
            Err(ConfigError::InvalidOption { .. })
        ));
        assert!(matches!(
            KindSettings::from_options(&options(json!({"trueValues": "yes"}))),
            Err(ConfigError::InvalidOption { .. })
        ));
        assert!(matches!(
            KindSettings::from_options(&options(json!({"bareNumber": 1}))),
            Err(ConfigError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_number_options_override() {
        let base = NumberOptions::from_settings(&KindSettings {
            group_char: Some(','),
            ..Default::default()
        });
        assert!(base.bare_number);
        assert_eq!(base.group_char, Some(','));

        let call = base.overridden(&KindSettings {
            bare_number: Some(false),
            ..Default::default()
        });
        assert!(!call.bare_number);
        assert_eq!(call.group_char, Some(','));
        assert_eq!(call.decimal_char, '.');
    }

    #[test]
    fn test_boolean_values() {
        let values = BooleanValues::default();
        assert_eq!(values.parse("TRUE"), Some(true));
        assert_eq!(values.parse("0"), Some(false));
        assert_eq!(values.parse("yes"), None);
        assert_eq!(values.parse("tRUE"), None);
        assert_eq!(values.format(true), "true");

        let custom = values.overridden(&KindSettings {
            true_values: Some(vec!["Y".to_string(), "yes".to_string()]),
            false_values: Some(vec![]),
            ..Default::default()
        });
        assert_eq!(custom.parse("yes"), Some(true));
        assert_eq!(custom.parse("true"), None);
        assert_eq!(custom.parse("FALSE"), Some(false));
        assert_eq!(custom.format(true), "Y");
        assert_eq!(custom.format(false), "false");
    }
}
