//! Field descriptors as they appear in schema documents.

use field_constraints::RawConstraints;
use field_core::{ConfigError, FieldOptions, FieldType};
use field_types::options::{
    single_char, OPTION_BARE_NUMBER, OPTION_DECIMAL_CHAR, OPTION_FALSE_VALUES, OPTION_GROUP_CHAR,
    OPTION_TRUE_VALUES,
};
use field_types::KindSettings;
use serde::{Deserialize, Serialize};
use url::Url;

/// The declarative description of one column.
///
/// `format` holds the format exactly as declared (portable or native
/// notation). Type settings may be given either as top-level keys or inside
/// `options`; top-level keys win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdf_type: Option<Url>,

    #[serde(default, skip_serializing_if = "RawConstraints::is_empty")]
    pub constraints: RawConstraints,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: FieldOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bare_number: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_char: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_char: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_values: Option<Vec<String>>,
}

impl FieldDescriptor {
    /// A descriptor with just a name and a type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            type_tag: Some(field_type.as_str().to_string()),
            ..Default::default()
        }
    }

    /// The declared type. Absent and unknown tags are `Any`.
    pub fn field_type(&self) -> FieldType {
        match self.type_tag.as_deref() {
            None => FieldType::Any,
            Some(tag) => {
                if !tag.is_empty() && !FieldType::is_well_known(tag) {
                    tracing::warn!(field = %self.name, tag, "Unknown field type, using 'any'");
                }
                FieldType::from_tag(tag)
            }
        }
    }

    /// Whether the type tag was declared as an empty string.
    pub fn has_empty_type(&self) -> bool {
        self.type_tag.as_deref().is_some_and(str::is_empty)
    }

    /// Collect type settings from `options` and the top-level keys.
    pub fn kind_settings(&self) -> Result<KindSettings, ConfigError> {
        let mut settings = KindSettings::from_options(&self.options)?;
        if self.bare_number.is_some() {
            settings.bare_number = self.bare_number;
        }
        if let Some(c) = &self.decimal_char {
            settings.decimal_char = Some(single_char(OPTION_DECIMAL_CHAR, c)?);
        }
        if let Some(c) = &self.group_char {
            settings.group_char = Some(single_char(OPTION_GROUP_CHAR, c)?);
        }
        if self.true_values.is_some() {
            settings.true_values = self.true_values.clone();
        }
        if self.false_values.is_some() {
            settings.false_values = self.false_values.clone();
        }
        Ok(settings)
    }

    /// Warn about type settings that the declared type ignores.
    pub(crate) fn warn_unused_settings(&self, field_type: FieldType) {
        let used: &[&str] = match field_type {
            FieldType::Integer => &[OPTION_BARE_NUMBER],
            FieldType::Number => &[OPTION_BARE_NUMBER, OPTION_DECIMAL_CHAR, OPTION_GROUP_CHAR],
            FieldType::Boolean => &[OPTION_TRUE_VALUES, OPTION_FALSE_VALUES],
            _ => &[],
        };
        let declared = [
            (OPTION_BARE_NUMBER, self.bare_number.is_some()),
            (OPTION_DECIMAL_CHAR, self.decimal_char.is_some()),
            (OPTION_GROUP_CHAR, self.group_char.is_some()),
            (OPTION_TRUE_VALUES, self.true_values.is_some()),
            (OPTION_FALSE_VALUES, self.false_values.is_some()),
        ];
        for (option, present) in declared {
            if present && !used.contains(&option) {
                tracing::warn!(field = %self.name, option, %field_type, "Ignoring type setting");
            }
        }
    }
}
