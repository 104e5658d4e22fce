//! The field façade: one column's configuration plus casting.

use crate::descriptor::FieldDescriptor;
use field_constraints::{
    ConstraintEngine, ConstraintName, ConstraintViolation, RawConstraints, TypedConstraints,
};
use field_core::{CastError, ConfigError, FieldOptions, FieldType, FieldValue};
use field_types::{ResolvedFormat, ValueKind};
use std::borrow::Cow;
use std::collections::BTreeSet;
use temporal_format::translate;
use url::Url;

/// Anything that can go wrong while using a field.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    Constraints(#[from] ConstraintViolation),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to parse field descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

/// A configured column.
///
/// The value kind is fixed when the field is built. The native format is
/// derived from the declared one and re-derived whenever the declared format
/// or the notation flag changes.
///
/// Casting takes `&mut self` because a `unique` constraint remembers every
/// value the field has produced. Use one field per worker, or lock it.
#[derive(Debug, Clone)]
pub struct Field {
    descriptor: FieldDescriptor,
    field_type: FieldType,
    kind: ValueKind,
    native_formats: bool,
    format: Option<String>,
    missing_values: Vec<String>,
    resolved: ResolvedFormat,
    engine: ConstraintEngine,
    validated: bool,
}

impl Field {
    /// Build a field from its descriptor.
    ///
    /// Malformed type settings fail here. An empty type tag, a bad format or
    /// an invalid constraint is reported by [`Field::validate`] and on cast.
    pub fn new(descriptor: FieldDescriptor) -> Result<Self, ConfigError> {
        let field_type = descriptor.field_type();
        let settings = descriptor.kind_settings()?;
        descriptor.warn_unused_settings(field_type);
        let kind = ValueKind::new(field_type, &settings);
        Ok(Self::build(descriptor, field_type, kind))
    }

    /// A field of the given type with default settings.
    pub fn for_type(field_type: FieldType, name: impl Into<String>) -> Self {
        let descriptor = FieldDescriptor::new(name, field_type);
        Self::build(descriptor, field_type, ValueKind::for_type(field_type))
    }

    /// Build a field from a JSON descriptor.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let descriptor: FieldDescriptor = serde_json::from_str(json)?;
        Ok(Self::new(descriptor)?)
    }

    fn build(descriptor: FieldDescriptor, field_type: FieldType, kind: ValueKind) -> Self {
        let missing_values = descriptor
            .missing_values
            .clone()
            .unwrap_or_else(|| vec![String::new()]);
        let format = native_format(field_type, descriptor.format.as_deref(), false);
        Self {
            descriptor,
            field_type,
            kind,
            native_formats: false,
            format,
            missing_values,
            resolved: ResolvedFormat::Default,
            engine: ConstraintEngine::new(TypedConstraints::default()),
            validated: false,
        }
    }

    /// Treat the declared format as native notation, skipping translation.
    pub fn with_native_formats(mut self, native_formats: bool) -> Self {
        self.set_native_formats(native_formats);
        self
    }

    /// The descriptor as it should be written back to a schema document.
    ///
    /// `format` is always the declared format, never the translated one.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.descriptor)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Resolve the format and normalize constraints against the field's kind.
    ///
    /// Runs once; later calls return immediately until the format changes.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.validated {
            return Ok(());
        }
        if self.descriptor.has_empty_type() {
            return Err(ConfigError::EmptyType);
        }

        let resolved = self.kind.resolve_format(self.format.as_deref())?;
        let constraints =
            TypedConstraints::validate(&self.descriptor.constraints, &self.kind, &resolved)?;
        self.engine.reconfigure(constraints);
        self.resolved = resolved;
        self.validated = true;

        tracing::debug!(
            field = %self.descriptor.name,
            field_type = %self.field_type,
            format = ?self.format,
            "Validated field"
        );
        Ok(())
    }

    /// Change the declared format; the native format follows.
    pub fn set_format(&mut self, format: Option<String>) {
        self.descriptor.format = format;
        self.rederive_format();
    }

    /// Switch between native and portable notation for the declared format.
    pub fn set_native_formats(&mut self, native_formats: bool) {
        self.native_formats = native_formats;
        self.rederive_format();
    }

    pub fn set_missing_values(&mut self, missing_values: Vec<String>) {
        self.descriptor.missing_values = Some(missing_values.clone());
        self.missing_values = missing_values;
    }

    fn rederive_format(&mut self) {
        self.format = native_format(
            self.field_type,
            self.descriptor.format.as_deref(),
            self.native_formats,
        );
        self.validated = false;
    }

    // ========================================================================
    // Casting
    // ========================================================================

    /// Cast one raw cell value.
    ///
    /// A missing-value sentinel yields `Ok(None)`; with constraints enforced
    /// the absent value is still checked so `required` can fire. Per-call
    /// `options` override the field's type settings for this value only.
    pub fn cast_value(
        &mut self,
        raw: &str,
        enforce_constraints: bool,
        options: &FieldOptions,
    ) -> Result<Option<FieldValue>, FieldError> {
        self.validate()?;
        let name = self.descriptor.name.as_str();

        if self.missing_values.iter().any(|missing| missing == raw) {
            tracing::trace!(field = name, raw, "Missing value");
            if enforce_constraints {
                self.engine
                    .enforce(None, None)
                    .map_err(|violation| violation.with_field(name))?;
            }
            return Ok(None);
        }

        let kind = self.kind.with_options(options)?;
        let value = kind
            .parse(raw, &self.resolved)
            .map_err(|e| e.with_field(name))?;

        if enforce_constraints {
            self.engine
                .enforce(Some(&value), Some(raw))
                .map_err(|violation| violation.with_field(name))?;
        }
        Ok(Some(value))
    }

    /// Cast with constraints enforced and the field's own options.
    pub fn cast(&mut self, raw: &str) -> Result<Option<FieldValue>, FieldError> {
        self.cast_value(raw, true, &FieldOptions::new())
    }

    /// All constraints a value violates, `None` meaning missing.
    ///
    /// Records the value for `unique` like a cast does.
    pub fn check_constraint_violations(
        &mut self,
        value: Option<&FieldValue>,
    ) -> Result<BTreeSet<ConstraintName>, ConfigError> {
        self.validate()?;
        Ok(self.engine.check(value))
    }

    // ========================================================================
    // Formatting and inference
    // ========================================================================

    /// Format a cast value back to text.
    pub fn format_value_as_string(&self, value: &FieldValue) -> Result<String, FieldError> {
        let format = self.current_format()?;
        Ok(self.kind.format(value, &format)?)
    }

    /// Format a cast value for a JSON document.
    pub fn format_value_for_json(&self, value: &FieldValue) -> Result<serde_json::Value, FieldError> {
        let format = self.current_format()?;
        Ok(self.kind.format_for_json(value, &format)?)
    }

    /// Best-effort format of a single sample.
    pub fn infer_format(&self, sample: &str) -> &'static str {
        self.kind.infer_format(sample)
    }

    /// Whether raw text casts and satisfies the field's named format.
    pub fn value_has_valid_format(&self, raw: &str) -> bool {
        let Ok(format) = self.current_format() else {
            return false;
        };
        match self.kind.parse(raw, &format) {
            Ok(value) => self.kind.value_has_valid_format(&value, &format),
            Err(_) => false,
        }
    }

    fn current_format(&self) -> Result<Cow<'_, ResolvedFormat>, ConfigError> {
        if self.validated {
            Ok(Cow::Borrowed(&self.resolved))
        } else {
            self.kind.resolve_format(self.format.as_deref()).map(Cow::Owned)
        }
    }

    /// Equal apart from format, treating empty names and types as wildcards.
    pub fn similar(&self, other: &Field) -> bool {
        let differs = |a: &str, b: &str| !a.is_empty() && !b.is_empty() && a != b;
        if differs(&self.descriptor.name, &other.descriptor.name) {
            return false;
        }
        let own_type = self.descriptor.type_tag.as_deref().unwrap_or_default();
        let other_type = other.descriptor.type_tag.as_deref().unwrap_or_default();
        if differs(own_type, other_type) {
            return false;
        }
        self.descriptor.constraints == other.descriptor.constraints
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The native format used for parsing.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The format as declared.
    pub fn defined_format(&self) -> Option<&str> {
        self.descriptor.format.as_deref()
    }

    pub fn native_formats(&self) -> bool {
        self.native_formats
    }

    pub fn title(&self) -> Option<&str> {
        self.descriptor.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.descriptor.description.as_deref()
    }

    pub fn rdf_type(&self) -> Option<&Url> {
        self.descriptor.rdf_type.as_ref()
    }

    pub fn constraints(&self) -> &RawConstraints {
        &self.descriptor.constraints
    }

    pub fn options(&self) -> &FieldOptions {
        &self.descriptor.options
    }

    pub fn missing_values(&self) -> &[String] {
        &self.missing_values
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Distinct values seen so far by the `unique` constraint.
    pub fn tracked_values(&self) -> usize {
        self.engine.tracked_values()
    }
}

/// The parsing format for a declared one. Only date/time patterns translate.
fn native_format(field_type: FieldType, defined: Option<&str>, native_formats: bool) -> Option<String> {
    match defined {
        Some(format) if !native_formats && field_type.uses_temporal_pattern() => {
            Some(translate(format))
        }
        other => other.map(str::to_string),
    }
}
