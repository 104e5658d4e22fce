//! Error types shared by the field crates.

use crate::types::FieldType;

/// A raw text value that cannot be interpreted as the declared field type.
///
/// Malformed syntax, a wrong digit count and a failed date/time round trip all
/// produce the same error; callers never need to tell them apart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "Failed to cast '{value}' to {field_type}{}{}: {message}",
    format_suffix(.format),
    field_suffix(.field)
)]
pub struct CastError {
    /// The offending raw text
    pub value: String,
    /// Declared field type
    pub field_type: FieldType,
    /// Native format in effect, if any
    pub format: Option<String>,
    /// Field name, attached by the field façade
    pub field: Option<String>,
    /// What went wrong
    pub message: String,
}

impl CastError {
    /// Create a new cast error without field context.
    pub fn new(value: impl Into<String>, field_type: FieldType, message: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            field_type,
            format: None,
            field: None,
            message: message.into(),
        }
    }

    /// Attach the format that was in effect.
    pub fn with_format(mut self, format: Option<&str>) -> Self {
        self.format = format.map(str::to_string);
        self
    }

    /// Attach the field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

fn format_suffix(format: &Option<String>) -> String {
    match format {
        Some(f) => format!(" with format '{f}'"),
        None => String::new(),
    }
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" for field '{name}'"),
        None => String::new(),
    }
}

/// The field definition itself is invalid.
///
/// Unlike [`CastError`], this is not about one cell: the schema needs fixing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The descriptor declared an empty type tag
    #[error("Property 'type' must not be empty")]
    EmptyType,

    /// A constraint value could not be normalized to the field type
    #[error("Invalid '{constraint}' constraint for {field_type} field: {message}")]
    InvalidConstraint {
        constraint: String,
        field_type: FieldType,
        message: String,
    },

    /// A constraint was declared on a type it cannot apply to
    #[error("Constraint '{constraint}' is not supported for {field_type} fields")]
    UnsupportedConstraint {
        constraint: String,
        field_type: FieldType,
    },

    /// A date/time format could not be compiled
    #[error("Invalid format '{format}' for {field_type} field: {message}")]
    InvalidFormat {
        format: String,
        field_type: FieldType,
        message: String,
    },

    /// A type option has the wrong shape
    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_error_display() {
        let err = CastError::new("yes", FieldType::Boolean, "not a boolean literal");
        assert_eq!(
            err.to_string(),
            "Failed to cast 'yes' to boolean: not a boolean literal"
        );

        let err = CastError::new("2023/02/29", FieldType::Date, "round trip failed")
            .with_format(Some("yyyy/MM/dd"))
            .with_field("born");
        assert_eq!(
            err.to_string(),
            "Failed to cast '2023/02/29' to date with format 'yyyy/MM/dd' for field 'born': round trip failed"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnsupportedConstraint {
            constraint: "minimum".to_string(),
            field_type: FieldType::Boolean,
        };
        assert_eq!(
            err.to_string(),
            "Constraint 'minimum' is not supported for boolean fields"
        );
    }
}
