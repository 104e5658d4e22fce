//! Constraint violation error.

use crate::name::ConstraintName;
use std::collections::BTreeSet;

/// A cast value that breaks one or more declared constraints.
///
/// Carries every violated constraint, not just the first one found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} violates constraints: {}", subject(.field, .value), names(.violated))]
pub struct ConstraintViolation {
    /// Field name, attached by the field façade
    pub field: Option<String>,
    /// Raw text of the offending value; `None` when the value was missing
    pub value: Option<String>,
    /// The violated constraints
    pub violated: BTreeSet<ConstraintName>,
}

impl ConstraintViolation {
    pub fn new(value: Option<String>, violated: BTreeSet<ConstraintName>) -> Self {
        Self {
            field: None,
            value,
            violated,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn contains(&self, name: ConstraintName) -> bool {
        self.violated.contains(&name)
    }
}

fn subject(field: &Option<String>, value: &Option<String>) -> String {
    let value = match value {
        Some(v) => format!("Value '{v}'"),
        None => "Missing value".to_string(),
    };
    match field {
        Some(name) => format!("{value} of field '{name}'"),
        None => value,
    }
}

fn names(violated: &BTreeSet<ConstraintName>) -> String {
    violated
        .iter()
        .map(ConstraintName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
