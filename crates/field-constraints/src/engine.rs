//! Constraint checking.

use crate::constraints::TypedConstraints;
use crate::error::ConstraintViolation;
use crate::name::ConstraintName;
use crate::unique::UniquenessTracker;
use field_core::FieldValue;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Checks cast values against one field's constraints.
///
/// Every constraint is evaluated on every call and all violations are
/// reported together. Only `unique` keeps state: the tracker is created on
/// the first non-null value and lives as long as the engine.
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    constraints: TypedConstraints,
    tracker: Option<UniquenessTracker>,
}

impl ConstraintEngine {
    pub fn new(constraints: TypedConstraints) -> Self {
        Self {
            constraints,
            tracker: None,
        }
    }

    /// Swap in re-normalized constraints, keeping values already seen.
    pub fn reconfigure(&mut self, constraints: TypedConstraints) {
        self.constraints = constraints;
    }

    pub fn constraints(&self) -> &TypedConstraints {
        &self.constraints
    }

    /// Number of distinct values recorded for `unique`.
    pub fn tracked_values(&self) -> usize {
        self.tracker.as_ref().map_or(0, UniquenessTracker::len)
    }

    /// Evaluate all constraints against a value, `None` meaning missing.
    pub fn check(&mut self, value: Option<&FieldValue>) -> BTreeSet<ConstraintName> {
        let c = &self.constraints;
        let mut violated = BTreeSet::new();

        let Some(value) = value else {
            if c.required {
                violated.insert(ConstraintName::Required);
            }
            return violated;
        };

        if let Some(len) = value.length() {
            if c.min_length.is_some_and(|min| len < min) {
                violated.insert(ConstraintName::MinLength);
            }
            if c.max_length.is_some_and(|max| len > max) {
                violated.insert(ConstraintName::MaxLength);
            }
        }

        if let Some(min) = &c.minimum {
            if value.compare(min) == Some(Ordering::Less) {
                violated.insert(ConstraintName::Minimum);
            }
        }
        if let Some(max) = &c.maximum {
            if value.compare(max) == Some(Ordering::Greater) {
                violated.insert(ConstraintName::Maximum);
            }
        }

        if let Some(pattern) = &c.pattern {
            let matches = value
                .as_text()
                .is_some_and(|text| pattern.is_full_match(text));
            if !matches {
                violated.insert(ConstraintName::Pattern);
            }
        }

        if let Some(members) = &c.enumeration {
            if !members.iter().any(|member| enum_matches(member, value)) {
                violated.insert(ConstraintName::Enum);
            }
        }

        if c.unique {
            let tracker = self.tracker.get_or_insert_with(UniquenessTracker::new);
            if !tracker.insert(value) {
                violated.insert(ConstraintName::Unique);
            }
        }

        if !violated.is_empty() {
            tracing::trace!(?violated, "Constraint check failed");
        }
        violated
    }

    /// Check a value and turn any violation into an error.
    pub fn enforce(
        &mut self,
        value: Option<&FieldValue>,
        raw: Option<&str>,
    ) -> Result<(), ConstraintViolation> {
        let violated = self.check(value);
        if violated.is_empty() {
            Ok(())
        } else {
            Err(ConstraintViolation::new(raw.map(str::to_string), violated))
        }
    }
}

/// Text compares case-insensitively, datetimes by local time and offset,
/// other ordered kinds by value and the rest by equality.
fn enum_matches(member: &FieldValue, value: &FieldValue) -> bool {
    match (member.as_text(), value.as_text()) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ if matches!(value, FieldValue::Datetime(_)) => member == value,
        _ => match member.compare(value) {
            Some(ordering) => ordering == Ordering::Equal,
            None => member == value,
        },
    }
}
