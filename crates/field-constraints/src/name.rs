//! Constraint names.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A declarable constraint.
///
/// Ordered so violation sets list constraints in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintName {
    Required,
    Unique,
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
    Pattern,
    Enum,
}

impl ConstraintName {
    pub const ALL: [ConstraintName; 8] = [
        ConstraintName::Required,
        ConstraintName::Unique,
        ConstraintName::MinLength,
        ConstraintName::MaxLength,
        ConstraintName::Minimum,
        ConstraintName::Maximum,
        ConstraintName::Pattern,
        ConstraintName::Enum,
    ];

    /// The key used in field descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Unique => "unique",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Pattern => "pattern",
            Self::Enum => "enum",
        }
    }

    /// Look up a constraint by its descriptor key (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ConstraintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConstraintName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConstraintName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl Visitor<'_> for NameVisitor {
            type Value = ConstraintName;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a constraint name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ConstraintName, E> {
                ConstraintName::from_name(v)
                    .ok_or_else(|| E::custom(format!("unknown constraint '{v}'")))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for name in ConstraintName::ALL {
            assert_eq!(ConstraintName::from_name(name.as_str()), Some(name));
        }
        assert_eq!(ConstraintName::from_name("minlength"), None);
        assert_eq!(ConstraintName::from_name("format"), None);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&ConstraintName::MaxLength).unwrap();
        assert_eq!(json, "\"maxLength\"");
        let name: ConstraintName = serde_json::from_str("\"enum\"").unwrap();
        assert_eq!(name, ConstraintName::Enum);
        assert!(serde_json::from_str::<ConstraintName>("\"between\"").is_err());
    }
}
