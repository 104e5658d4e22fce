//! Declarative constraints for tableschema fields.
//!
//! - [`RawConstraints`] - constraints as declared in a field descriptor
//! - [`TypedConstraints`] - the same constraints normalized to a value kind
//! - [`ConstraintEngine`] - checks cast values, tracking `unique` state
//!
//! # Example
//!
//! ```rust
//! use field_constraints::{ConstraintEngine, ConstraintName, RawConstraints, TypedConstraints};
//! use field_core::{FieldType, FieldValue};
//! use field_types::ValueKind;
//!
//! let kind = ValueKind::for_type(FieldType::String);
//! let format = kind.resolve_format(None).unwrap();
//! let raw: RawConstraints = serde_json::from_str(r#"{"unique": true}"#).unwrap();
//!
//! let mut engine = ConstraintEngine::new(TypedConstraints::validate(&raw, &kind, &format).unwrap());
//! let a = FieldValue::String("a".to_string());
//! assert!(engine.check(Some(&a)).is_empty());
//! assert!(engine.check(Some(&a)).contains(&ConstraintName::Unique));
//! ```

pub mod constraints;
pub mod engine;
pub mod error;
pub mod name;
pub mod unique;

pub use constraints::{RawConstraints, TypedConstraints, ValuePattern};
pub use engine::ConstraintEngine;
pub use error::ConstraintViolation;
pub use name::ConstraintName;
pub use unique::{UniqueKey, UniquenessTracker};
