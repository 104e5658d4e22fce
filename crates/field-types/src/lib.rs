//! Value kinds for tableschema fields.
//!
//! This crate provides per-type casting between raw text and [`FieldValue`]:
//!
//! - [`reverse`] - raw text → FieldValue
//! - [`forward`] - FieldValue → text or JSON
//! - [`infer`] - format inference and string format validity
//! - [`normalize`] - constraint bounds and enum members → FieldValue
//!
//! [`ValueKind`] ties these together: one variant per field type, carrying the
//! type's options, with every operation dispatched by matching on the variant.
//!
//! # Example
//!
//! ```rust
//! use field_core::{FieldType, FieldValue};
//! use field_types::ValueKind;
//!
//! let kind = ValueKind::for_type(FieldType::Year);
//! let format = kind.resolve_format(None).unwrap();
//!
//! let value = kind.parse("1999", &format).unwrap();
//! assert_eq!(value, FieldValue::Year(1999));
//! assert_eq!(kind.format(&value, &format).unwrap(), "1999");
//! assert_eq!(kind.format_for_json(&value, &format).unwrap(), serde_json::json!(1999));
//! ```
//!
//! [`FieldValue`]: field_core::FieldValue

pub mod duration;
pub mod forward;
pub mod infer;
pub mod kind;
pub mod normalize;
pub mod number;
pub mod options;
pub mod reverse;

pub use kind::{ResolvedFormat, ValueKind};
pub use options::{BooleanValues, KindSettings, NumberOptions};
