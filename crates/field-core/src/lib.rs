//! Core types for the tableschema field engine.
//!
//! This crate provides the foundational types used across the field crates:
//!
//! - [`FieldType`] - The closed set of declarable column types
//! - [`FieldValue`] - A cast value, one variant per field type
//! - [`CastError`] / [`ConfigError`] - Per-value and per-schema failures
//!
//! # Architecture
//!
//! ```text
//! field-core (this crate)
//!    │
//!    ├─── temporal-format     (pattern translation, strict date/time parsing)
//!    ├─── field-types         (parse/format/infer per value kind)
//!    ├─── field-constraints   (constraint normalization and checking)
//!    └─── tableschema         (Field façade and CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use field_core::{FieldType, FieldValue};
//!
//! let value = FieldValue::Year(1999);
//! assert_eq!(value.field_type(), FieldType::Year);
//! assert_eq!(FieldType::from_tag("yearmonth"), FieldType::YearMonth);
//! ```

pub mod error;
pub mod types;
pub mod values;

pub use error::{CastError, ConfigError};
pub use types::FieldType;
pub use values::{FieldValue, GeoPoint, YearMonth, ZonedDateTime};

/// Per-call and per-field options, as declared in a field descriptor.
pub type FieldOptions = serde_json::Map<String, serde_json::Value>;

/// The format name that selects a type's built-in default.
pub const FORMAT_DEFAULT: &str = "default";

/// The format name that means "any recognizable format"; treated as default.
pub const FORMAT_ANY: &str = "any";
