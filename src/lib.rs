//! Tableschema field engine.
//!
//! Casts raw text cells to typed values according to a field descriptor,
//! formats them back, infers formats from samples and enforces declared
//! constraints.
//!
//! # Crates
//!
//! - `field_core` - field types, cast values and errors
//! - `temporal_format` - date/time pattern translation and strict parsing
//! - `field_types` - per-type parse, format and inference
//! - `field_constraints` - constraint normalization and checking
//!
//! # CLI Usage
//!
//! ```bash
//! # Cast values against a field descriptor
//! tableschema cast --field born.yaml 01/02/1990 31/02/1990
//!
//! # Infer the format of a sample
//! tableschema infer --type string someone@example.com
//!
//! # Translate a portable date pattern
//! tableschema translate "%d/%m/%Y"
//! ```
//!
//! # Example
//!
//! ```rust
//! use tableschema::{Field, FieldError, FieldValue};
//!
//! let mut field = Field::from_json(
//!     r#"{"name": "age", "type": "integer", "constraints": {"minimum": 10, "maximum": 20}}"#,
//! )
//! .unwrap();
//!
//! assert!(field.cast("10").unwrap().is_some());
//! assert!(matches!(field.cast("21"), Err(FieldError::Constraints(_))));
//! assert_eq!(field.cast("").unwrap(), None::<FieldValue>);
//! ```

pub mod config;
pub mod descriptor;
pub mod field;

pub use config::{load_descriptor, load_field, DescriptorError};
pub use descriptor::FieldDescriptor;
pub use field::{Field, FieldError};

pub use field_constraints::{ConstraintName, ConstraintViolation, RawConstraints};
pub use field_core::{CastError, ConfigError, FieldOptions, FieldType, FieldValue, ZonedDateTime};
pub use field_types::ValueKind;
