//! Date/time patterns for tableschema fields.
//!
//! - [`pattern::translate`] - Portable `%Y-%m-%d` patterns to the native notation
//! - [`NativePattern`] - Compiled native `yyyy-MM-dd` patterns
//! - [`parse_strict`] / [`format`] - Round-trip checked parsing and formatting
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use temporal_format::{parse_strict, translate, NativePattern};
//!
//! let native = translate("%d/%m/%Y");
//! assert_eq!(native, "dd/MM/yyyy");
//!
//! let pattern = NativePattern::compile(&native).unwrap();
//! let date: Option<NaiveDate> = parse_strict("29/02/2024", &pattern);
//! assert!(date.is_some());
//! assert!(parse_strict::<NaiveDate>("29/02/2023", &pattern).is_none());
//! ```

pub mod native;
pub mod pattern;
pub mod strict;

pub use native::{NativePattern, PatternError};
pub use pattern::{translate, translate_opt};
pub use strict::{format, parse_strict, Temporal, TemporalError};
