//! Strict date/time parsing.
//!
//! A value parses only when the pattern accepts it and formatting the result
//! with the same pattern gives back the exact input text. This rejects
//! lenient matches such as `2023-2-5` against `yyyy-MM-dd`, and calendar
//! overflow such as February 29 in a common year.
//!
//! chrono reads zone names without resolving them, so the pattern is split at
//! each zone name field and the name is resolved with `chrono-tz`.

use crate::native::NativePattern;
use chrono::format::{parse_and_remainder, Fixed, Item, Parsed};
use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use field_core::ZonedDateTime;
use std::fmt::Write;

/// Error formatting a temporal value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemporalError {
    /// The pattern asks for a field the value does not carry (an hour on a date)
    #[error("Cannot format value with pattern '{pattern}'")]
    Unformattable { pattern: String },
}

/// A value that native patterns can read and write.
pub trait Temporal: Sized {
    /// Build a value from parsed fields and the zone name found in the text.
    fn from_parsed(parsed: &Parsed, zone: Option<&str>, pattern: &NativePattern) -> Option<Self>;

    /// Format the value, failing if the pattern needs a field the value lacks.
    fn write_to(&self, out: &mut String, pattern: &NativePattern) -> std::fmt::Result;
}

impl Temporal for NaiveDate {
    fn from_parsed(parsed: &Parsed, _zone: Option<&str>, _pattern: &NativePattern) -> Option<Self> {
        parsed.to_naive_date().ok()
    }

    fn write_to(&self, out: &mut String, pattern: &NativePattern) -> std::fmt::Result {
        write!(out, "{}", self.format_with_items(pattern.items()))
    }
}

impl Temporal for NaiveTime {
    fn from_parsed(parsed: &Parsed, _zone: Option<&str>, _pattern: &NativePattern) -> Option<Self> {
        parsed.to_naive_time().ok()
    }

    fn write_to(&self, out: &mut String, pattern: &NativePattern) -> std::fmt::Result {
        write!(out, "{}", self.format_with_items(pattern.items()))
    }
}

impl Temporal for ZonedDateTime {
    /// A zone name wins over an offset field; with neither the value is UTC.
    fn from_parsed(parsed: &Parsed, zone: Option<&str>, pattern: &NativePattern) -> Option<Self> {
        if let Some(name) = zone {
            let tz: Tz = match name.parse() {
                Ok(tz) => tz,
                Err(_) => {
                    tracing::trace!(zone = name, "Unknown time zone name");
                    return None;
                }
            };
            let local = parsed.to_naive_datetime_with_offset(0).ok()?;
            return tz.from_local_datetime(&local).single().map(ZonedDateTime::in_zone);
        }

        if pattern.has_offset() {
            parsed.to_datetime().ok().map(ZonedDateTime::new)
        } else {
            parsed
                .to_naive_datetime_with_offset(0)
                .ok()
                .map(|naive| ZonedDateTime::new(naive.and_utc().fixed_offset()))
        }
    }

    /// Values without a zone but at offset zero write their zone name as `UTC`.
    fn write_to(&self, out: &mut String, pattern: &NativePattern) -> std::fmt::Result {
        let dt = self.datetime();
        match self.zoned() {
            Some(zoned) => write!(out, "{}", zoned.format_with_items(pattern.items())),
            None if dt.offset().local_minus_utc() == 0 => {
                let utc = dt.with_timezone(&Tz::UTC);
                write!(out, "{}", utc.format_with_items(pattern.items()))
            }
            None => write!(out, "{}", dt.format_with_items(pattern.items())),
        }
    }
}

/// Parse `value` with `pattern`, accepting it only if it round-trips exactly.
pub fn parse_strict<T: Temporal>(value: &str, pattern: &NativePattern) -> Option<T> {
    let (parsed, zone) = parse_fields(value, pattern)?;

    let result = T::from_parsed(&parsed, zone, pattern)?;

    let mut reformatted = String::with_capacity(value.len());
    if result.write_to(&mut reformatted, pattern).is_err() {
        return None;
    }

    if reformatted != value {
        tracing::trace!(
            value,
            reformatted = reformatted.as_str(),
            pattern = pattern.as_str(),
            "Rejected value that does not round-trip"
        );
        return None;
    }

    Some(result)
}

/// Run the pattern over `value`, capturing the text of the last zone name field.
fn parse_fields<'v>(value: &'v str, pattern: &NativePattern) -> Option<(Parsed, Option<&'v str>)> {
    let items: Vec<Item<'_>> = pattern.items().collect();
    let mut segments = items
        .split(|item| matches!(item, Item::Fixed(Fixed::TimezoneName)))
        .peekable();

    let mut parsed = Parsed::new();
    let mut zone = None;
    let mut rest = value;
    while let Some(segment) = segments.next() {
        rest = match parse_and_remainder(&mut parsed, rest, segment.iter()) {
            Ok(rest) => rest,
            Err(e) => {
                tracing::trace!(value, pattern = pattern.as_str(), error = %e, "Pattern did not match");
                return None;
            }
        };
        if segments.peek().is_some() {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-')))
                .unwrap_or(rest.len());
            if end == 0 {
                tracing::trace!(value, pattern = pattern.as_str(), "Missing time zone name");
                return None;
            }
            zone = Some(&rest[..end]);
            rest = &rest[end..];
        }
    }

    if !rest.is_empty() {
        tracing::trace!(value, trailing = rest, pattern = pattern.as_str(), "Trailing input");
        return None;
    }
    Some((parsed, zone))
}

/// Format a value with a native pattern.
pub fn format<T: Temporal>(value: &T, pattern: &NativePattern) -> Result<String, TemporalError> {
    let mut out = String::new();
    value
        .write_to(&mut out, pattern)
        .map_err(|_| TemporalError::Unformattable {
            pattern: pattern.as_str().to_string(),
        })?;
    Ok(out)
}
