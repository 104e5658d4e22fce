//! Decimal text handling for integer and number fields.

use crate::options::NumberOptions;
use num_bigint::BigInt;
use regex::Regex;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$")
        .expect("valid number regex")
});

pub const NAN_LITERAL: &str = "NaN";
pub const INF_LITERAL: &str = "INF";
pub const NEG_INF_LITERAL: &str = "-INF";

/// Strip decoration from both ends, keeping only characters for which
/// `keep` holds at the boundaries. Interior characters are untouched.
fn strip_decoration(value: &str, keep: impl Fn(char) -> bool) -> &str {
    value.trim_matches(|c: char| !keep(c))
}

/// Parse an integer literal.
///
/// Only an optional sign followed by ASCII digits is accepted; with
/// `bare_number` unset, non-digit decoration at either end is removed first.
pub fn parse_integer(value: &str, bare_number: bool) -> Option<BigInt> {
    let mut text = value.trim();
    if !bare_number {
        text = strip_decoration(text, |c| c.is_ascii_digit() || c == '+' || c == '-');
    }
    if !INTEGER_RE.is_match(text) {
        return None;
    }
    text.parse().ok()
}

/// Parse a number literal, including `NaN`, `INF` and `-INF`.
pub fn parse_number(value: &str, options: &NumberOptions) -> Option<f64> {
    let trimmed = value.trim();
    match trimmed {
        NAN_LITERAL => return Some(f64::NAN),
        INF_LITERAL => return Some(f64::INFINITY),
        NEG_INF_LITERAL => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let mut text = trimmed;
    if !options.bare_number {
        let decimal = options.decimal_char;
        text = strip_decoration(text, |c| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | 'e' | 'E') || c == decimal
        });
    }

    let mut normalized: String = match options.group_char {
        Some(group) => text.chars().filter(|&c| c != group).collect(),
        None => text.to_string(),
    };
    if options.decimal_char != '.' {
        normalized = normalized.replace(options.decimal_char, ".");
    }

    if !NUMBER_RE.is_match(&normalized) {
        tracing::trace!(value, normalized = normalized.as_str(), "Not a number literal");
        return None;
    }
    normalized.parse().ok()
}

/// Format a number, using the declared decimal separator.
pub fn format_number(value: f64, options: &NumberOptions) -> String {
    if value.is_nan() {
        return NAN_LITERAL.to_string();
    }
    if value.is_infinite() {
        let literal = if value > 0.0 { INF_LITERAL } else { NEG_INF_LITERAL };
        return literal.to_string();
    }
    let text = value.to_string();
    if options.decimal_char == '.' {
        text
    } else {
        text.replace('.', &options.decimal_char.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn european() -> NumberOptions {
        NumberOptions {
            bare_number: true,
            decimal_char: ',',
            group_char: Some('.'),
        }
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("42", true), Some(BigInt::from(42)));
        assert_eq!(parse_integer(" -7 ", true), Some(BigInt::from(-7)));
        assert_eq!(parse_integer("+3", true), Some(BigInt::from(3)));
        assert_eq!(parse_integer("4.0", true), None);
        assert_eq!(parse_integer("1_000", true), None);
        assert_eq!(parse_integer("", true), None);

        let huge = "123456789012345678901234567890";
        assert_eq!(parse_integer(huge, true).unwrap().to_string(), huge);
    }

    #[test]
    fn test_parse_integer_with_decoration() {
        assert_eq!(parse_integer("$125", true), None);
        assert_eq!(parse_integer("$125", false), Some(BigInt::from(125)));
        assert_eq!(parse_integer("125 EUR", false), Some(BigInt::from(125)));
        assert_eq!(parse_integer("1 25", false), None);
    }

    #[test]
    fn test_parse_number() {
        let opts = NumberOptions::default();
        assert_eq!(parse_number("3.14", &opts), Some(3.14));
        assert_eq!(parse_number("-1e3", &opts), Some(-1000.0));
        assert_eq!(parse_number(".5", &opts), Some(0.5));
        assert_eq!(parse_number("inf", &opts), None);
        assert_eq!(parse_number("1,000", &opts), None);
        assert!(parse_number("NaN", &opts).unwrap().is_nan());
        assert_eq!(parse_number("-INF", &opts), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_number_separators() {
        assert_eq!(parse_number("1.234.567,89", &european()), Some(1234567.89));

        let grouped = NumberOptions {
            group_char: Some(','),
            ..Default::default()
        };
        assert_eq!(parse_number("1,000.5", &grouped), Some(1000.5));
    }

    #[test]
    fn test_parse_number_decoration() {
        let opts = NumberOptions {
            bare_number: false,
            ..Default::default()
        };
        assert_eq!(parse_number("$1.5", &opts), Some(1.5));
        assert_eq!(parse_number("95%", &opts), Some(95.0));
        assert_eq!(parse_number("€ 12", &opts), Some(12.0));
        assert_eq!(parse_number("1 2", &opts), None);
    }

    #[test]
    fn test_format_number() {
        let opts = NumberOptions::default();
        assert_eq!(format_number(1.5, &opts), "1.5");
        assert_eq!(format_number(2.0, &opts), "2");
        assert_eq!(format_number(f64::NAN, &opts), "NaN");
        assert_eq!(format_number(f64::INFINITY, &opts), "INF");
        assert_eq!(format_number(-0.25, &european()), "-0,25");
    }
}
