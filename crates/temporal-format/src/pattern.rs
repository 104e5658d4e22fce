//! Portable → native date/time pattern translation.
//!
//! Field descriptors usually declare date formats in the portable
//! percent-token notation (`%Y-%m-%d`). Patterns are parsed internally in the
//! native letter notation (`yyyy-MM-dd`, see [`crate::native`]). This module
//! converts the former into the latter. It is a pure, total function: nothing
//! here can fail, and tokens without a mapping are copied through as-is.

/// Portable token → native pattern, in match order.
///
/// Unpadded variants come first so `%-d` is never read as `%` followed by
/// literal text. `%U` and `%W` both collapse onto the one native
/// week-of-year field.
const PORTABLE_TOKENS: &[(&str, &str)] = &[
    ("%-d", "d"),
    ("%-m", "M"),
    ("%-Y", "y"),
    ("%-H", "H"),
    ("%-I", "h"),
    ("%-M", "m"),
    ("%-S", "s"),
    ("%a", "EEE"),
    ("%A", "EEEE"),
    ("%w", "e"),
    ("%d", "dd"),
    ("%e", "ppd"),
    ("%b", "MMM"),
    ("%B", "MMMM"),
    ("%m", "MM"),
    ("%y", "yy"),
    ("%Y", "yyyy"),
    ("%H", "HH"),
    ("%I", "hh"),
    ("%p", "a"),
    ("%M", "mm"),
    ("%S", "ss"),
    ("%f", "SSSSSS"),
    ("%z", "Z"),
    ("%Z", "zzz"),
    ("%j", "D"),
    ("%U", "w"),
    ("%W", "w"),
    ("%C", "C"),
    ("%%", "%"),
];

/// Translate a portable pattern into the native notation.
///
/// A pattern without any `%` marker is already native and is returned
/// unchanged. Otherwise letters and apostrophes in the literal text are
/// quoted so they stay literal in the native pattern (`T` becomes `'T'`).
pub fn translate(portable: &str) -> String {
    if !portable.contains('%') {
        return portable.to_string();
    }

    let mut native = String::with_capacity(portable.len() * 2);
    let mut literal = String::new();
    let mut rest = portable;

    while let Some(c) = rest.chars().next() {
        if c == '%' {
            if let Some((token, replacement)) = PORTABLE_TOKENS
                .iter()
                .find(|(token, _)| rest.starts_with(token))
            {
                push_literal(&mut native, &literal);
                literal.clear();
                native.push_str(replacement);
                rest = &rest[token.len()..];
                continue;
            }

            // Unmapped token: copy the marker and the following character verbatim
            push_literal(&mut native, &literal);
            literal.clear();
            let mut chars = rest.chars();
            chars.next();
            native.push('%');
            if let Some(next) = chars.next() {
                native.push(next);
            }
            rest = chars.as_str();
            continue;
        }

        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }
    push_literal(&mut native, &literal);

    native
}

/// Translate an optional pattern; an unset format stays unset.
pub fn translate_opt(portable: Option<&str>) -> Option<String> {
    portable.map(translate)
}

/// Append literal text, quoting runs of ASCII letters and apostrophes.
fn push_literal(out: &mut String, literal: &str) {
    let mut quoted = false;
    for c in literal.chars() {
        let needs_quote = c.is_ascii_alphabetic() || c == '\'';
        if needs_quote && !quoted {
            out.push('\'');
            quoted = true;
        } else if !needs_quote && quoted {
            out.push('\'');
            quoted = false;
        }
        if c == '\'' {
            out.push_str("''");
        } else {
            out.push(c);
        }
    }
    if quoted {
        out.push('\'');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_date_patterns() {
        assert_eq!(translate("%Y-%m-%d"), "yyyy-MM-dd");
        assert_eq!(translate("%Y/%m/%d"), "yyyy/MM/dd");
        assert_eq!(translate("%d.%m.%y"), "dd.MM.yy");
        assert_eq!(translate("%a, %d %B %Y"), "EEE, dd MMMM yyyy");
    }

    #[test]
    fn test_translate_time_patterns() {
        assert_eq!(translate("%H:%M:%S"), "HH:mm:ss");
        assert_eq!(translate("%I:%M %p"), "hh:mm a");
        assert_eq!(translate("%H:%M:%S.%f"), "HH:mm:ss.SSSSSS");
        assert_eq!(translate("%H:%M:%S%z"), "HH:mm:ssZ");
        assert_eq!(translate("%H:%M %Z"), "HH:mm zzz");
    }

    #[test]
    fn test_translate_unpadded_variants() {
        assert_eq!(translate("%-d/%-m/%Y"), "d/M/yyyy");
        assert_eq!(translate("%-H:%-M:%-S"), "H:m:s");
        assert_eq!(translate("%-I%p"), "ha");
        assert_eq!(translate("%e %b"), "ppd MMM");
    }

    #[test]
    fn test_translate_week_and_day_of_year() {
        assert_eq!(translate("%U"), "w");
        assert_eq!(translate("%W"), "w");
        assert_eq!(translate("%j"), "D");
        assert_eq!(translate("%C%y"), "Cyy");
        assert_eq!(translate("%w"), "e");
    }

    #[test]
    fn test_translate_quotes_literal_letters() {
        assert_eq!(translate("%Y-%m-%dT%H:%M:%S"), "yyyy-MM-dd'T'HH:mm:ss");
        assert_eq!(translate("%d de %B"), "dd 'de' MMMM");
        assert_eq!(translate("%H o'clock"), "HH 'o''clock'");
    }

    #[test]
    fn test_translate_escape_is_not_rescanned() {
        assert_eq!(translate("%%d"), "%d");
        assert_eq!(translate("100%% %Y"), "100% yyyy");
    }

    #[test]
    fn test_translate_unmapped_tokens_pass_through() {
        assert_eq!(translate("%Y %q"), "yyyy %q");
        assert_eq!(translate("%Y%"), "yyyy%");
    }

    #[test]
    fn test_translate_native_is_idempotent() {
        for native in ["yyyy-MM-dd", "HH:mm:ss", "yyyy-MM-dd'T'HH:mm:ssZ", "default"] {
            assert_eq!(translate(native), native);
        }
    }

    #[test]
    fn test_translate_opt() {
        assert_eq!(translate_opt(None), None);
        assert_eq!(translate_opt(Some("%Y")), Some("yyyy".to_string()));
    }
}
