//! Native date/time patterns.
//!
//! The native notation uses repeated pattern letters, CLDR style:
//!
//! | Pattern | Field | Example |
//! |---------|-------|---------|
//! | `y`, `yy`, `yyyy` | year (unpadded, two digits, four digits) | `7`, `07`, `2007` |
//! | `M`, `MM`, `MMM`, `MMMM` | month | `3`, `03`, `Mar`, `March` |
//! | `d`, `dd` | day of month | `9`, `09` |
//! | `D`, `DDD` | day of year | `45`, `045` |
//! | `E`..`EEE`, `EEEE` | weekday name | `Tue`, `Tuesday` |
//! | `e` | weekday number, Sunday = 0 | `2` |
//! | `w`, `ww` | week of year, Monday first | `5`, `05` |
//! | `H`, `HH` / `h`, `hh` | hour (24h / 12h) | `7`, `07` |
//! | `m`, `mm` / `s`, `ss` | minute / second | `5`, `05` |
//! | `SSS`, `SSSSSS`, `SSSSSSSSS` | fraction of second | `123`, `123456` |
//! | `a` | AM/PM marker | `PM` |
//! | `Z`..`ZZZ`, `ZZZZZ` | UTC offset | `+0530`, `+05:30` |
//! | `z`..`zzz` | zone name | `UTC` |
//! | `C` | century | `20` |
//! | `p` | pad the next numeric field with spaces | `ppd` → ` 9` |
//!
//! Text in single quotes is literal, `''` is an apostrophe, and every other
//! character (including letters without a meaning above) is literal.
//!
//! A compiled [`NativePattern`] is backed by an equivalent chrono
//! specification string; parsing and formatting both walk its items.

use chrono::format::{Item, StrftimeItems};
use std::fmt;
use std::str::FromStr;

/// Error compiling a native pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A quoted literal was never closed
    #[error("Unterminated quote in pattern '{pattern}'")]
    UnterminatedQuote { pattern: String },

    /// A pattern letter repeated a number of times that has no meaning
    #[error("Unsupported width {width} for pattern letter '{letter}' in '{pattern}'")]
    UnsupportedWidth {
        pattern: String,
        letter: char,
        width: usize,
    },

    /// A space-padding modifier not followed by a numeric field
    #[error("Padding modifier 'p' must precede a numeric field in '{pattern}'")]
    DanglingPad { pattern: String },
}

/// A compiled native date/time pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePattern {
    source: String,
    spec: String,
    has_offset: bool,
}

impl NativePattern {
    /// Compile a native pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut spec = String::with_capacity(pattern.len() * 2);
        let mut has_offset = false;
        let mut space_pad = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                if space_pad {
                    return Err(PatternError::DanglingPad {
                        pattern: pattern.to_string(),
                    });
                }
                if chars.get(i + 1) == Some(&'\'') {
                    spec.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(PatternError::UnterminatedQuote {
                                pattern: pattern.to_string(),
                            })
                        }
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            spec.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(&quoted) => {
                            push_literal(&mut spec, quoted);
                            i += 1;
                        }
                    }
                }
                continue;
            }

            if !is_pattern_letter(c) {
                if space_pad {
                    return Err(PatternError::DanglingPad {
                        pattern: pattern.to_string(),
                    });
                }
                push_literal(&mut spec, c);
                i += 1;
                continue;
            }

            let width = chars[i..].iter().take_while(|&&n| n == c).count();
            i += width;

            if c == 'p' {
                space_pad = true;
                continue;
            }

            let field = field_spec(c, width, space_pad).map_err(|()| {
                if space_pad {
                    PatternError::DanglingPad {
                        pattern: pattern.to_string(),
                    }
                } else {
                    PatternError::UnsupportedWidth {
                        pattern: pattern.to_string(),
                        letter: c,
                        width,
                    }
                }
            })?;
            has_offset |= c == 'Z';
            space_pad = false;
            spec.push_str(&field);
        }

        if space_pad {
            return Err(PatternError::DanglingPad {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            source: pattern.to_string(),
            spec,
            has_offset,
        })
    }

    /// `yyyy-MM-dd`, the default date pattern.
    pub fn iso_date() -> Self {
        Self {
            source: "yyyy-MM-dd".to_string(),
            spec: "%Y-%m-%d".to_string(),
            has_offset: false,
        }
    }

    /// `HH:mm:ss`, the default time pattern.
    pub fn iso_time() -> Self {
        Self {
            source: "HH:mm:ss".to_string(),
            spec: "%H:%M:%S".to_string(),
            has_offset: false,
        }
    }

    /// The pattern text as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether parsing with this pattern yields a UTC offset.
    pub fn has_offset(&self) -> bool {
        self.has_offset
    }

    /// The chrono items this pattern parses and formats with.
    pub fn items(&self) -> StrftimeItems<'_> {
        StrftimeItems::new(&self.spec)
    }

    /// Whether all compiled items are understood by chrono.
    pub fn is_supported(&self) -> bool {
        !self.items().any(|item| matches!(item, Item::Error))
    }
}

impl FromStr for NativePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for NativePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_pattern_letter(c: char) -> bool {
    matches!(
        c,
        'y' | 'M' | 'd' | 'D' | 'E' | 'e' | 'w' | 'H' | 'h' | 'm' | 's' | 'S' | 'a' | 'Z' | 'z'
            | 'C' | 'p'
    )
}

fn push_literal(spec: &mut String, c: char) {
    if c == '%' {
        spec.push_str("%%");
    } else {
        spec.push(c);
    }
}

/// Chrono specifier for one pattern field.
fn field_spec(letter: char, width: usize, space_pad: bool) -> Result<String, ()> {
    let numeric = |code: char, padded: bool| -> String {
        if space_pad {
            format!("%_{code}")
        } else if padded {
            format!("%{code}")
        } else {
            format!("%-{code}")
        }
    };

    // Text and offset fields cannot be space padded
    let fixed = |code: &str| -> Result<String, ()> {
        if space_pad {
            Err(())
        } else {
            Ok(code.to_string())
        }
    };

    match (letter, width) {
        ('y', 2) => Ok(numeric('y', true)),
        ('y', 1 | 3) => Ok(numeric('Y', false)),
        ('y', _) => Ok(numeric('Y', true)),
        ('M', 1 | 2) => Ok(numeric('m', width == 2)),
        ('M', 3) => fixed("%b"),
        ('M', _) => fixed("%B"),
        ('d', 1 | 2) => Ok(numeric('d', width == 2)),
        ('D', 1 | 3) => Ok(numeric('j', width == 3)),
        ('E', 1..=3) => fixed("%a"),
        ('E', 4) => fixed("%A"),
        ('e', 1) => Ok(numeric('w', false)),
        ('w', 1 | 2) => Ok(numeric('W', width == 2)),
        ('H', 1 | 2) => Ok(numeric('H', width == 2)),
        ('h', 1 | 2) => Ok(numeric('I', width == 2)),
        ('m', 1 | 2) => Ok(numeric('M', width == 2)),
        ('s', 1 | 2) => Ok(numeric('S', width == 2)),
        ('S', 3) => fixed("%3f"),
        ('S', 6) => fixed("%6f"),
        ('S', 9) => fixed("%9f"),
        ('a', 1) => fixed("%p"),
        ('Z', 1..=3) => fixed("%z"),
        ('Z', 5) => fixed("%:z"),
        ('z', 1..=3) => fixed("%Z"),
        ('C', 1 | 2) => Ok(numeric('C', width == 2)),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_basic_patterns() {
        let pattern = NativePattern::compile("yyyy-MM-dd").unwrap();
        assert_eq!(pattern.spec, "%Y-%m-%d");
        assert!(!pattern.has_offset());
        assert!(pattern.is_supported());

        let pattern = NativePattern::compile("HH:mm:ss.SSSSSS").unwrap();
        assert_eq!(pattern.spec, "%H:%M:%S.%6f");

        let pattern = NativePattern::compile("d/M/yy h:mm a").unwrap();
        assert_eq!(pattern.spec, "%-d/%-m/%y %-I:%M %p");
    }

    #[test]
    fn test_compile_offsets() {
        let pattern = NativePattern::compile("yyyy-MM-dd'T'HH:mm:ssZ").unwrap();
        assert_eq!(pattern.spec, "%Y-%m-%dT%H:%M:%S%z");
        assert!(pattern.has_offset());

        let pattern = NativePattern::compile("HH:mmZZZZZ").unwrap();
        assert_eq!(pattern.spec, "%H:%M%:z");

        let pattern = NativePattern::compile("HH:mm zzz").unwrap();
        assert!(!pattern.has_offset());
    }

    #[test]
    fn test_compile_quotes_and_literals() {
        let pattern = NativePattern::compile("HH 'o''clock'").unwrap();
        assert_eq!(pattern.spec, "%H o'clock");

        let pattern = NativePattern::compile("yyyy''MM").unwrap();
        assert_eq!(pattern.spec, "%Y'%m");

        let pattern = NativePattern::compile("100% yyyy").unwrap();
        assert_eq!(pattern.spec, "100%% %Y");

        // Letters without a meaning are literal
        let pattern = NativePattern::compile("yyyyTMM").unwrap();
        assert_eq!(pattern.spec, "%YT%m");
    }

    #[test]
    fn test_compile_space_padding() {
        let pattern = NativePattern::compile("ppd MMM").unwrap();
        assert_eq!(pattern.spec, "%_d %b");

        assert!(matches!(
            NativePattern::compile("pp-dd"),
            Err(PatternError::DanglingPad { .. })
        ));
        assert!(matches!(
            NativePattern::compile("ppMMM"),
            Err(PatternError::DanglingPad { .. })
        ));
        assert!(matches!(
            NativePattern::compile("dd pp"),
            Err(PatternError::DanglingPad { .. })
        ));
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            NativePattern::compile("yyyy 'open"),
            Err(PatternError::UnterminatedQuote { .. })
        ));
        assert!(matches!(
            NativePattern::compile("HH:mm:ss.SS"),
            Err(PatternError::UnsupportedWidth {
                letter: 'S',
                width: 2,
                ..
            })
        ));
        assert!(matches!(
            NativePattern::compile("ddd"),
            Err(PatternError::UnsupportedWidth { letter: 'd', .. })
        ));
    }

    #[test]
    fn test_default_patterns_match_compiled() {
        assert_eq!(NativePattern::iso_date(), NativePattern::compile("yyyy-MM-dd").unwrap());
        assert_eq!(NativePattern::iso_time(), NativePattern::compile("HH:mm:ss").unwrap());
    }

    #[test]
    fn test_from_str_and_display() {
        let pattern: NativePattern = "yyyy".parse().unwrap();
        assert_eq!(pattern.to_string(), "yyyy");
        assert_eq!(pattern.as_str(), "yyyy");
    }
}
