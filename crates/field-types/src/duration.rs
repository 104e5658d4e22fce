//! ISO 8601 durations in day-time form.
//!
//! Accepted text is `PnDTnHnMn.nS`: every component is optional and may
//! carry its own sign, and the whole duration may be negated with a leading
//! `-`. Year and month components are rejected since their length in
//! seconds is not fixed. Output uses hours, minutes and seconds only, so
//! `P1D` is written back as `PT24H`.

use chrono::TimeDelta;
use regex::Regex;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([-+]?)P(?:([-+]?[0-9]+)D)?(T(?:([-+]?[0-9]+)H)?(?:([-+]?[0-9]+)M)?(?:([-+]?[0-9]+)(?:[.,]([0-9]{0,9}))?S)?)?$",
    )
    .expect("valid duration regex")
});

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Parse an ISO 8601 duration.
pub fn parse_duration(value: &str) -> Option<TimeDelta> {
    let caps = DURATION_RE.captures(value)?;

    let day = caps.get(2).map(|m| m.as_str());
    let time_section = caps.get(3).map(|m| m.as_str());
    let hour = caps.get(4).map(|m| m.as_str());
    let minute = caps.get(5).map(|m| m.as_str());
    let second = caps.get(6).map(|m| m.as_str());
    let fraction = caps.get(7).map(|m| m.as_str());

    // `P`, `PT` and `P1DT` carry no value
    if day.is_none() && time_section.is_none() {
        return None;
    }
    if time_section.is_some() && hour.is_none() && minute.is_none() && second.is_none() {
        return None;
    }

    let component = |text: Option<&str>, unit: i64| -> Option<i64> {
        match text {
            Some(t) => t.parse::<i64>().ok()?.checked_mul(unit),
            None => Some(0),
        }
    };

    let seconds = component(day, SECONDS_PER_DAY)?
        .checked_add(component(hour, SECONDS_PER_HOUR)?)?
        .checked_add(component(minute, SECONDS_PER_MINUTE)?)?
        .checked_add(component(second, 1)?)?;

    let mut nanos = match fraction {
        Some(digits) if !digits.is_empty() => format!("{digits:0<9}").parse::<i64>().ok()?,
        _ => 0,
    };
    if second.is_some_and(|s| s.starts_with('-')) {
        nanos = -nanos;
    }

    let mut delta = TimeDelta::try_seconds(seconds)?.checked_add(&TimeDelta::nanoseconds(nanos))?;
    if caps.get(1).is_some_and(|m| m.as_str() == "-") {
        delta = -delta;
    }
    Some(delta)
}

/// Format a duration as `PTnHnMn.nS`.
pub fn format_duration(value: &TimeDelta) -> String {
    if value.is_zero() {
        return "PT0S".to_string();
    }

    // Floor seconds with a non-negative nanosecond part
    let mut seconds = value.num_seconds();
    let mut nanos = i64::from(value.subsec_nanos());
    if nanos < 0 {
        seconds -= 1;
        nanos += NANOS_PER_SECOND;
    }

    let effective = if seconds < 0 && nanos > 0 {
        seconds + 1
    } else {
        seconds
    };
    let hours = effective / SECONDS_PER_HOUR;
    let minutes = (effective % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = effective % SECONDS_PER_MINUTE;

    let mut out = String::from("PT");
    if hours != 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes != 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if secs == 0 && nanos == 0 && out.len() > 2 {
        return out;
    }

    if seconds < 0 && nanos > 0 && secs == 0 {
        out.push_str("-0");
    } else {
        out.push_str(&secs.to_string());
    }
    if nanos > 0 {
        let fraction = if seconds < 0 {
            NANOS_PER_SECOND - nanos
        } else {
            nanos
        };
        let digits = format!("{fraction:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push('S');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("P1D"), Some(TimeDelta::days(1)));
        assert_eq!(parse_duration("PT15M"), Some(TimeDelta::minutes(15)));
        assert_eq!(
            parse_duration("P2DT3H4M"),
            Some(TimeDelta::days(2) + TimeDelta::hours(3) + TimeDelta::minutes(4))
        );
        assert_eq!(
            parse_duration("PT1.5S"),
            Some(TimeDelta::milliseconds(1500))
        );
        assert_eq!(parse_duration("pt2h"), Some(TimeDelta::hours(2)));
    }

    #[test]
    fn test_parse_duration_signs() {
        assert_eq!(parse_duration("-PT6H"), Some(TimeDelta::hours(-6)));
        assert_eq!(
            parse_duration("PT-6H3M"),
            Some(TimeDelta::hours(-6) + TimeDelta::minutes(3))
        );
        assert_eq!(
            parse_duration("-PT-6H+3M"),
            Some(TimeDelta::hours(6) - TimeDelta::minutes(3))
        );
        assert_eq!(
            parse_duration("PT-0.5S"),
            Some(TimeDelta::milliseconds(-500))
        );
    }

    #[test]
    fn test_parse_duration_rejects() {
        for text in ["", "P", "PT", "P1DT", "P1Y", "P1M", "1D", "PT1.5H", "P1D ", "PT1.1234567891S"] {
            assert_eq!(parse_duration(text), None, "{text}");
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&TimeDelta::zero()), "PT0S");
        assert_eq!(format_duration(&TimeDelta::days(1)), "PT24H");
        assert_eq!(format_duration(&TimeDelta::minutes(90)), "PT1H30M");
        assert_eq!(format_duration(&TimeDelta::seconds(61)), "PT1M1S");
        assert_eq!(format_duration(&TimeDelta::milliseconds(1500)), "PT1.5S");
        assert_eq!(format_duration(&TimeDelta::hours(-6)), "PT-6H");
        assert_eq!(format_duration(&TimeDelta::milliseconds(-500)), "PT-0.5S");
        assert_eq!(format_duration(&TimeDelta::milliseconds(-1500)), "PT-1.5S");
    }

    #[test]
    fn test_format_then_parse_preserves_duration() {
        for text in ["P3D", "PT-90M", "PT0.001S", "-P1DT1S"] {
            let delta = parse_duration(text).unwrap();
            assert_eq!(parse_duration(&format_duration(&delta)), Some(delta), "{text}");
        }
    }
}
