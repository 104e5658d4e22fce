//! Format inference and format validity checks.

use base64::Engine;
use regex::Regex;
use std::sync::LazyLock;

pub const FORMAT_EMAIL: &str = "email";
pub const FORMAT_URI: &str = "uri";
pub const FORMAT_UUID: &str = "uuid";
pub const FORMAT_BINARY: &str = "binary";
pub const FORMAT_ARRAY: &str = "array";
pub const FORMAT_OBJECT: &str = "object";
pub const FORMAT_TOPOJSON: &str = "topojson";

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{?[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\}?$")
        .expect("valid uuid regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("valid email regex")
});

/// A UUID in hyphenated form, optionally wrapped in braces.
pub fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// An email address with a dotted domain.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// An absolute URI that names a host.
pub fn is_uri(value: &str) -> bool {
    url::Url::parse(value)
        .map(|url| url.host().is_some())
        .unwrap_or(false)
}

/// Standard base64 with padding.
pub fn is_binary(value: &str) -> bool {
    base64::engine::general_purpose::STANDARD
        .decode(value)
        .is_ok()
}

/// Whether text satisfies a named string format.
///
/// Unknown format names place no restriction on the text.
pub fn string_has_format(value: &str, format: &str) -> bool {
    match format {
        FORMAT_EMAIL => is_email(value),
        FORMAT_URI => is_uri(value),
        FORMAT_UUID => is_uuid(value),
        FORMAT_BINARY => is_binary(value),
        _ => true,
    }
}

/// The most specific string format the sample satisfies.
///
/// Checked in priority order uuid, email, uri; the first match wins.
pub fn infer_string_format(sample: &str) -> Option<&'static str> {
    if is_uuid(sample) {
        Some(FORMAT_UUID)
    } else if is_email(sample) {
        Some(FORMAT_EMAIL)
    } else if is_uri(sample) {
        Some(FORMAT_URI)
    } else {
        None
    }
}
