//! Label and value validators for individual message lines.
//!
//! Every field line after the statement has the shape `<Label>: <value>`. The
//! label must start the line exactly; `abc URI: ...` or `URI:...` do not match.

use chrono::{DateTime, FixedOffset};
use url::Url;

use crate::utils::parse_url;

pub const HEADER_SUFFIX: &str = " wants you to sign in with your Ethereum account:";
pub const URI_LABEL: &str = "URI: ";
pub const VERSION_LABEL: &str = "Version: ";
pub const CHAIN_ID_LABEL: &str = "Chain ID: ";
pub const NONCE_LABEL: &str = "Nonce: ";
pub const ISSUED_AT_LABEL: &str = "Issued At: ";
pub const EXPIRATION_TIME_LABEL: &str = "Expiration Time: ";
pub const NOT_BEFORE_LABEL: &str = "Not Before: ";
pub const REQUEST_ID_LABEL: &str = "Request ID: ";
pub const RESOURCES_HEADER: &str = "Resources:";
pub const RESOURCE_ENTRY_PREFIX: &str = "- ";

/// Only message version accepted.
pub const SUPPORTED_VERSION: u32 = 1;

/// Extract the origin candidate from a header line.
///
/// The header text must end the line and be preceded by a non-empty origin.
pub fn header_origin(line: &str) -> Option<&str> {
    let n = line.find(HEADER_SUFFIX)?;
    if n == 0 || &line[n..] != HEADER_SUFFIX {
        return None;
    }
    Some(&line[..n])
}

/// Value after `label`, if the line starts with it.
pub fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)
}

/// Non-empty value after `label`.
pub fn string_field<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    strip_label(line, label).filter(|value| !value.is_empty())
}

/// Absolute URL after `label`.
pub fn url_field(line: &str, label: &str) -> Option<Url> {
    strip_label(line, label).and_then(parse_url)
}

/// RFC 3339 timestamp after `label`.
pub fn timestamp_field(line: &str, label: &str) -> Option<DateTime<FixedOffset>> {
    strip_label(line, label).and_then(|value| DateTime::parse_from_rfc3339(value).ok())
}

/// Version number after `Version: `, accepted only when it is [`SUPPORTED_VERSION`].
///
/// The value must be plain decimal digits; signs and whitespace are rejected.
pub fn version_field(line: &str) -> Option<u32> {
    let value = strip_label(line, VERSION_LABEL)?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().filter(|version| *version == SUPPORTED_VERSION)
}
