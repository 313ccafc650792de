use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use url::{Origin, Url};

use super::State;

/// Semantic fields of a Sign-In With Ethereum message.
///
/// A field is `None` until the parser has accepted it. When parsing stops
/// early, the fields committed before the failing line are kept and
/// `is_valid` stays `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedMessage {
    #[serde(serialize_with = "crate::parsers::serializers::serialize_origin")]
    pub origin: Option<Origin>,
    pub address: Option<String>,
    pub statement: Option<String>,
    pub uri: Option<Url>,
    pub version: Option<u32>,
    pub chain_id: Option<String>,
    pub nonce: Option<String>,
    pub issued_at: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Url>,
    pub is_valid: bool,
}

impl ParsedMessage {
    /// Check `now` against the optional `Not Before` / `Expiration Time` bounds.
    ///
    /// The window is half-open: a message is usable from `not_before`
    /// (inclusive) until `expiration_time` (exclusive). Missing bounds are
    /// unbounded. This says nothing about `is_valid`.
    pub fn is_within_validity_window(&self, now: DateTime<Utc>) -> bool {
        if self.not_before.is_some_and(|not_before| now < not_before.with_timezone(&Utc)) {
            return false;
        }
        if self
            .expiration_time
            .is_some_and(|expiration_time| now >= expiration_time.with_timezone(&Utc))
        {
            return false;
        }
        true
    }
}

/// A parsed message and the grammar state parsing finished in.
///
/// For a valid message `state` is [`State::Terminal`]. Otherwise it names the
/// field whose line was rejected, or the field that was expected next when
/// input ran out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub message: ParsedMessage,
    pub state: State,
}
