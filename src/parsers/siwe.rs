//! State machine parser for Sign-In With Ethereum (EIP-4361) messages.
//!
//! The grammar is consumed strictly top to bottom:
//!
//! ```text
//! ${origin} wants you to sign in with your Ethereum account:
//! ${address}
//!
//! ${statement}
//!
//! URI: ${uri}
//! Version: 1
//! Chain ID: ${chain-id}
//! Nonce: ${nonce}
//! Issued At: ${issued-at}
//! Expiration Time: ${expiration-time}    (optional)
//! Not Before: ${not-before}              (optional)
//! Request ID: ${request-id}              (optional)
//! Resources:                             (optional)
//! - ${resources[0]}
//! ```
//!
//! Without a statement the statement line and its separator collapse into a
//! single blank line, so three line feeds follow the address.
//!
//! Each state has its own handler that looks at one token and returns a
//! [`Step`]; the driver in [`SiweParser::parse_outcome`] applies it. All
//! parse state is local to one call, so a parser can be shared freely.

use tracing::{debug, trace};

use super::fields::{
    CHAIN_ID_LABEL, EXPIRATION_TIME_LABEL, ISSUED_AT_LABEL, NONCE_LABEL, NOT_BEFORE_LABEL,
    REQUEST_ID_LABEL, RESOURCE_ENTRY_PREFIX, RESOURCES_HEADER, URI_LABEL, header_origin,
    string_field, timestamp_field, url_field, version_field,
};
use super::tokenizer::{Token, Tokenizer, tokenize};
use crate::models::{ParseOutcome, ParsedMessage, State};
use crate::utils::{AddressValidator, EthAddressValidator, resolve_origin};

/// Result of feeding one token to a state handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Field accepted, continue with the next token in the given state
    Advance(State),
    /// Optional field absent, hand the same token to the given state
    Reprocess(State),
    /// Grammar violated; stop in the current state
    Halt(&'static str),
}

/// Parser for raw Sign-In With Ethereum messages.
///
/// Address syntax is delegated to an [`AddressValidator`]; the default uses
/// [`EthAddressValidator`].
///
/// # Examples
///
/// ```
/// use siwe_inspector::SiweParser;
///
/// let parser = SiweParser::default();
/// let message = parser
///     .parse("example.com wants you to sign in with your Ethereum account:\n")
///     .unwrap();
/// assert_eq!(message.origin.unwrap().ascii_serialization(), "https://example.com");
/// assert!(!message.is_valid);
///
/// assert!(parser.parse("not a sign-in request").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SiweParser<V = EthAddressValidator> {
    validator: V,
}

impl Default for SiweParser {
    fn default() -> Self {
        Self::new(EthAddressValidator)
    }
}

impl<V: AddressValidator> SiweParser<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    /// Parse `raw` into its fields.
    ///
    /// Returns `None` when the header line is missing or its origin is
    /// malformed: the text is not a sign-in message at all. Any later
    /// failure returns the fields committed so far with `is_valid == false`.
    pub fn parse(&self, raw: &str) -> Option<ParsedMessage> {
        self.parse_outcome(raw).map(|outcome| outcome.message)
    }

    /// Like [`parse`](Self::parse), but also reports the state parsing ended in.
    pub fn parse_outcome(&self, raw: &str) -> Option<ParseOutcome> {
        let mut tokens = tokenize(raw);
        let mut message = ParsedMessage::default();
        let mut state = State::Start;

        while let Some(token) = tokens.next() {
            loop {
                match self.step(state, token, &mut tokens, &mut message) {
                    Step::Advance(next) => {
                        trace!(from = %state, to = %next, "Field accepted");
                        state = next;
                        break;
                    }
                    Step::Reprocess(next) => {
                        trace!(from = %state, to = %next, "Optional field absent");
                        state = next;
                    }
                    Step::Halt(reason) => {
                        debug!(state = %state, reason, "Stopped parsing sign-in message");
                        if state == State::Start {
                            return None;
                        }
                        return Some(ParseOutcome { message, state });
                    }
                }
            }
        }

        match state {
            State::Start => {
                debug!("Input ended before the sign-in header");
                return None;
            }
            state if state.accepts_end_of_input() => {
                message.is_valid = true;
                return Some(ParseOutcome { message, state: State::Terminal });
            }
            state => debug!(state = %state, "Input ended before all required fields"),
        }

        Some(ParseOutcome { message, state })
    }

    fn step(
        &self,
        state: State,
        token: Token<'_>,
        tokens: &mut Tokenizer<'_>,
        message: &mut ParsedMessage,
    ) -> Step {
        match state {
            State::Start => start(token, tokens, message),
            State::Address => self.address(token, tokens, message),
            State::Statement => statement(token, tokens, message),
            State::Uri => uri(token, tokens, message),
            State::Version => version(token, tokens, message),
            State::ChainId => chain_id(token, tokens, message),
            State::Nonce => nonce(token, tokens, message),
            State::IssuedAt => issued_at(token, tokens, message),
            State::ExpirationTime => expiration_time(token, tokens, message),
            State::NotBefore => not_before(token, tokens, message),
            State::RequestId => request_id(token, tokens, message),
            State::Resources => resources(token, tokens),
            State::ResourceEntry => resource_entry(token, tokens, message),
            State::Terminal => Step::Halt("unexpected input after the message"),
        }
    }

    fn address(
        &self,
        token: Token<'_>,
        tokens: &mut Tokenizer<'_>,
        message: &mut ParsedMessage,
    ) -> Step {
        let Token::Line(line) = token else {
            return Step::Halt("missing address");
        };
        if !self.validator.is_valid_address(line) {
            return Step::Halt("invalid address");
        }
        // Kept even when the line feed is missing
        message.address = Some(line.to_string());
        if !tokens.consume_delim() {
            return Step::Halt("address line not terminated");
        }
        Step::Advance(State::Statement)
    }
}

/// Parse with the default Ethereum address rules.
///
/// # Examples
///
/// ```
/// use siwe_inspector::parse_message;
///
/// let raw = "example.com wants you to sign in with your Ethereum account:\n\
///            0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2\n\
///            \n\
///            Sign in to Example\n\
///            \n\
///            URI: https://example.com/login\n\
///            Version: 1\n\
///            Chain ID: 1\n\
///            Nonce: 32891756\n\
///            Issued At: 2021-09-30T16:25:24Z";
///
/// let message = parse_message(raw).unwrap();
/// assert!(message.is_valid);
/// assert_eq!(message.statement.as_deref(), Some("Sign in to Example"));
/// ```
pub fn parse_message(raw: &str) -> Option<ParsedMessage> {
    SiweParser::default().parse(raw)
}

fn start(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("missing header");
    };
    let Some(candidate) = header_origin(line) else {
        return Step::Halt("malformed header");
    };
    let Some(origin) = resolve_origin(candidate) else {
        return Step::Halt("invalid origin");
    };
    if !tokens.consume_delim() {
        return Step::Halt("header line not terminated");
    }
    message.origin = Some(origin);
    Step::Advance(State::Address)
}

fn statement(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    if !token.is_delim() {
        return Step::Halt("missing blank line after address");
    }
    match tokens.next() {
        None => Step::Halt("message ends after address"),
        Some(Token::Delim) => Step::Advance(State::Uri),
        Some(Token::Line(text)) => {
            // End of the statement line, then the blank separator
            if !tokens.consume_delim() || !tokens.consume_delim() {
                return Step::Halt("statement not followed by a blank line");
            }
            message.statement = Some(text.to_string());
            Step::Advance(State::Uri)
        }
    }
}

fn uri(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("missing URI");
    };
    let Some(uri) = url_field(line, URI_LABEL) else {
        return Step::Halt("invalid URI");
    };
    if !tokens.consume_delim() {
        return Step::Halt("URI line not terminated");
    }
    message.uri = Some(uri);
    Step::Advance(State::Version)
}

fn version(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("missing version");
    };
    let Some(version) = version_field(line) else {
        return Step::Halt("unsupported version");
    };
    if !tokens.consume_delim() {
        return Step::Halt("version line not terminated");
    }
    message.version = Some(version);
    Step::Advance(State::ChainId)
}

fn chain_id(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("missing chain id");
    };
    let Some(chain_id) = string_field(line, CHAIN_ID_LABEL) else {
        return Step::Halt("invalid chain id");
    };
    if !tokens.consume_delim() {
        return Step::Halt("chain id line not terminated");
    }
    message.chain_id = Some(chain_id.to_string());
    Step::Advance(State::Nonce)
}

fn nonce(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("missing nonce");
    };
    let Some(nonce) = string_field(line, NONCE_LABEL) else {
        return Step::Halt("invalid nonce");
    };
    if !tokens.consume_delim() {
        return Step::Halt("nonce line not terminated");
    }
    message.nonce = Some(nonce.to_string());
    Step::Advance(State::IssuedAt)
}

// From here on the last line of the message may end without a line feed.

fn issued_at(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("missing issued at");
    };
    let Some(issued_at) = timestamp_field(line, ISSUED_AT_LABEL) else {
        return Step::Halt("invalid issued at");
    };
    if !tokens.consume_delim_or_end() {
        return Step::Halt("issued at line not terminated");
    }
    message.issued_at = Some(issued_at);
    Step::Advance(State::ExpirationTime)
}

fn expiration_time(
    token: Token<'_>,
    tokens: &mut Tokenizer<'_>,
    message: &mut ParsedMessage,
) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("blank line in optional fields");
    };
    if !line.starts_with(EXPIRATION_TIME_LABEL) {
        return Step::Reprocess(State::NotBefore);
    }
    let Some(expiration_time) = timestamp_field(line, EXPIRATION_TIME_LABEL) else {
        return Step::Halt("invalid expiration time");
    };
    if !tokens.consume_delim_or_end() {
        return Step::Halt("expiration time line not terminated");
    }
    message.expiration_time = Some(expiration_time);
    Step::Advance(State::NotBefore)
}

fn not_before(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("blank line in optional fields");
    };
    if !line.starts_with(NOT_BEFORE_LABEL) {
        return Step::Reprocess(State::RequestId);
    }
    let Some(not_before) = timestamp_field(line, NOT_BEFORE_LABEL) else {
        return Step::Halt("invalid not before");
    };
    if !tokens.consume_delim_or_end() {
        return Step::Halt("not before line not terminated");
    }
    message.not_before = Some(not_before);
    Step::Advance(State::RequestId)
}

fn request_id(token: Token<'_>, tokens: &mut Tokenizer<'_>, message: &mut ParsedMessage) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("blank line in optional fields");
    };
    if !line.starts_with(REQUEST_ID_LABEL) {
        return Step::Reprocess(State::Resources);
    }
    let Some(request_id) = string_field(line, REQUEST_ID_LABEL) else {
        return Step::Halt("invalid request id");
    };
    if !tokens.consume_delim_or_end() {
        return Step::Halt("request id line not terminated");
    }
    message.request_id = Some(request_id.to_string());
    Step::Advance(State::Resources)
}

fn resources(token: Token<'_>, tokens: &mut Tokenizer<'_>) -> Step {
    // Last optional field, so anything else here is out of order or unknown
    if token != Token::Line(RESOURCES_HEADER) {
        return Step::Halt("unexpected line after issued at");
    }
    if !tokens.consume_delim_or_end() {
        return Step::Halt("resources line not terminated");
    }
    Step::Advance(State::ResourceEntry)
}

fn resource_entry(
    token: Token<'_>,
    tokens: &mut Tokenizer<'_>,
    message: &mut ParsedMessage,
) -> Step {
    let Token::Line(line) = token else {
        return Step::Halt("blank line in resources");
    };
    let Some(resource) = url_field(line, RESOURCE_ENTRY_PREFIX) else {
        return Step::Halt("invalid resource");
    };
    if !tokens.consume_delim_or_end() {
        return Step::Halt("resource line not terminated");
    }
    message.resources.push(resource);
    Step::Advance(State::ResourceEntry)
}
