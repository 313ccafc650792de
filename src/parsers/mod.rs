//! Parsers for Sign-In With Ethereum messages.
//!
//! # Error Handling Strategy
//!
//! Parsing never fails with an error and never panics. Malformed input is
//! always a reportable outcome, in one of two tiers:
//!
//! - **Not a message**: the header line is missing, malformed, or names an
//!   unusable origin. The parser returns `None`.
//!
//! - **Partial message**: any later line breaks the grammar. The parser stops
//!   at that line and returns every field accepted before it, with
//!   `is_valid == false`. Callers can see how far a suspicious message got.
//!
//! Fields are committed only after their line has been fully validated and
//! terminated. The address is the one exception: a valid address is kept
//! even when its line feed is missing.
//! Reasons for stopping are logged at `debug` level via `tracing`.

pub mod fields;
pub mod serializers;
pub mod siwe;
pub mod tokenizer;

pub use siwe::{SiweParser, parse_message};
pub use tokenizer::{Token, Tokenizer, tokenize};
