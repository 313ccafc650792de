//! SIWE Inspector - Parse and inspect Sign-In With Ethereum (EIP-4361) messages
//!
//! This library turns the raw text a decentralized application asks a wallet
//! to sign into a structured [`ParsedMessage`]. It supports:
//!
//! - Strict, line-by-line parsing of the EIP-4361 grammar
//! - Partial results that show how far a malformed message got
//! - Pluggable account address validation via [`AddressValidator`]
//! - Optional trailing fields (expiration, not-before, request id, resources)
//!
//! # Example
//!
//! ```
//! use siwe_inspector::parse_message;
//!
//! let raw = "example.com wants you to sign in with your Ethereum account:\n\
//!            0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2\n";
//! let message = parse_message(raw).expect("header is well-formed");
//! assert_eq!(message.address.as_deref(), Some("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
//! assert!(!message.is_valid);
//! ```

pub mod cli;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use models::{ParseOutcome, ParsedMessage, State};
pub use parsers::{SiweParser, parse_message};
pub use utils::{AddressValidator, EthAddressValidator};
