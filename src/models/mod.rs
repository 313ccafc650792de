//! Data models for parsed Sign-In With Ethereum messages.
//!
//! - [`ParsedMessage`] - The structured fields recovered from a raw message
//! - [`State`] - Position of the parser in the message grammar
//! - [`ParseOutcome`] - A parsed message together with the state parsing stopped in
//!
//! The models derive `Serialize` so the CLI can emit them as JSON. Fields that
//! need custom serialization (origins) use helpers in `parsers::serializers`.

pub mod message;
pub mod state;

pub use message::{ParseOutcome, ParsedMessage};
pub use state::State;
