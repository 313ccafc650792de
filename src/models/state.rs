use std::fmt;

use serde::Serialize;

/// Grammar position of the parser.
///
/// Variants are declared in message order, so `Ord` reflects how far a
/// message got before parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// Header line with the origin
    Start,
    Address,
    /// Blank separator and the optional statement
    Statement,
    Uri,
    Version,
    ChainId,
    Nonce,
    IssuedAt,
    ExpirationTime,
    NotBefore,
    RequestId,
    /// The `Resources:` header line
    Resources,
    /// `- <url>` lines below `Resources:`
    ResourceEntry,
    /// Accepting state
    Terminal,
}

impl State {
    /// Whether input may end cleanly while the machine is in this state.
    pub fn accepts_end_of_input(self) -> bool {
        self > State::IssuedAt
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Start => "start",
            State::Address => "address",
            State::Statement => "statement",
            State::Uri => "uri",
            State::Version => "version",
            State::ChainId => "chain id",
            State::Nonce => "nonce",
            State::IssuedAt => "issued at",
            State::ExpirationTime => "expiration time",
            State::NotBefore => "not before",
            State::RequestId => "request id",
            State::Resources => "resources",
            State::ResourceEntry => "resource entry",
            State::Terminal => "terminal",
        };
        f.write_str(name)
    }
}
