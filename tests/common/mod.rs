//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const HEADER_SUFFIX: &str = " wants you to sign in with your Ethereum account:";
pub const ADDRESS: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
pub const URI: &str = "https://example.com/login";
pub const NONCE: &str = "32891756";
pub const ISSUED_AT: &str = "2021-09-30T16:25:24Z";

/// Header line for `origin`, including its line feed
pub fn header(origin: &str) -> String {
    format!("{}{}\n", origin, HEADER_SUFFIX)
}

/// Message text up to and including the nonce line
pub fn through_nonce() -> String {
    format!(
        "{}{}\n\n\nURI: {}\nVersion: 1\nChain ID: 1\nNonce: {}\n",
        header("example.com"),
        ADDRESS,
        URI,
        NONCE
    )
}

/// Message text up to and including the issued at line
pub fn through_issued_at() -> String {
    format!("{}Issued At: {}\n", through_nonce(), ISSUED_AT)
}

/// Builder for complete EIP-4361 message text
pub struct MessageBuilder {
    origin: String,
    address: String,
    statement: Option<String>,
    uri: String,
    version: String,
    chain_id: String,
    nonce: String,
    issued_at: String,
    expiration_time: Option<String>,
    not_before: Option<String>,
    request_id: Option<String>,
    resources: Option<Vec<String>>,
    trailing_newline: bool,
}

impl MessageBuilder {
    /// Create a builder for a minimal valid message
    pub fn new() -> Self {
        Self {
            origin: "example.com".to_string(),
            address: ADDRESS.to_string(),
            statement: None,
            uri: URI.to_string(),
            version: "1".to_string(),
            chain_id: "1".to_string(),
            nonce: NONCE.to_string(),
            issued_at: ISSUED_AT.to_string(),
            expiration_time: None,
            not_before: None,
            request_id: None,
            resources: None,
            trailing_newline: false,
        }
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn statement(mut self, statement: &str) -> Self {
        self.statement = Some(statement.to_string());
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = uri.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn chain_id(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    pub fn nonce(mut self, nonce: &str) -> Self {
        self.nonce = nonce.to_string();
        self
    }

    pub fn issued_at(mut self, issued_at: &str) -> Self {
        self.issued_at = issued_at.to_string();
        self
    }

    pub fn expiration_time(mut self, expiration_time: &str) -> Self {
        self.expiration_time = Some(expiration_time.to_string());
        self
    }

    pub fn not_before(mut self, not_before: &str) -> Self {
        self.not_before = Some(not_before.to_string());
        self
    }

    pub fn request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    pub fn resources(mut self, resources: &[&str]) -> Self {
        self.resources = Some(resources.iter().map(|r| r.to_string()).collect());
        self
    }

    /// End the last line with a line feed
    pub fn trailing_newline(mut self) -> Self {
        self.trailing_newline = true;
        self
    }

    /// Render the message text
    pub fn build(&self) -> String {
        let mut lines = vec![format!("{}{}", self.origin, HEADER_SUFFIX), self.address.clone()];

        lines.push(String::new());
        if let Some(statement) = &self.statement {
            lines.push(statement.clone());
            lines.push(String::new());
        } else {
            lines.push(String::new());
        }

        lines.push(format!("URI: {}", self.uri));
        lines.push(format!("Version: {}", self.version));
        lines.push(format!("Chain ID: {}", self.chain_id));
        lines.push(format!("Nonce: {}", self.nonce));
        lines.push(format!("Issued At: {}", self.issued_at));

        if let Some(expiration_time) = &self.expiration_time {
            lines.push(format!("Expiration Time: {}", expiration_time));
        }
        if let Some(not_before) = &self.not_before {
            lines.push(format!("Not Before: {}", not_before));
        }
        if let Some(request_id) = &self.request_id {
            lines.push(format!("Request ID: {}", request_id));
        }
        if let Some(resources) = &self.resources {
            lines.push("Resources:".to_string());
            for resource in resources {
                lines.push(format!("- {}", resource));
            }
        }

        let mut message = lines.join("\n");
        if self.trailing_newline {
            message.push('\n');
        }
        message
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` to a temporary message file
pub fn message_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write message file");
    file.flush().expect("Failed to flush message file");
    file
}
