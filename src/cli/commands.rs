use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};

use super::logging::init_logging;
use crate::models::{ParseOutcome, ParsedMessage};
use crate::parsers::SiweParser;
use crate::utils::read_message;

/// Exit status for `--strict` when the message parsed only partially
const EXIT_INCOMPLETE: u8 = 2;

#[derive(Parser)]
#[command(name = "siwe-inspector")]
#[command(version = "0.1.0")]
#[command(about = "Inspect Sign-In With Ethereum (EIP-4361) messages", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a message and show its fields
    Parse {
        /// Message file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 2 unless the message is complete and valid
        #[arg(long)]
        strict: bool,
    },
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Parse { file, json, strict }) => {
            parse_command(file.as_deref(), *json, *strict)
        }
        None => {
            println!("Use --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_command(file: Option<&Path>, json: bool, strict: bool) -> Result<ExitCode> {
    let raw = read_message(file)?;

    let Some(outcome) = SiweParser::default().parse_outcome(&raw) else {
        bail!("Input is not a Sign-In With Ethereum message (missing or malformed header)");
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&outcome).context("Failed to serialize parse result")?;
        println!("{}", rendered);
    } else {
        print!("{}", format_report(&outcome));
    }

    if strict && !outcome.message.is_valid {
        eprintln!("Warning: message is incomplete (stopped at {})", outcome.state);
        return Ok(ExitCode::from(EXIT_INCOMPLETE));
    }

    Ok(ExitCode::SUCCESS)
}

/// Human-readable summary of a parse result
pub fn format_report(outcome: &ParseOutcome) -> String {
    let message = &outcome.message;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Sign-In With Ethereum Message");
    let _ = writeln!(out, "=============================");
    if message.is_valid {
        let _ = writeln!(out, "Status: valid");
    } else {
        let _ = writeln!(out, "Status: incomplete (stopped at {})", outcome.state);
    }
    let _ = writeln!(out);

    let origin = message.origin.as_ref().map(|origin| origin.ascii_serialization());
    write_field(&mut out, "Origin", origin.as_deref());
    write_field(&mut out, "Address", message.address.as_deref());
    write_field(&mut out, "Statement", message.statement.as_deref());
    write_field(&mut out, "URI", message.uri.as_ref().map(|uri| uri.as_str()));
    write_field(&mut out, "Version", message.version.map(|v| v.to_string()).as_deref());
    write_field(&mut out, "Chain ID", message.chain_id.as_deref());
    write_field(&mut out, "Nonce", message.nonce.as_deref());
    write_field(&mut out, "Issued At", message.issued_at.map(|t| t.to_rfc3339()).as_deref());

    if let Some(expiration_time) = message.expiration_time {
        let _ = writeln!(out, "Expiration Time: {}", expiration_time.to_rfc3339());
    }
    if let Some(not_before) = message.not_before {
        let _ = writeln!(out, "Not Before: {}", not_before.to_rfc3339());
    }
    if let Some(request_id) = &message.request_id {
        let _ = writeln!(out, "Request ID: {}", request_id);
    }
    if !message.resources.is_empty() {
        let _ = writeln!(out, "Resources:");
        for resource in &message.resources {
            let _ = writeln!(out, "  - {}", resource);
        }
    }

    if has_time_bounds(message) {
        let status = if message.is_within_validity_window(Utc::now()) {
            "within validity window"
        } else {
            "outside validity window"
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "Time check: {}", status);
    }

    out
}

fn write_field(out: &mut String, label: &str, value: Option<&str>) {
    let _ = writeln!(out, "{}: {}", label, value.unwrap_or("-"));
}

fn has_time_bounds(message: &ParsedMessage) -> bool {
    message.expiration_time.is_some() || message.not_before.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::State;
    use crate::parsers::parse_message;

    const HEADER: &str = "example.com wants you to sign in with your Ethereum account:\n";

    #[test]
    fn test_format_report_partial() {
        let outcome = SiweParser::default().parse_outcome(HEADER).unwrap();
        let report = format_report(&outcome);

        assert!(report.contains("Status: incomplete (stopped at address)"));
        assert!(report.contains("Origin: https://example.com"));
        assert!(report.contains("Address: -"));
        assert!(!report.contains("Resources:"));
        assert!(!report.contains("Time check"));
    }

    #[test]
    fn test_format_report_valid_with_tail() {
        let raw = format!(
            "{}0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2\n\n\n\
             URI: https://example.com/login\nVersion: 1\nChain ID: 1\nNonce: 32891756\n\
             Issued At: 2021-09-30T16:25:24Z\nExpiration Time: 2000-01-01T00:00:00Z\n\
             Resources:\n- https://example.com/a",
            HEADER
        );
        let outcome = SiweParser::default().parse_outcome(&raw).unwrap();
        let report = format_report(&outcome);

        assert!(report.contains("Status: valid"));
        assert!(report.contains("Statement: -"));
        assert!(report.contains("Version: 1"));
        assert!(report.contains("Expiration Time: 2000-01-01T00:00:00+00:00"));
        assert!(report.contains("  - https://example.com/a"));
        assert!(report.contains("Time check: outside validity window"));
    }

    #[test]
    fn test_has_time_bounds() {
        let message = parse_message(HEADER).unwrap();
        assert!(!has_time_bounds(&message));
    }

    #[test]
    fn test_cli_parses_strict_json() {
        let args = ["siwe-inspector", "-vv", "parse", "--json", "--strict", "msg.txt"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Parse { file, json, strict }) => {
                assert_eq!(file, Some(PathBuf::from("msg.txt")));
                assert!(json);
                assert!(strict);
            }
            None => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_state_display_used_in_report() {
        assert_eq!(State::ChainId.to_string(), "chain id");
    }
}
