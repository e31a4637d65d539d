//! CLI Commands
//!
//! Argument definitions for the solana-tracker command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::token::Timeframe;

/// Solana Tracker - trending tokens and wallet holdings from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "solana-tracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Trending Solana tokens and wallet portfolios via the Solana Tracker data API",
    long_about = "Browse trending tokens by timeframe, validate Solana addresses, look up \
                  wallet holdings and connect a local keypair wallet."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (defaults are used when it does not exist)
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show trending tokens
    Trending(TrendingCmd),

    /// Check whether a string looks like a Solana address
    Validate(ValidateCmd),

    /// Show the token holdings of a wallet
    Wallet(WalletCmd),

    /// Connect the local keypair wallet
    Connect(ConnectCmd),
}

/// Output format for data commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Show trending tokens
#[derive(Parser, Debug)]
pub struct TrendingCmd {
    /// Timeframe: 1h, 6h or 24h
    #[arg(short, long, value_name = "TIMEFRAME", default_value = "1h")]
    pub timeframe: Timeframe,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Validate an address
#[derive(Parser, Debug)]
pub struct ValidateCmd {
    /// Candidate address
    #[arg(value_name = "ADDRESS")]
    pub address: String,
}

/// Show wallet holdings
#[derive(Parser, Debug)]
pub struct WalletCmd {
    /// Wallet address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Connect the keypair wallet
#[derive(Parser, Debug)]
pub struct ConnectCmd {
    /// Override keypair path
    #[arg(long, value_name = "FILE")]
    pub keypair: Option<PathBuf>,

    /// Approve the connection without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Show the connected wallet's holdings afterwards
    #[arg(long)]
    pub show_wallet: bool,

    /// Disconnect again before exiting
    #[arg(long)]
    pub disconnect: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_defaults() {
        let app = CliApp::try_parse_from(["solana-tracker", "trending"]).unwrap();
        assert_eq!(app.config, PathBuf::from("config/default.toml"));
        match app.command {
            Command::Trending(cmd) => {
                assert_eq!(cmd.timeframe, Timeframe::OneHour);
                assert_eq!(cmd.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_trending_timeframe_and_format() {
        let app = CliApp::try_parse_from(["solana-tracker", "trending", "-t", "24h", "-f", "json"]).unwrap();
        match app.command {
            Command::Trending(cmd) => {
                assert_eq!(cmd.timeframe, Timeframe::OneDay);
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_timeframe_rejected() {
        assert!(CliApp::try_parse_from(["solana-tracker", "trending", "-t", "7d"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let app = CliApp::try_parse_from([
            "solana-tracker",
            "wallet",
            "JUP6LkbzbjS1jKwapdHNy74zc3tLUZoi5QNyVTaV4",
            "--debug",
            "-c",
            "other.toml",
        ])
        .unwrap();
        assert!(app.debug);
        assert_eq!(app.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn test_connect_flags() {
        let app = CliApp::try_parse_from([
            "solana-tracker",
            "connect",
            "--keypair",
            "/tmp/id.json",
            "--yes",
            "--show-wallet",
        ])
        .unwrap();
        match app.command {
            Command::Connect(cmd) => {
                assert_eq!(cmd.keypair, Some(PathBuf::from("/tmp/id.json")));
                assert!(cmd.yes);
                assert!(cmd.show_wallet);
                assert!(!cmd.disconnect);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
