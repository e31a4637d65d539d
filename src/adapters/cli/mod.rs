//! CLI Adapter
//!
//! Command-line interface for the Solana Tracker client.
//! Uses clap derive macros for argument parsing.

mod commands;
pub mod render;

pub use commands::{CliApp, Command, ConnectCmd, OutputFormat, TrendingCmd, ValidateCmd, WalletCmd};
