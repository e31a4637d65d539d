//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Tracker API: Solana Tracker REST client and response normalization
//! - Wallet Extension: keypair-file wallet standing in for a browser extension
//! - CLI: Command-line interface and terminal rendering

pub mod tracker_api;
pub mod wallet_extension;
pub mod cli;

pub use tracker_api::{TrackerApiClient, TrackerApiConfig, TrendingDataAdapter, WalletDataAdapter};
pub use wallet_extension::{KeypairWallet, KeypairWalletProvider};
pub use cli::CliApp;
