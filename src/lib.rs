//! Solana Tracker - client library for the Solana Tracker data API
//!
//! Trending tokens by timeframe, wallet portfolios and a wallet-extension
//! bridge, with address validation in front of every wallet lookup.
//!
//! # Modules
//!
//! - `domain`: Core types (addresses, tokens, portfolios, view state)
//! - `ports`: Trait abstractions (TrackerDataPort, WalletExtension)
//! - `adapters`: External implementations (Tracker API, keypair wallet, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: View controllers and the wallet provider bridge

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
