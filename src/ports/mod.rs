//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement:
//! - Data provider (Solana Tracker REST API)
//! - Wallet extension (connect/disconnect capability)
//!
//! `mocks` holds recording test doubles for both.

pub mod data_provider;
pub mod wallet_extension;
pub mod mocks;

pub use data_provider::{TrackerDataPort, TrackerError};
pub use wallet_extension::{ExtensionError, WalletExtension, WalletExtensionProvider};
