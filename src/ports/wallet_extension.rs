//! Wallet Extension Port
//!
//! Capability interface for an installed wallet extension. The extension owns
//! its connection state; callers only observe it. A provider hands out the
//! extension once it has loaded, and may return `None` until then.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by the extension itself
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionError {
    /// The user declined the extension's consent prompt
    #[error("User rejected the request")]
    Rejected,

    #[error("{0}")]
    Other(String),
}

/// An injected wallet extension
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// True when the object identifies itself as a Solana wallet
    fn is_solana_wallet(&self) -> bool;

    fn is_connected(&self) -> bool;

    /// Base58 public key while connected
    fn public_key(&self) -> Option<String>;

    /// Ask the user to connect; resolves to the public key
    async fn connect(&self) -> Result<String, ExtensionError>;

    async fn disconnect(&self) -> Result<(), ExtensionError>;
}

/// Locates the extension, which may appear some time after startup
pub trait WalletExtensionProvider: Send + Sync {
    fn locate(&self) -> Option<Arc<dyn WalletExtension>>;
}
