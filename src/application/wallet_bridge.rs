//! Wallet Provider Bridge
//!
//! Detects an injected wallet extension and exposes connect / disconnect /
//! connection-state operations on top of it. The extension is located through
//! a provider passed in at construction, never through global state, and may
//! only become available some time after startup.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::ports::wallet_extension::{ExtensionError, WalletExtension, WalletExtensionProvider};

/// Default number of availability polls
pub const DEFAULT_POLL_ATTEMPTS: u32 = 2;

/// Default delay between availability polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletBridgeError {
    #[error("Wallet extension not found")]
    WalletUnavailable,

    #[error("Connection request was rejected by the user")]
    UserRejected,

    #[error("Failed to connect wallet: {0}")]
    ConnectFailed(String),

    #[error("Failed to disconnect wallet: {0}")]
    DisconnectFailed(String),
}

/// Snapshot of the extension's connection state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    pub connected: bool,
    pub public_key: Option<String>,
}

/// How often to re-check for a late-loading extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// Total polls, including the first immediate one
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_POLL_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Bridge between the application and an injected wallet extension
pub struct WalletProviderBridge {
    provider: Arc<dyn WalletExtensionProvider>,
}

impl WalletProviderBridge {
    pub fn new(provider: Arc<dyn WalletExtensionProvider>) -> Self {
        Self { provider }
    }

    fn extension(&self) -> Option<Arc<dyn WalletExtension>> {
        self.provider
            .locate()
            .filter(|ext| ext.is_solana_wallet())
    }

    /// Whether a wallet extension is installed right now. A negative answer
    /// early on is not final; see `wait_until_available`.
    pub fn is_available(&self) -> bool {
        self.extension().is_some()
    }

    /// Poll until the extension shows up or the schedule runs out
    pub async fn wait_until_available(&self, schedule: PollSchedule) -> bool {
        for attempt in 0..schedule.attempts.max(1) {
            if attempt > 0 {
                tokio::time::sleep(schedule.interval).await;
            }
            if self.is_available() {
                tracing::debug!("Wallet extension found on poll {}", attempt + 1);
                return true;
            }
        }
        tracing::debug!("Wallet extension not found after {} polls", schedule.attempts.max(1));
        false
    }

    /// Current connection state as reported by the extension
    pub fn connection_state(&self) -> ConnectionState {
        match self.extension() {
            Some(ext) => {
                let public_key = ext.public_key();
                ConnectionState {
                    connected: ext.is_connected() && public_key.is_some(),
                    public_key,
                }
            }
            None => ConnectionState::default(),
        }
    }

    /// Ask the extension to connect; resolves to the wallet's public key
    pub async fn connect(&self) -> Result<String, WalletBridgeError> {
        let ext = self.extension().ok_or(WalletBridgeError::WalletUnavailable)?;

        match ext.connect().await {
            Ok(public_key) => {
                tracing::info!("Wallet connected: {}", public_key);
                Ok(public_key)
            }
            Err(ExtensionError::Rejected) => {
                tracing::info!("Wallet connection rejected by user");
                Err(WalletBridgeError::UserRejected)
            }
            Err(ExtensionError::Other(message)) => {
                tracing::warn!("Wallet connection failed: {}", message);
                Err(WalletBridgeError::ConnectFailed(message))
            }
        }
    }

    /// Disconnect; a no-op when there is no extension or nothing connected
    pub async fn disconnect(&self) -> Result<(), WalletBridgeError> {
        let Some(ext) = self.extension() else {
            return Ok(());
        };
        if !ext.is_connected() {
            return Ok(());
        }

        ext.disconnect().await.map_err(|e| {
            tracing::warn!("Wallet disconnect failed: {}", e);
            WalletBridgeError::DisconnectFailed(e.to_string())
        })?;
        tracing::info!("Wallet disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{ConnectBehavior, MockExtensionProvider, MockWalletExtension};

    const KEY: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtVhAW5Q5pge4j1";

    fn bridge_with(ext: MockWalletExtension) -> (WalletProviderBridge, Arc<MockWalletExtension>) {
        let ext = Arc::new(ext);
        let provider = Arc::new(MockExtensionProvider::installed(Arc::clone(&ext)));
        (WalletProviderBridge::new(provider), ext)
    }

    #[test]
    fn test_absent_extension() {
        let bridge = WalletProviderBridge::new(Arc::new(MockExtensionProvider::absent()));
        assert!(!bridge.is_available());
        assert_eq!(bridge.connection_state(), ConnectionState::default());
    }

    #[tokio::test]
    async fn test_connect_without_extension() {
        let bridge = WalletProviderBridge::new(Arc::new(MockExtensionProvider::absent()));
        assert_eq!(bridge.connect().await, Err(WalletBridgeError::WalletUnavailable));
        assert_eq!(bridge.disconnect().await, Ok(()));
    }

    #[tokio::test]
    async fn test_non_solana_extension_is_ignored() {
        let (bridge, ext) = bridge_with(MockWalletExtension::new(KEY, ConnectBehavior::Approve).not_solana().connected());
        assert!(!bridge.is_available());
        assert_eq!(bridge.connection_state(), ConnectionState::default());
        assert_eq!(bridge.connect().await, Err(WalletBridgeError::WalletUnavailable));
        assert_eq!(bridge.disconnect().await, Ok(()));
        assert!(ext.get_calls().is_empty());
    }

    #[tokio::test]
    async fn test_connect_approved() {
        let (bridge, _ext) = bridge_with(MockWalletExtension::new(KEY, ConnectBehavior::Approve));
        assert!(bridge.is_available());
        assert!(!bridge.connection_state().connected);

        assert_eq!(bridge.connect().await, Ok(KEY.to_string()));
        let state = bridge.connection_state();
        assert!(state.connected);
        assert_eq!(state.public_key.as_deref(), Some(KEY));
    }

    #[tokio::test]
    async fn test_connect_rejected() {
        let (bridge, _ext) = bridge_with(MockWalletExtension::new(KEY, ConnectBehavior::Reject));
        assert_eq!(bridge.connect().await, Err(WalletBridgeError::UserRejected));
        assert!(!bridge.connection_state().connected);
    }

    #[tokio::test]
    async fn test_connect_failed() {
        let (bridge, _ext) = bridge_with(MockWalletExtension::new(
            KEY,
            ConnectBehavior::Fail("extension locked".to_string()),
        ));
        assert_eq!(
            bridge.connect().await,
            Err(WalletBridgeError::ConnectFailed("extension locked".to_string()))
        );
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let (bridge, ext) = bridge_with(MockWalletExtension::new(KEY, ConnectBehavior::Approve).connected());
        assert!(bridge.connection_state().connected);

        assert_eq!(bridge.disconnect().await, Ok(()));
        assert_eq!(bridge.disconnect().await, Ok(()));
        assert!(!bridge.connection_state().connected);
        assert_eq!(ext.get_calls(), vec!["disconnect"]);
    }

    #[tokio::test]
    async fn test_disconnect_failure_surfaces() {
        let (bridge, _ext) = bridge_with(
            MockWalletExtension::new(KEY, ConnectBehavior::Approve)
                .connected()
                .with_disconnect_error("busy"),
        );
        assert_eq!(
            bridge.disconnect().await,
            Err(WalletBridgeError::DisconnectFailed("busy".to_string()))
        );
    }

    #[tokio::test]
    async fn test_late_extension_found_on_later_poll() {
        let ext = Arc::new(MockWalletExtension::new(KEY, ConnectBehavior::Approve));
        let provider = Arc::new(MockExtensionProvider::loading(ext, 1));
        let bridge = WalletProviderBridge::new(provider.clone());

        let schedule = PollSchedule {
            attempts: 3,
            interval: Duration::from_millis(5),
        };
        assert!(bridge.wait_until_available(schedule).await);
        assert_eq!(provider.poll_count(), 2);
    }

    #[tokio::test]
    async fn test_wait_gives_up() {
        let provider = Arc::new(MockExtensionProvider::absent());
        let bridge = WalletProviderBridge::new(provider.clone());

        let schedule = PollSchedule {
            attempts: 3,
            interval: Duration::from_millis(1),
        };
        assert!(!bridge.wait_until_available(schedule).await);
        assert_eq!(provider.poll_count(), 3);
    }
}
