//! Application Layer - Use cases on top of the ports
//!
//! - `views`: trending and wallet view controllers with stale-response guards
//! - `wallet_bridge`: wallet extension detection and connect/disconnect

pub mod views;
pub mod wallet_bridge;

pub use views::{TrendingView, WalletView};
pub use wallet_bridge::{
    ConnectionState, PollSchedule, WalletBridgeError, WalletProviderBridge,
    DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL,
};
