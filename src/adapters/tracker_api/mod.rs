//! Solana Tracker Adapter
//!
//! Client for the Solana Tracker data API and the adapters that turn its
//! untyped JSON into domain types:
//! - `TrackerApiClient`: single-attempt HTTP client, implements `TrackerDataPort`
//! - `TrendingDataAdapter`: `/tokens/trending/{timeframe}`
//! - `WalletDataAdapter`: `/wallet/{address}`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use solana_tracker::adapters::tracker_api::{TrackerApiClient, TrackerApiConfig, TrendingDataAdapter};
//! use solana_tracker::domain::Timeframe;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TrackerApiClient::with_config(TrackerApiConfig::default().with_api_key("key"))?;
//!     let trending = TrendingDataAdapter::new(Arc::new(client));
//!
//!     for entry in trending.get_trending(Timeframe::OneHour).await? {
//!         println!("{} {:?}", entry.token.symbol, entry.price_usd());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod trending;
mod wallet;
pub mod wire;

pub use client::{TrackerApiClient, TrackerApiConfig, API_KEY_HEADER, DEFAULT_API_BASE_URL};
pub use trending::{normalize_trending, trending_path, TrendingDataAdapter};
pub use wallet::{normalize_wallet, wallet_path, WalletDataAdapter};
