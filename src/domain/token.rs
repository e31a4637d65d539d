//! Token and Trending Types
//!
//! Strict internal shapes for tokens, their liquidity pools and trending
//! entries. Values are produced fresh on every fetch and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Events-map key holding the 24-hour price change
pub const EVENT_WINDOW_24H: &str = "24h";

/// Token identity record. `mint` is the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub symbol: String,
    pub mint: String,
    pub decimals: u8,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// A figure quoted both in USD and in the pool's quote currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DualQuote {
    pub usd: f64,
    pub quote: f64,
}

/// 24-hour transaction statistics for a pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TxnStats {
    pub volume_24h: f64,
    pub buys: u64,
    pub sells: u64,
    pub total: u64,
}

/// A liquidity venue for a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: String,
    pub price: DualQuote,
    pub market_cap: DualQuote,
    pub liquidity: DualQuote,
    pub txns: TxnStats,
}

/// One row of the trending list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub token: Token,
    /// Pools in provider order; the first one is the primary pool
    pub pools: Vec<Pool>,
    /// Time-window label ("24h", ...) to price change percentage
    pub events: BTreeMap<String, f64>,
}

impl TrendingEntry {
    /// First pool in provider order, if the token has any
    pub fn primary_pool(&self) -> Option<&Pool> {
        self.pools.first()
    }

    /// 24h price change percentage. Missing history counts as neutral.
    pub fn price_change_24h(&self) -> f64 {
        self.events.get(EVENT_WINDOW_24H).copied().unwrap_or(0.0)
    }

    pub fn price_usd(&self) -> Option<f64> {
        self.primary_pool().map(|p| p.price.usd)
    }

    pub fn volume_24h(&self) -> Option<f64> {
        self.primary_pool().map(|p| p.txns.volume_24h)
    }

    pub fn market_cap_usd(&self) -> Option<f64> {
        self.primary_pool().map(|p| p.market_cap.usd)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown timeframe '{0}', expected one of 1h, 6h, 24h")]
pub struct TimeframeParseError(pub String);

/// Trending ranking window offered by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "24h")]
    OneDay,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::OneHour, Timeframe::SixHours, Timeframe::OneDay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::SixHours => "6h",
            Timeframe::OneDay => "24h",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1h" => Ok(Timeframe::OneHour),
            "6h" => Ok(Timeframe::SixHours),
            "24h" => Ok(Timeframe::OneDay),
            other => Err(TimeframeParseError(other.to_string())),
        }
    }
}
