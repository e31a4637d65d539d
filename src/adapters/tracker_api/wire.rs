//! Wire Types
//!
//! Loosely-typed mirrors of the provider's JSON. Every field is optional and
//! numbers may arrive as numbers, numeric strings or null. Conversion into
//! the strict domain types happens here and nowhere else: malformed
//! sub-fields fall back to defaults, records without a mint are dropped.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::portfolio::{WalletPortfolio, WalletTokenBalance};
use crate::domain::token::{DualQuote, Pool, Token, TrendingEntry, TxnStats};

/// Accept a number, a numeric string, or anything else as `None`
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|n| n.is_finite()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Counts must be non-negative whole numbers
fn to_count(value: Option<f64>) -> u64 {
    value.filter(|v| *v >= 0.0).map(|v| v as u64).unwrap_or(0)
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| *v >= 0.0).unwrap_or(0.0)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawToken {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub mint: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub decimals: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl RawToken {
    /// `None` when the record has no usable mint
    pub fn into_token(self) -> Option<Token> {
        let mint = self.mint.map(|m| m.trim().to_string()).filter(|m| !m.is_empty())?;
        let decimals = self
            .decimals
            .filter(|d| *d >= 0.0 && *d <= u8::MAX as f64)
            .map(|d| d as u8)
            .unwrap_or(0);

        Some(Token {
            name: self.name.unwrap_or_default(),
            symbol: self.symbol.unwrap_or_default(),
            mint,
            decimals,
            image: self.image.filter(|s| !s.is_empty()),
            description: self.description.filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDualQuote {
    #[serde(deserialize_with = "lenient_f64")]
    pub usd: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub quote: Option<f64>,
}

impl From<RawDualQuote> for DualQuote {
    fn from(raw: RawDualQuote) -> Self {
        DualQuote {
            usd: raw.usd.unwrap_or(0.0),
            quote: raw.quote.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTxns {
    #[serde(rename = "volume24h", deserialize_with = "lenient_f64")]
    pub volume_24h: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub buys: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sells: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: Option<f64>,
}

impl From<RawTxns> for TxnStats {
    fn from(raw: RawTxns) -> Self {
        TxnStats {
            volume_24h: non_negative(raw.volume_24h),
            buys: to_count(raw.buys),
            sells: to_count(raw.sells),
            total: to_count(raw.total),
        }
    }
}

/// Sub-objects that are present but not objects decode as defaults
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPool {
    #[serde(deserialize_with = "lenient_string")]
    pub pool_id: Option<String>,
    #[serde(deserialize_with = "lenient_object")]
    pub price: RawDualQuote,
    #[serde(deserialize_with = "lenient_object")]
    pub market_cap: RawDualQuote,
    #[serde(deserialize_with = "lenient_object")]
    pub liquidity: RawDualQuote,
    #[serde(deserialize_with = "lenient_object")]
    pub txns: RawTxns,
}

impl From<RawPool> for Pool {
    fn from(raw: RawPool) -> Self {
        Pool {
            pool_id: raw.pool_id.unwrap_or_default(),
            price: raw.price.into(),
            market_cap: raw.market_cap.into(),
            liquidity: raw.liquidity.into(),
            txns: raw.txns.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(deserialize_with = "lenient_f64")]
    pub price_change_percentage: Option<f64>,
}

/// Keep the array elements that are objects
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_events<'de, D>(deserializer: D) -> Result<HashMap<String, RawEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter(|(_, v)| v.is_object())
            .filter_map(|(k, v)| serde_json::from_value(v).ok().map(|event| (k, event)))
            .collect(),
        _ => HashMap::new(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTrendingEntry {
    #[serde(deserialize_with = "lenient_object")]
    pub token: RawToken,
    #[serde(deserialize_with = "lenient_vec")]
    pub pools: Vec<RawPool>,
    #[serde(deserialize_with = "lenient_events")]
    pub events: HashMap<String, RawEvent>,
}

impl RawTrendingEntry {
    pub fn into_entry(self) -> Option<TrendingEntry> {
        let token = self.token.into_token()?;
        let events = self
            .events
            .into_iter()
            .filter_map(|(window, event)| event.price_change_percentage.map(|pct| (window, pct)))
            .collect();

        Some(TrendingEntry {
            token,
            pools: self.pools.into_iter().map(Pool::from).collect(),
            events,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawWalletTokenBalance {
    #[serde(deserialize_with = "lenient_object")]
    pub token: RawToken,
    #[serde(deserialize_with = "lenient_f64")]
    pub balance: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

impl RawWalletTokenBalance {
    pub fn into_balance(self) -> Option<WalletTokenBalance> {
        let token = self.token.into_token()?;
        Some(WalletTokenBalance {
            token,
            balance: non_negative(self.balance),
            value: self.value.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawWalletInfo {
    #[serde(deserialize_with = "lenient_vec")]
    pub tokens: Vec<RawWalletTokenBalance>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_sol: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

impl RawWalletInfo {
    /// Convert, returning the portfolio and the number of dropped holdings
    pub fn into_portfolio(self) -> (WalletPortfolio, usize) {
        let received = self.tokens.len();
        let tokens: Vec<WalletTokenBalance> = self
            .tokens
            .into_iter()
            .filter_map(RawWalletTokenBalance::into_balance)
            .collect();
        let dropped = received - tokens.len();

        let portfolio = WalletPortfolio {
            tokens,
            total: self.total.unwrap_or(0.0),
            total_sol: self.total_sol.unwrap_or(0.0),
            timestamp: self.timestamp.unwrap_or_default(),
        };
        (portfolio, dropped)
    }
}
