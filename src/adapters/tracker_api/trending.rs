//! Trending Data Adapter
//!
//! Fetches the provider's trending list for a timeframe and normalizes it
//! into `TrendingEntry` values. Provider order is the trending rank and is
//! kept as-is.

use std::sync::Arc;

use serde_json::Value;

use super::wire::RawTrendingEntry;
use crate::domain::token::{Timeframe, TrendingEntry};
use crate::ports::data_provider::{TrackerDataPort, TrackerError};

/// API path for a trending timeframe
pub fn trending_path(timeframe: Timeframe) -> String {
    format!("/tokens/trending/{}", timeframe)
}

/// Normalizes trending-token responses
#[derive(Clone)]
pub struct TrendingDataAdapter {
    provider: Arc<dyn TrackerDataPort>,
}

impl TrendingDataAdapter {
    pub fn new(provider: Arc<dyn TrackerDataPort>) -> Self {
        Self { provider }
    }

    /// Trending tokens for `timeframe`, in provider rank order
    pub async fn get_trending(&self, timeframe: Timeframe) -> Result<Vec<TrendingEntry>, TrackerError> {
        let body = self.provider.request(&trending_path(timeframe)).await?;
        Ok(normalize_trending(body))
    }
}

/// Convert a raw trending body. Anything but an array means "no data".
pub fn normalize_trending(body: Value) -> Vec<TrendingEntry> {
    let items = match body {
        Value::Array(items) => items,
        Value::Null => {
            tracing::debug!("Trending response was empty");
            return Vec::new();
        }
        other => {
            tracing::debug!("Trending response was not a list ({}), treating as empty", json_kind(&other));
            return Vec::new();
        }
    };

    let received = items.len();
    let entries: Vec<TrendingEntry> = items
        .into_iter()
        .enumerate()
        .filter_map(|(rank, item)| {
            if !item.is_object() {
                tracing::warn!("Skipping trending item #{}: not an object", rank + 1);
                return None;
            }
            let entry = serde_json::from_value::<RawTrendingEntry>(item)
                .ok()
                .and_then(RawTrendingEntry::into_entry);
            if entry.is_none() {
                tracing::warn!("Skipping trending item #{}: missing token mint", rank + 1);
            }
            entry
        })
        .collect();

    tracing::debug!("Normalized {}/{} trending entries", entries.len(), received);
    entries
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
