//! Terminal rendering
//!
//! Plain-text cards for the trending list, wallet holdings and connection
//! state, plus a JSON mode for piping into other tools.

use std::fmt::Write as _;

use serde::Serialize;

use crate::application::wallet_bridge::ConnectionState;
use crate::domain::address::ValidationResult;
use crate::domain::portfolio::WalletPortfolio;
use crate::domain::token::{Timeframe, TrendingEntry};

pub const NO_TRENDING_TOKENS: &str = "No trending tokens found";
pub const NO_TOKEN_HOLDINGS: &str = "No token holdings found";

/// Price in USD with 6 decimals
pub fn format_price(usd: f64) -> String {
    format!("${:.6}", usd)
}

/// Signed percentage with 2 decimals
pub fn format_change(percent: f64) -> String {
    format!("{:+.2}%", percent)
}

/// Thousands-grouped number with at most 3 fraction digits
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Trending list as text cards
pub fn render_trending(entries: &[TrendingEntry], timeframe: Timeframe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Trending tokens ({})", timeframe);

    if entries.is_empty() {
        let _ = writeln!(out, "{}", NO_TRENDING_TOKENS);
        return out;
    }

    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "#{} {} ({})", rank + 1, entry.token.name, entry.token.symbol);
        let _ = writeln!(out, "   Mint:       {}", entry.token.mint);

        match entry.primary_pool() {
            Some(pool) => {
                let _ = writeln!(out, "   Price:      {}", format_price(pool.price.usd));
                let _ = writeln!(out, "   24h Change: {}", format_change(entry.price_change_24h()));
                let _ = writeln!(out, "   Volume 24h: ${}", format_grouped(pool.txns.volume_24h));
                let _ = writeln!(out, "   Market Cap: ${}", format_grouped(pool.market_cap.usd));
            }
            None => {
                let _ = writeln!(out, "   24h Change: {}", format_change(entry.price_change_24h()));
                let _ = writeln!(out, "   No pools");
            }
        }
    }
    out
}

/// Wallet holdings as a text card
pub fn render_wallet(address: &str, portfolio: &WalletPortfolio) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Wallet {}", address);
    let _ = writeln!(out, "   Total Value: ${:.2}", portfolio.total);
    let _ = writeln!(out, "   SOL Value:   {:.4} SOL", portfolio.total_sol);
    match portfolio.updated_at() {
        Some(updated) => {
            let _ = writeln!(out, "   Last updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None if !portfolio.timestamp.trim().is_empty() => {
            let _ = writeln!(out, "   Last updated: {}", portfolio.timestamp.trim());
        }
        None => {}
    }
    let _ = writeln!(out);

    if portfolio.is_empty() {
        let _ = writeln!(out, "{}", NO_TOKEN_HOLDINGS);
        return out;
    }

    let _ = writeln!(out, "Holdings ({})", portfolio.tokens.len());
    for holding in &portfolio.tokens {
        let _ = writeln!(
            out,
            "   {:<10} {} {}  ${:.2}",
            holding.token.symbol,
            format_grouped(holding.balance),
            holding.token.symbol,
            holding.value
        );
    }
    out
}

/// Outcome of an address check
pub fn render_validation(address: &str, result: &ValidationResult) -> String {
    match result.reason() {
        None => format!("{} is a valid Solana address", address.trim()),
        Some(reason) => format!("Invalid Solana wallet address: {}", reason),
    }
}

/// Connection state line
pub fn render_connection(state: &ConnectionState) -> String {
    match (&state.public_key, state.connected) {
        (Some(key), true) => format!("Connected: {}", key),
        _ => "Not connected".to_string(),
    }
}

/// Pretty JSON for `--format json`
pub fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
