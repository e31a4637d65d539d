//! Wallet Portfolio
//!
//! Holdings of a single wallet as reported by the data provider, plus a
//! consistency check between the reported total and its constituents.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::token::Token;

/// Default absolute tolerance (USD) between reported and summed totals
pub const DEFAULT_TOTAL_TOLERANCE_USD: f64 = 0.01;

/// Unix timestamps above this are treated as milliseconds
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// One held token with its balance and USD value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTokenBalance {
    pub token: Token,
    pub balance: f64,
    pub value: f64,
}

/// Aggregate holdings of a wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletPortfolio {
    pub tokens: Vec<WalletTokenBalance>,
    /// Total USD value as computed by the provider
    pub total: f64,
    /// Total value in SOL as computed by the provider
    pub total_sol: f64,
    /// Provider freshness marker, kept verbatim
    pub timestamp: String,
}

/// Result of comparing the reported total against the sum of holdings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub reported_total: f64,
    pub computed_total: f64,
    /// Absolute difference between reported and computed totals
    pub drift: f64,
    pub tolerance: f64,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.drift <= self.tolerance
    }
}

impl WalletPortfolio {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sum of per-token USD values
    pub fn computed_total(&self) -> f64 {
        self.tokens.iter().map(|t| t.value).sum()
    }

    /// Compare the provider total with the sum of holdings
    pub fn consistency(&self, tolerance: f64) -> ConsistencyReport {
        let computed_total = self.computed_total();
        ConsistencyReport {
            reported_total: self.total,
            computed_total,
            drift: (computed_total - self.total).abs(),
            tolerance,
        }
    }

    /// Find a holding by mint
    pub fn holding(&self, mint: &str) -> Option<&WalletTokenBalance> {
        self.tokens.iter().find(|t| t.token.mint == mint)
    }

    /// Parse the freshness timestamp (RFC 3339, unix seconds or millis)
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }

        let number: i64 = raw.parse().ok()?;
        if number > MILLIS_THRESHOLD {
            Utc.timestamp_millis_opt(number).single()
        } else {
            Utc.timestamp_opt(number, 0).single()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(mint: &str, value: f64) -> WalletTokenBalance {
        WalletTokenBalance {
            token: Token {
                name: format!("{} Token", mint),
                symbol: mint.to_uppercase(),
                mint: mint.to_string(),
                decimals: 9,
                image: None,
                description: None,
            },
            balance: 1.0,
            value,
        }
    }

    #[test]
    fn test_consistent_totals() {
        let portfolio = WalletPortfolio {
            tokens: vec![balance("sol", 150.25), balance("usdc", 49.75)],
            total: 200.0,
            total_sol: 1.33,
            timestamp: String::new(),
        };
        let report = portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD);
        assert!(report.is_consistent());
        assert_eq!(report.computed_total, 200.0);
    }

    #[test]
    fn test_drift_flagged() {
        let portfolio = WalletPortfolio {
            tokens: vec![balance("sol", 100.0), balance("usdc", 50.0)],
            total: 150.5,
            total_sol: 1.0,
            timestamp: String::new(),
        };
        let report = portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD);
        assert!(!report.is_consistent());
        assert!((report.drift - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drift_within_tolerance() {
        let portfolio = WalletPortfolio {
            tokens: vec![balance("sol", 100.004)],
            total: 100.0,
            total_sol: 1.0,
            timestamp: String::new(),
        };
        assert!(portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD).is_consistent());
    }

    #[test]
    fn test_empty_portfolio() {
        let portfolio = WalletPortfolio::default();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total, 0.0);
        assert!(portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD).is_consistent());
    }

    #[test]
    fn test_holding_lookup() {
        let portfolio = WalletPortfolio {
            tokens: vec![balance("sol", 10.0), balance("bonk", 2.0)],
            ..Default::default()
        };
        assert_eq!(portfolio.holding("bonk").map(|h| h.value), Some(2.0));
        assert!(portfolio.holding("jup").is_none());
    }

    #[test]
    fn test_updated_at_formats() {
        let mut portfolio = WalletPortfolio {
            timestamp: "2025-01-15T12:30:00Z".to_string(),
            ..Default::default()
        };
        let ts = portfolio.updated_at().unwrap();
        assert_eq!(ts.timestamp(), 1_736_944_200);

        portfolio.timestamp = "1736944200".to_string();
        assert_eq!(portfolio.updated_at().unwrap().timestamp(), 1_736_944_200);

        portfolio.timestamp = "1736944200000".to_string();
        assert_eq!(portfolio.updated_at().unwrap().timestamp(), 1_736_944_200);

        portfolio.timestamp = "yesterday".to_string();
        assert!(portfolio.updated_at().is_none());
    }
}
