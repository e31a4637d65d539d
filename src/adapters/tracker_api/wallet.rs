//! Wallet Data Adapter
//!
//! Validates a wallet address locally, fetches its holdings and converts
//! them into a `WalletPortfolio`. Provider totals are kept as reported; a
//! drift between the total and the sum of holdings is logged as a
//! data-quality warning, never raised as an error.

use std::sync::Arc;

use serde_json::Value;

use super::wire::RawWalletInfo;
use crate::domain::address::AddressValidator;
use crate::domain::portfolio::{WalletPortfolio, DEFAULT_TOTAL_TOLERANCE_USD};
use crate::ports::data_provider::{TrackerDataPort, TrackerError};

/// API path for a wallet's holdings
pub fn wallet_path(address: &str) -> String {
    format!("/wallet/{}", address)
}

/// Normalizes wallet-holdings responses
#[derive(Clone)]
pub struct WalletDataAdapter {
    provider: Arc<dyn TrackerDataPort>,
    validator: AddressValidator,
}

impl WalletDataAdapter {
    pub fn new(provider: Arc<dyn TrackerDataPort>) -> Self {
        Self {
            provider,
            validator: AddressValidator::new(),
        }
    }

    /// Holdings for `address`. Invalid addresses fail before any request.
    pub async fn get_wallet(&self, address: &str) -> Result<WalletPortfolio, TrackerError> {
        self.validator.validate(address).into_result()?;
        let address = address.trim();

        let body = self.provider.request(&wallet_path(address)).await?;
        let portfolio = normalize_wallet(body);

        let report = portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD);
        if !report.is_consistent() {
            tracing::warn!(
                "Wallet {} total ${:.2} differs from sum of holdings ${:.2} by ${:.4}",
                address,
                report.reported_total,
                report.computed_total,
                report.drift
            );
        }

        Ok(portfolio)
    }
}

/// Convert a raw wallet body. A body that is not an object yields an empty
/// portfolio.
pub fn normalize_wallet(body: Value) -> WalletPortfolio {
    if !body.is_object() {
        tracing::warn!("Wallet response was not an object, treating as empty");
        return WalletPortfolio::default();
    }

    let raw: RawWalletInfo = match serde_json::from_value(body) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Wallet response could not be read ({}), treating as empty", e);
            return WalletPortfolio::default();
        }
    };

    let (portfolio, dropped) = raw.into_portfolio();
    if dropped > 0 {
        tracing::warn!("Dropped {} wallet holdings without a token mint", dropped);
    }
    portfolio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::AddressError;
    use crate::ports::data_provider::MockTrackerDataPort;
    use serde_json::json;

    const ADDRESS: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtVhAW5Q5pge4j1";

    fn wallet_fixture() -> Value {
        json!({
            "tokens": [
                {
                    "token": {
                        "name": "Wrapped SOL",
                        "symbol": "SOL",
                        "mint": "So11111111111111111111111111111111111111112",
                        "decimals": 9,
                        "image": "https://example.com/sol.png"
                    },
                    "balance": 2.5,
                    "value": 375.0
                },
                {
                    "token": {
                        "name": "USD Coin",
                        "symbol": "USDC",
                        "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                        "decimals": 6
                    },
                    "balance": 125.0,
                    "value": 125.0
                }
            ],
            "total": 500.0,
            "totalSol": 3.3333,
            "timestamp": "2025-01-15T12:30:00Z"
        })
    }

    fn adapter_returning(body: Value) -> WalletDataAdapter {
        let mut mock = MockTrackerDataPort::new();
        mock.expect_request()
            .withf(|path| path.starts_with("/wallet/"))
            .times(1)
            .returning(move |_| Ok(body.clone()));
        WalletDataAdapter::new(Arc::new(mock))
    }

    #[test]
    fn test_wallet_path() {
        assert_eq!(wallet_path(ADDRESS), format!("/wallet/{}", ADDRESS));
    }

    #[tokio::test]
    async fn test_get_wallet_passes_through() {
        let adapter = adapter_returning(wallet_fixture());
        let portfolio = adapter.get_wallet(ADDRESS).await.unwrap();

        assert_eq!(portfolio.tokens.len(), 2);
        assert_eq!(portfolio.tokens[0].token.symbol, "SOL");
        assert_eq!(portfolio.total, 500.0);
        assert_eq!(portfolio.total_sol, 3.3333);
        assert_eq!(portfolio.timestamp, "2025-01-15T12:30:00Z");
        assert!(portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD).is_consistent());
    }

    #[tokio::test]
    async fn test_invalid_address_makes_no_request() {
        let mut mock = MockTrackerDataPort::new();
        mock.expect_request().never();
        let adapter = WalletDataAdapter::new(Arc::new(mock));

        let err = adapter.get_wallet("short").await.unwrap_err();
        assert!(matches!(err, TrackerError::Validation(AddressError::InvalidLength)));

        let err = adapter.get_wallet("   ").await.unwrap_err();
        assert!(matches!(err, TrackerError::Validation(AddressError::Required)));

        let err = adapter
            .get_wallet("0OIl5Q544fKrFoe6tsEbD7S8EmxGTJYAKtVhAW5Q5p")
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(AddressError::InvalidCharacterSet)));
    }

    #[tokio::test]
    async fn test_address_trimmed_in_path() {
        let mut mock = MockTrackerDataPort::new();
        mock.expect_request()
            .withf(|path| path.ends_with("pge4j1") && !path.contains(' '))
            .times(1)
            .returning(|_| Ok(json!({"tokens": [], "total": 0, "totalSol": 0, "timestamp": ""})));
        let adapter = WalletDataAdapter::new(Arc::new(mock));

        let portfolio = adapter.get_wallet(&format!("  {}  ", ADDRESS)).await.unwrap();
        assert!(portfolio.is_empty());
    }

    #[tokio::test]
    async fn test_empty_holdings_is_valid() {
        let adapter = adapter_returning(json!({"tokens": [], "total": 0, "totalSol": 0, "timestamp": "1736944200"}));
        let portfolio = adapter.get_wallet(ADDRESS).await.unwrap();

        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total, 0.0);
        assert_eq!(portfolio.total_sol, 0.0);
    }

    #[tokio::test]
    async fn test_drift_is_not_an_error() {
        let mut body = wallet_fixture();
        body["total"] = json!(510.0);
        let adapter = adapter_returning(body);

        let portfolio = adapter.get_wallet(ADDRESS).await.unwrap();
        assert_eq!(portfolio.total, 510.0);
        let report = portfolio.consistency(DEFAULT_TOTAL_TOLERANCE_USD);
        assert!(!report.is_consistent());
        assert_eq!(report.computed_total, 500.0);
    }

    #[tokio::test]
    async fn test_non_object_body_is_empty_portfolio() {
        let adapter = adapter_returning(json!(null));
        let portfolio = adapter.get_wallet(ADDRESS).await.unwrap();
        assert_eq!(portfolio, WalletPortfolio::default());
    }

    #[tokio::test]
    async fn test_not_found_propagates() {
        let mut mock = MockTrackerDataPort::new();
        mock.expect_request().times(1).returning(|_| {
            Err(TrackerError::Api {
                status: 404,
                status_text: "Not Found".to_string(),
            })
        });
        let adapter = WalletDataAdapter::new(Arc::new(mock));

        let err = adapter.get_wallet(ADDRESS).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API Error: 404 Not Found");
    }
}
