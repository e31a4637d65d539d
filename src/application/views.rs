//! View Controllers
//!
//! Framework-independent controllers for the trending list and the wallet
//! detail view. Each owns a `ViewController` behind a lock and releases the
//! lock across the network call, so overlapping fetches are possible; the
//! generation guard makes sure only the latest one lands.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::adapters::tracker_api::{TrendingDataAdapter, WalletDataAdapter};
use crate::domain::address::AddressValidator;
use crate::domain::portfolio::WalletPortfolio;
use crate::domain::token::{Timeframe, TrendingEntry};
use crate::domain::view_state::{ViewController, ViewState};
use crate::ports::data_provider::TrackerError;

/// Trending tokens view: one timeframe at a time
pub struct TrendingView {
    adapter: TrendingDataAdapter,
    timeframe: RwLock<Timeframe>,
    controller: RwLock<ViewController<Vec<TrendingEntry>>>,
    last_error: RwLock<Option<Arc<TrackerError>>>,
}

impl TrendingView {
    pub fn new(adapter: TrendingDataAdapter) -> Self {
        Self {
            adapter,
            timeframe: RwLock::new(Timeframe::default()),
            controller: RwLock::new(ViewController::new()),
            last_error: RwLock::new(None),
        }
    }

    pub async fn timeframe(&self) -> Timeframe {
        *self.timeframe.read().await
    }

    pub async fn state(&self) -> ViewState<Vec<TrendingEntry>> {
        self.controller.read().await.state().clone()
    }

    /// Classified error behind an `Errored` state, if any
    pub async fn last_error(&self) -> Option<Arc<TrackerError>> {
        self.last_error.read().await.clone()
    }

    /// Switch to `timeframe` and load it. Returns false if a newer request
    /// superseded this one before it finished.
    pub async fn show(&self, timeframe: Timeframe) -> bool {
        // Key and ticket change together so `timeframe()` names the latest request
        let ticket = {
            let mut controller = self.controller.write().await;
            *self.timeframe.write().await = timeframe;
            controller.begin()
        };

        let outcome = self.adapter.get_trending(timeframe).await;

        let mut controller = self.controller.write().await;
        if !controller.is_current(ticket) {
            return controller.complete(ticket, outcome);
        }

        let outcome = outcome.map_err(Arc::new);
        *self.last_error.write().await = outcome.as_ref().err().cloned();
        controller.complete(ticket, outcome)
    }

    /// Manual "try again": reload the current timeframe
    pub async fn retry(&self) -> bool {
        let timeframe = self.timeframe().await;
        self.show(timeframe).await
    }
}

/// Wallet detail view for one address at a time
pub struct WalletView {
    adapter: WalletDataAdapter,
    validator: AddressValidator,
    address: RwLock<Option<String>>,
    controller: RwLock<ViewController<WalletPortfolio>>,
}

impl WalletView {
    pub fn new(adapter: WalletDataAdapter) -> Self {
        Self {
            adapter,
            validator: AddressValidator::new(),
            address: RwLock::new(None),
            controller: RwLock::new(ViewController::new()),
        }
    }

    pub async fn address(&self) -> Option<String> {
        self.address.read().await.clone()
    }

    pub async fn state(&self) -> ViewState<WalletPortfolio> {
        self.controller.read().await.state().clone()
    }

    /// Look up `address`. Bad input errors immediately without a request.
    pub async fn lookup(&self, address: &str) -> bool {
        let address = address.trim().to_string();

        let ticket = {
            let mut controller = self.controller.write().await;
            *self.address.write().await = Some(address.clone());

            if let Err(reason) = self.validator.validate(&address).into_result() {
                controller.reject(TrackerError::Validation(reason).to_string());
                return true;
            }
            controller.begin()
        };
        let outcome = self.adapter.get_wallet(&address).await;
        self.controller.write().await.complete(ticket, outcome)
    }

    /// Manual "try again" for the last address; false if none was entered
    pub async fn retry(&self) -> bool {
        match self.address().await {
            Some(address) => self.lookup(&address).await,
            None => false,
        }
    }
}
