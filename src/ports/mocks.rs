use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::data_provider::{TrackerDataPort, TrackerError};
use super::wallet_extension::{ExtensionError, WalletExtension, WalletExtensionProvider};

/// Canned reply for a path
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status(u16, String),
    TransportFailure(String),
}

/// Mock data provider that records calls and allows controlled responses
#[derive(Debug, Default)]
pub struct MockDataProvider {
    calls: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a JSON body for a given path
    pub fn with_json(self, path: &str, body: Value) -> Self {
        self.with_reply(path, MockReply::Json(body))
    }

    pub fn with_reply(self, path: &str, reply: MockReply) -> Self {
        self.responses.lock().unwrap().insert(path.to_string(), reply);
        self
    }

    /// Delay the reply for a path, to simulate a slow provider
    pub fn with_delay(self, path: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(path.to_string(), delay);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackerDataPort for MockDataProvider {
    async fn request(&self, path: &str) -> Result<Value, TrackerError> {
        self.calls.lock().unwrap().push(path.to_string());

        let delay = self.delays.lock().unwrap().get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.responses.lock().unwrap().get(path).cloned();
        match reply {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::Status(status, status_text)) => {
                Err(TrackerError::Api { status, status_text })
            }
            Some(MockReply::TransportFailure(message)) => Err(TrackerError::Transport(message)),
            None => Err(TrackerError::Api {
                status: 404,
                status_text: "Not Found".to_string(),
            }),
        }
    }
}

/// How a mock extension answers `connect`
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectBehavior {
    Approve,
    Reject,
    Fail(String),
}

/// Mock wallet extension that records calls
#[derive(Debug)]
pub struct MockWalletExtension {
    public_key: String,
    behavior: ConnectBehavior,
    solana: bool,
    connected: AtomicBool,
    disconnect_error: Option<String>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockWalletExtension {
    pub fn new(public_key: &str, behavior: ConnectBehavior) -> Self {
        Self {
            public_key: public_key.to_string(),
            behavior,
            solana: true,
            connected: AtomicBool::new(false),
            disconnect_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Start out already connected, as after a page reload
    pub fn connected(self) -> Self {
        self.connected.store(true, Ordering::SeqCst);
        self
    }

    /// Injected by some other chain's wallet
    pub fn not_solana(mut self) -> Self {
        self.solana = false;
        self
    }

    pub fn with_disconnect_error(mut self, message: &str) -> Self {
        self.disconnect_error = Some(message.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletExtension for MockWalletExtension {
    fn is_solana_wallet(&self) -> bool {
        self.solana
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<String> {
        self.is_connected().then(|| self.public_key.clone())
    }

    async fn connect(&self) -> Result<String, ExtensionError> {
        self.calls.lock().unwrap().push("connect");
        match &self.behavior {
            ConnectBehavior::Approve => {
                self.connected.store(true, Ordering::SeqCst);
                Ok(self.public_key.clone())
            }
            ConnectBehavior::Reject => Err(ExtensionError::Rejected),
            ConnectBehavior::Fail(message) => Err(ExtensionError::Other(message.clone())),
        }
    }

    async fn disconnect(&self) -> Result<(), ExtensionError> {
        self.calls.lock().unwrap().push("disconnect");
        if let Some(message) = &self.disconnect_error {
            return Err(ExtensionError::Other(message.clone()));
        }
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Provider whose extension only shows up after a number of polls
pub struct MockExtensionProvider {
    extension: Option<Arc<MockWalletExtension>>,
    available_after: usize,
    polls: AtomicUsize,
}

impl MockExtensionProvider {
    /// No extension installed at all
    pub fn absent() -> Self {
        Self {
            extension: None,
            available_after: 0,
            polls: AtomicUsize::new(0),
        }
    }

    pub fn installed(extension: Arc<MockWalletExtension>) -> Self {
        Self::loading(extension, 0)
    }

    /// Extension becomes visible on poll number `available_after + 1`
    pub fn loading(extension: Arc<MockWalletExtension>, available_after: usize) -> Self {
        Self {
            extension: Some(extension),
            available_after,
            polls: AtomicUsize::new(0),
        }
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl WalletExtensionProvider for MockExtensionProvider {
    fn locate(&self) -> Option<Arc<dyn WalletExtension>> {
        let seen = self.polls.fetch_add(1, Ordering::SeqCst);
        if seen < self.available_after {
            return None;
        }
        self.extension
            .clone()
            .map(|ext| ext as Arc<dyn WalletExtension>)
    }
}
