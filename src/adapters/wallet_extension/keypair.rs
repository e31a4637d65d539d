//! Keypair-file wallet extension
//!
//! Stands in for a browser wallet extension on the command line. The wallet
//! is a Solana CLI keypair file (JSON array of 64 bytes: 32 secret, 32
//! public). Only the public half is kept in memory. Connecting asks the user
//! for consent; declining maps to `ExtensionError::Rejected`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::address;
use crate::ports::wallet_extension::{ExtensionError, WalletExtension, WalletExtensionProvider};

/// Length of a Solana CLI keypair (secret + public)
pub const KEYPAIR_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum KeypairError {
    #[error("Failed to read keypair file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid keypair bytes: expected 64, got {0}")]
    InvalidLength(usize),
    #[error("Derived public key is not a valid address: {0}")]
    InvalidPublicKey(String),
}

/// Decides whether a connection request for a public key is approved
pub type ConsentPrompt = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Always approve; for `--yes` and tests
pub fn auto_approve() -> ConsentPrompt {
    Arc::new(|_: &str| true)
}

/// Wallet extension backed by a keypair file
pub struct KeypairWallet {
    public_key: String,
    consent: ConsentPrompt,
    connected: AtomicBool,
}

impl std::fmt::Debug for KeypairWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeypairWallet")
            .field("public_key", &self.public_key)
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl KeypairWallet {
    /// Load from a keypair file path (JSON array format)
    pub fn from_file<P: AsRef<Path>>(path: P, consent: ConsentPrompt) -> Result<Self, KeypairError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let bytes: Vec<u8> = serde_json::from_str(&contents)?;
        Self::from_bytes(&bytes, consent)
    }

    /// Load from raw keypair bytes
    pub fn from_bytes(bytes: &[u8], consent: ConsentPrompt) -> Result<Self, KeypairError> {
        if bytes.len() != KEYPAIR_LEN {
            return Err(KeypairError::InvalidLength(bytes.len()));
        }

        let public_key = bs58::encode(&bytes[32..]).into_string();
        if let Err(reason) = address::validate(&public_key).into_result() {
            return Err(KeypairError::InvalidPublicKey(reason.to_string()));
        }

        Ok(Self {
            public_key,
            consent,
            connected: AtomicBool::new(false),
        })
    }

    /// Public key regardless of connection state
    pub fn address(&self) -> &str {
        &self.public_key
    }
}

#[async_trait]
impl WalletExtension for KeypairWallet {
    fn is_solana_wallet(&self) -> bool {
        true
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<String> {
        self.is_connected().then(|| self.public_key.clone())
    }

    async fn connect(&self) -> Result<String, ExtensionError> {
        if self.is_connected() {
            return Ok(self.public_key.clone());
        }

        let consent = Arc::clone(&self.consent);
        let key = self.public_key.clone();
        let approved = tokio::task::spawn_blocking(move || consent(&key))
            .await
            .map_err(|e| ExtensionError::Other(format!("Consent prompt failed: {}", e)))?;

        if !approved {
            return Err(ExtensionError::Rejected);
        }

        self.connected.store(true, Ordering::SeqCst);
        Ok(self.public_key.clone())
    }

    async fn disconnect(&self) -> Result<(), ExtensionError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Locates a keypair wallet on disk. The file may appear after startup; a
/// successfully loaded wallet is kept so its connection state survives
/// repeated polls.
pub struct KeypairWalletProvider {
    path: PathBuf,
    consent: ConsentPrompt,
    loaded: Mutex<Option<Arc<KeypairWallet>>>,
}

impl KeypairWalletProvider {
    pub fn new(path: impl Into<PathBuf>, consent: ConsentPrompt) -> Self {
        Self {
            path: path.into(),
            consent,
            loaded: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WalletExtensionProvider for KeypairWalletProvider {
    fn locate(&self) -> Option<Arc<dyn WalletExtension>> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(wallet) = loaded.as_ref() {
            return Some(Arc::clone(wallet) as Arc<dyn WalletExtension>);
        }

        match KeypairWallet::from_file(&self.path, Arc::clone(&self.consent)) {
            Ok(wallet) => {
                let wallet = Arc::new(wallet);
                *loaded = Some(Arc::clone(&wallet));
                Some(wallet as Arc<dyn WalletExtension>)
            }
            Err(e) => {
                tracing::debug!("No wallet at {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
