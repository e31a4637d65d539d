//! Wallet Extension Adapters
//!
//! Implementations of the wallet-extension port.

mod keypair;

pub use keypair::{auto_approve, ConsentPrompt, KeypairError, KeypairWallet, KeypairWalletProvider};
