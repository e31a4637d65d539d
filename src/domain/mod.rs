//! Domain Layer - Core types for the tracker client
//!
//! Pure types and logic with no I/O. All external interactions happen
//! through the ports layer.
//!
//! - `address`: Solana address shape validation
//! - `token`: trending tokens, pools and timeframes
//! - `portfolio`: wallet holdings and total consistency
//! - `view_state`: loading/error/data lifecycle with a generation guard

pub mod address;
pub mod token;
pub mod portfolio;
pub mod view_state;

pub use address::{AddressError, AddressValidator, ValidationResult, MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};
pub use token::{DualQuote, Pool, Timeframe, TimeframeParseError, Token, TrendingEntry, TxnStats};
pub use portfolio::{ConsistencyReport, WalletPortfolio, WalletTokenBalance, DEFAULT_TOTAL_TOLERANCE_USD};
pub use view_state::{RequestTicket, ViewController, ViewState};
