//! Wallet connector for the birthday gift client.
//!
//! Provides everything the views need from a wallet:
//! - The [`WalletAdapter`] boundary (connection, account, network, signing)
//! - [`WalletConnector`]: snapshots, balance display, submission with notices
//! - Entry-function payload builders for send / claim / cancel
//! - The page-owned [`TxnState`] shared by every view
//! - Two adapters: [`WatchOnlyWallet`] and [`HttpSignerWallet`]

pub mod adapter;
pub mod connector;
pub mod error;
pub mod explorer;
pub mod payload;
pub mod signer;
pub mod txn_state;
pub mod watch_only;

pub use adapter::{ReadyState, WalletAdapter, WalletInfo, WalletSnapshot};
pub use connector::WalletConnector;
pub use error::WalletError;
pub use explorer::{explorer_txn_url, Notification};
pub use payload::{EntryFunctionPayload, GiftPayloads};
pub use signer::HttpSignerWallet;
pub use txn_state::{TxnGuard, TxnState};
pub use watch_only::WatchOnlyWallet;
