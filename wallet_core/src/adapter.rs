//! The wallet adapter boundary.
//!
//! Key custody and signing live behind this trait. The client only builds
//! payloads and reads back transaction hashes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use birthday_types::{AccountAddress, NetworkId};

use crate::payload::EntryFunctionPayload;
use crate::WalletError;

/// Whether a wallet can be connected right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadyState {
    Installed,
    NotDetected,
    Loadable,
}

/// A wallet the adapter knows about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub name: String,
    /// Where to install it from when it is not installed.
    pub url: String,
    pub ready_state: ReadyState,
}

impl WalletInfo {
    pub fn is_installed(&self) -> bool {
        self.ready_state == ReadyState::Installed
    }
}

/// External wallet capability.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn is_connected(&self) -> bool;

    fn account(&self) -> Option<AccountAddress>;

    /// Wallets available to connect (installed or installable).
    fn wallets(&self) -> Vec<WalletInfo>;

    /// Network name as the wallet reports it (`"Testnet"`, `"mainnet"`, ...).
    fn network(&self) -> Option<String>;

    /// Whether the adapter is still restoring or establishing a connection.
    fn is_loading(&self) -> bool;

    async fn connect(&self, wallet_name: &str) -> Result<(), WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Sign and submit `payload`, returning the transaction hash.
    async fn sign_and_submit_transaction(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<String, WalletError>;
}

/// Point-in-time view of the wallet state that the lists depend on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub connected: bool,
    pub account: Option<AccountAddress>,
    pub network: Option<String>,
    pub loading: bool,
}

impl WalletSnapshot {
    pub fn capture(adapter: &dyn WalletAdapter) -> Self {
        Self {
            connected: adapter.is_connected(),
            account: adapter.account(),
            network: adapter.network(),
            loading: adapter.is_loading(),
        }
    }

    /// The account, but only while connected.
    pub fn connected_account(&self) -> Option<&AccountAddress> {
        if self.connected {
            self.account.as_ref()
        } else {
            None
        }
    }

    /// True when connected, settled, and on a network other than `expected`.
    ///
    /// A wallet that does not report a network counts as mismatched.
    pub fn network_mismatch(&self, expected: NetworkId) -> bool {
        self.connected
            && !self.loading
            && !self
                .network
                .as_deref()
                .is_some_and(|name| expected.matches_name(name))
    }
}
