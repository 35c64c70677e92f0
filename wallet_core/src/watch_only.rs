//! Read-only wallet: an address without a signer.

use std::sync::Mutex;

use async_trait::async_trait;

use birthday_types::{AccountAddress, NetworkId};

use crate::adapter::{ReadyState, WalletAdapter, WalletInfo};
use crate::payload::EntryFunctionPayload;
use crate::WalletError;

pub const WATCH_ONLY_NAME: &str = "Watch-only";

/// Observes an account's gifts and history; refuses to sign.
pub struct WatchOnlyWallet {
    address: AccountAddress,
    network: NetworkId,
    connected: Mutex<bool>,
}

impl WatchOnlyWallet {
    /// Starts connected, since there is nothing to unlock.
    pub fn new(address: AccountAddress, network: NetworkId) -> Self {
        Self {
            address,
            network,
            connected: Mutex::new(true),
        }
    }

    fn set_connected(&self, value: bool) {
        if let Ok(mut c) = self.connected.lock() {
            *c = value;
        }
    }
}

#[async_trait]
impl WalletAdapter for WatchOnlyWallet {
    fn is_connected(&self) -> bool {
        self.connected.lock().map(|c| *c).unwrap_or(false)
    }

    fn account(&self) -> Option<AccountAddress> {
        self.is_connected().then(|| self.address.clone())
    }

    fn wallets(&self) -> Vec<WalletInfo> {
        vec![WalletInfo {
            name: WATCH_ONLY_NAME.to_string(),
            url: String::new(),
            ready_state: ReadyState::Installed,
        }]
    }

    fn network(&self) -> Option<String> {
        Some(self.network.as_str().to_string())
    }

    fn is_loading(&self) -> bool {
        false
    }

    async fn connect(&self, _wallet_name: &str) -> Result<(), WalletError> {
        self.set_connected(true);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.set_connected(false);
        Ok(())
    }

    async fn sign_and_submit_transaction(
        &self,
        _payload: &EntryFunctionPayload,
    ) -> Result<String, WalletError> {
        Err(WalletError::SigningUnavailable)
    }
}
