//! Nullable wallet: record payloads instead of signing them.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use birthday_types::AccountAddress;
use birthday_wallet_core::{
    EntryFunctionPayload, ReadyState, WalletAdapter, WalletError, WalletInfo,
};

pub const NULL_WALLET_NAME: &str = "Null Wallet";

#[derive(Debug)]
struct State {
    connected: bool,
    account: Option<AccountAddress>,
    network: Option<String>,
    loading: bool,
}

/// A test wallet that records submitted payloads and returns scripted outcomes.
pub struct NullWallet {
    state: Mutex<State>,
    wallets: Vec<WalletInfo>,
    submitted: Mutex<Vec<EntryFunctionPayload>>,
    outcomes: Mutex<VecDeque<Result<String, String>>>,
    submit_delay: Mutex<Option<Duration>>,
}

impl NullWallet {
    /// A disconnected wallet with one installed and one uninstalled entry.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                connected: false,
                account: None,
                network: None,
                loading: false,
            }),
            wallets: vec![
                WalletInfo {
                    name: NULL_WALLET_NAME.to_string(),
                    url: "https://example.invalid/null".to_string(),
                    ready_state: ReadyState::Installed,
                },
                WalletInfo {
                    name: "Absent Wallet".to_string(),
                    url: "https://example.invalid/absent".to_string(),
                    ready_state: ReadyState::NotDetected,
                },
            ],
            submitted: Mutex::new(Vec::new()),
            outcomes: Mutex::new(VecDeque::new()),
            submit_delay: Mutex::new(None),
        }
    }

    /// A wallet already connected as `address` on `network`.
    pub fn connected(address: &str, network: &str) -> Self {
        let wallet = Self::new();
        {
            let mut s = wallet.state.lock().unwrap();
            s.connected = true;
            s.account = Some(AccountAddress::new(address));
            s.network = Some(network.to_string());
        }
        wallet
    }

    /// Switch account without disconnecting.
    pub fn set_account(&self, address: &str) {
        self.state.lock().unwrap().account = Some(AccountAddress::new(address));
    }

    pub fn set_network(&self, network: &str) {
        self.state.lock().unwrap().network = Some(network.to_string());
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.lock().unwrap().loading = loading;
    }

    /// Queue the outcome of the next submission. Unscripted submissions succeed.
    pub fn push_outcome(&self, outcome: Result<&str, &str>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(outcome.map(str::to_string).map_err(str::to_string));
    }

    /// Hold every submission for `delay` before answering.
    pub fn set_submit_delay(&self, delay: Duration) {
        *self.submit_delay.lock().unwrap() = Some(delay);
    }

    /// Every payload submitted so far.
    pub fn submitted(&self) -> Vec<EntryFunctionPayload> {
        self.submitted.lock().unwrap().clone()
    }
}

impl Default for NullWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletAdapter for NullWallet {
    fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }

    fn account(&self) -> Option<AccountAddress> {
        let s = self.state.lock().unwrap();
        if s.connected {
            s.account.clone()
        } else {
            None
        }
    }

    fn wallets(&self) -> Vec<WalletInfo> {
        self.wallets.clone()
    }

    fn network(&self) -> Option<String> {
        self.state.lock().unwrap().network.clone()
    }

    fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    async fn connect(&self, wallet_name: &str) -> Result<(), WalletError> {
        if wallet_name != NULL_WALLET_NAME {
            return Err(WalletError::WalletNotFound(wallet_name.to_string()));
        }
        let mut s = self.state.lock().unwrap();
        s.connected = true;
        if s.account.is_none() {
            s.account = Some(AccountAddress::new("0x1234"));
        }
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.state.lock().unwrap().connected = false;
        Ok(())
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<String, WalletError> {
        let delay = *self.submit_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let count = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(payload.clone());
            submitted.len()
        };
        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(Ok(hash)) => Ok(hash),
            Some(Err(reason)) => Err(WalletError::Rejected(reason)),
            None => Ok(format!("0x{count:064x}")),
        }
    }
}
