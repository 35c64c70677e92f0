//! Wallet adapter backed by an external HTTP signer.
//!
//! The signer holds the keys. It exposes two endpoints:
//! - `GET  {url}/account` → `{ "address": "0x...", "network": "testnet" }`
//! - `POST {url}/sign_and_submit` with an [`EntryFunctionPayload`] →
//!   `{ "hash": "0x..." }` or `{ "error": "..." }`

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use birthday_types::AccountAddress;

use crate::adapter::{ReadyState, WalletAdapter, WalletInfo};
use crate::payload::EntryFunctionPayload;
use crate::WalletError;

pub const HTTP_SIGNER_NAME: &str = "HTTP signer";

#[derive(Debug, Clone, Deserialize)]
struct AccountResponse {
    address: String,
    #[serde(default)]
    network: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default)]
struct SignerState {
    account: Option<AccountAddress>,
    network: Option<String>,
    loading: bool,
}

pub struct HttpSignerWallet {
    http: reqwest::Client,
    signer_url: String,
    state: Mutex<SignerState>,
}

impl HttpSignerWallet {
    /// Create an adapter targeting the given signer base URL (e.g. `http://127.0.0.1:7090`).
    pub fn new(signer_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Signer(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            signer_url: signer_url.into().trim_end_matches('/').to_string(),
            state: Mutex::new(SignerState::default()),
        })
    }

    /// The configured signer URL.
    pub fn signer_url(&self) -> &str {
        &self.signer_url
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SignerState) -> T) -> Result<T, WalletError> {
        self.state
            .lock()
            .map(|mut s| f(&mut s))
            .map_err(|_| WalletError::Signer("signer state poisoned".into()))
    }

    async fn fetch_account(&self) -> Result<AccountResponse, WalletError> {
        let response = self
            .http
            .get(format!("{}/account", self.signer_url))
            .send()
            .await
            .map_err(|e| WalletError::Signer(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Signer(format!(
                "signer returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WalletError::Signer(format!("invalid account response: {e}")))
    }
}

#[async_trait]
impl WalletAdapter for HttpSignerWallet {
    fn is_connected(&self) -> bool {
        self.with_state(|s| s.account.is_some()).unwrap_or(false)
    }

    fn account(&self) -> Option<AccountAddress> {
        self.with_state(|s| s.account.clone()).ok().flatten()
    }

    fn wallets(&self) -> Vec<WalletInfo> {
        vec![WalletInfo {
            name: HTTP_SIGNER_NAME.to_string(),
            url: self.signer_url.clone(),
            ready_state: ReadyState::Installed,
        }]
    }

    fn network(&self) -> Option<String> {
        self.with_state(|s| s.network.clone()).ok().flatten()
    }

    fn is_loading(&self) -> bool {
        self.with_state(|s| s.loading).unwrap_or(false)
    }

    async fn connect(&self, _wallet_name: &str) -> Result<(), WalletError> {
        self.with_state(|s| s.loading = true)?;
        let result = self.fetch_account().await;
        self.with_state(|s| {
            s.loading = false;
            if let Ok(ref resp) = result {
                s.account = Some(AccountAddress::new(resp.address.clone()));
                s.network = resp.network.clone();
            }
        })?;
        let resp = result?;
        debug!(address = %resp.address, "signer connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.with_state(|s| *s = SignerState::default())
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<String, WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }
        let response = self
            .http
            .post(format!("{}/sign_and_submit", self.signer_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| WalletError::Signer(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| WalletError::Signer(format!("failed to read submit response: {e}")))?;
        read_submit_response(status, &text)
    }
}

/// Interpret a submit response. An `{error}` body is a rejection whatever the
/// status; otherwise a non-success status wins over the body.
fn read_submit_response(status: reqwest::StatusCode, text: &str) -> Result<String, WalletError> {
    let parsed = serde_json::from_str::<SubmitResponse>(text);
    if let Ok(SubmitResponse {
        error: Some(ref err),
        ..
    }) = parsed
    {
        return Err(WalletError::Rejected(err.clone()));
    }
    if !status.is_success() {
        return Err(WalletError::Signer(format!("signer returned HTTP {status}")));
    }
    parsed
        .map_err(|e| WalletError::Signer(format!("invalid submit response: {e}")))?
        .hash
        .ok_or_else(|| WalletError::Signer("submit response has no hash".into()))
}
