//! Wallet connector: the adapter plus the client-side extras every view uses.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use birthday_chain::GiftModule;
use birthday_types::{AccountAddress, NetworkId, Octas, TimestampMillis};
use birthday_utils::format_balance;

use crate::adapter::{WalletAdapter, WalletInfo, WalletSnapshot};
use crate::explorer::Notification;
use crate::payload::{EntryFunctionPayload, GiftPayloads};
use crate::txn_state::TxnState;
use crate::WalletError;

/// Wraps a [`WalletAdapter`] and publishes its state to subscribers.
#[derive(Clone)]
pub struct WalletConnector {
    adapter: Arc<dyn WalletAdapter>,
    module: GiftModule,
    payloads: GiftPayloads,
    network: NetworkId,
    state: Arc<watch::Sender<WalletSnapshot>>,
    txn: TxnState,
}

impl WalletConnector {
    pub fn new(
        adapter: Arc<dyn WalletAdapter>,
        module: GiftModule,
        network: NetworkId,
        txn: TxnState,
    ) -> Self {
        let (state, _rx) = watch::channel(WalletSnapshot::capture(adapter.as_ref()));
        let payloads = GiftPayloads::new(module.module().clone());
        Self {
            adapter,
            module,
            payloads,
            network,
            state: Arc::new(state),
            txn,
        }
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.state.borrow().clone()
    }

    /// Receive a new snapshot whenever the wallet state changes.
    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.state.subscribe()
    }

    /// Re-read the adapter and publish if anything changed.
    pub fn sync(&self) -> bool {
        let fresh = WalletSnapshot::capture(self.adapter.as_ref());
        self.state.send_if_modified(|current| {
            if *current == fresh {
                false
            } else {
                debug!(connected = fresh.connected, account = ?fresh.account, "wallet state changed");
                *current = fresh;
                true
            }
        })
    }

    pub fn wallets(&self) -> Vec<WalletInfo> {
        self.adapter.wallets()
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub fn txn_state(&self) -> &TxnState {
        &self.txn
    }

    pub fn payloads(&self) -> &GiftPayloads {
        &self.payloads
    }

    /// Connect to a named wallet. Only installed wallets can be connected.
    pub async fn connect(&self, wallet_name: &str) -> Result<(), WalletError> {
        let wallet = self
            .adapter
            .wallets()
            .into_iter()
            .find(|w| w.name.eq_ignore_ascii_case(wallet_name))
            .ok_or_else(|| WalletError::WalletNotFound(wallet_name.to_string()))?;
        if !wallet.is_installed() {
            return Err(WalletError::NotInstalled(format!("{} ({})", wallet.name, wallet.url)));
        }
        self.adapter.connect(&wallet.name).await?;
        self.sync();
        Ok(())
    }

    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.adapter.disconnect().await?;
        self.sync();
        Ok(())
    }

    /// Raw coin balance of the connected account.
    pub async fn balance_octas(&self) -> Result<Octas, WalletError> {
        let snapshot = self.snapshot();
        let account = snapshot.connected_account().ok_or(WalletError::NoAccount)?;
        Ok(self.module.coin_balance(account).await?)
    }

    /// Display balance of the connected account.
    ///
    /// `None` while disconnected. Any query failure displays as `"0"`.
    pub async fn balance(&self) -> Option<String> {
        if self.snapshot().connected_account().is_none() {
            return None;
        }
        match self.balance_octas().await {
            Ok(octas) => Some(format_balance(octas.to_apt())),
            Err(e) => {
                debug!("balance query failed: {e}");
                Some("0".to_string())
            }
        }
    }

    /// Submit a payload through the adapter while holding the in-progress flag.
    async fn submit(&self, payload: EntryFunctionPayload) -> Result<String, WalletError> {
        let _guard = self.txn.begin()?;
        if self.snapshot().connected_account().is_none() {
            return Err(WalletError::NotConnected);
        }
        debug!(function = %payload.function, "submitting transaction");
        let hash = self.adapter.sign_and_submit_transaction(&payload).await;
        if let Err(ref e) = hash {
            warn!(function = %payload.function, "transaction failed: {e}");
        }
        hash
    }

    /// Send `amount` to `recipient`, claimable from `release`.
    pub async fn send_gift(
        &self,
        recipient: &AccountAddress,
        amount: Octas,
        release: TimestampMillis,
    ) -> Result<Notification, WalletError> {
        let payload = self.payloads.add_gift(recipient, amount, release)?;
        let hash = self.submit(payload).await?;
        info!(%recipient, %amount, %hash, "gift sent");
        Ok(Notification::new(
            "Gift sent!",
            format!("Gift of {amount} sent to {}", recipient.short(6)),
            hash,
            self.network,
        ))
    }

    /// Claim the gift from `gifter`.
    pub async fn claim_gift(&self, gifter: &AccountAddress) -> Result<Notification, WalletError> {
        let hash = self.submit(self.payloads.claim_gift(gifter)).await?;
        info!(%gifter, %hash, "gift claimed");
        Ok(Notification::new(
            "Gift claimed!",
            format!("Gift claimed from {}", gifter.short(6)),
            hash,
            self.network,
        ))
    }

    /// Cancel the gift to `recipient`.
    pub async fn cancel_gift(
        &self,
        recipient: &AccountAddress,
    ) -> Result<Notification, WalletError> {
        let hash = self.submit(self.payloads.remove_gift(recipient)).await?;
        info!(%recipient, %hash, "gift cancelled");
        Ok(Notification::new(
            "Cancelled",
            format!("Gift cancelled from {}", recipient.short(6)),
            hash,
            self.network,
        ))
    }
}
