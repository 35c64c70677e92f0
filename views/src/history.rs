//! Account history across the module's three event streams.

use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::join_all;
use tracing::{debug, warn};

use birthday_chain::normalize::build_history;
use birthday_chain::{GiftModule, RawEvent};
use birthday_types::{EventKind, HistoryEvent, NetworkId};
use birthday_wallet_core::WalletSnapshot;

use crate::banner::Banner;
use crate::gate::RefreshGate;

#[derive(Debug)]
struct HistoryState {
    events: Vec<HistoryEvent>,
    account_exists: bool,
    failed_streams: Vec<EventKind>,
}

/// Every gift event involving the connected account, most recent first.
#[derive(Clone)]
pub struct HistoryView {
    module: GiftModule,
    network: NetworkId,
    state: Arc<Mutex<HistoryState>>,
    gate: RefreshGate,
}

impl HistoryView {
    pub fn new(module: GiftModule, network: NetworkId) -> Self {
        Self {
            module,
            network,
            state: Arc::new(Mutex::new(HistoryState {
                events: Vec::new(),
                account_exists: true,
                failed_streams: Vec::new(),
            })),
            gate: RefreshGate::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Read all three streams together. A failed stream contributes nothing;
    /// the others still count.
    async fn fetch_streams(&self) -> (Vec<RawEvent>, Vec<EventKind>) {
        let reads = EventKind::ALL.map(|kind| async move { (kind, self.module.event_stream(kind).await) });
        let mut events = Vec::new();
        let mut failed = Vec::new();
        for (kind, result) in join_all(reads).await {
            match result {
                Ok(mut batch) => events.append(&mut batch),
                Err(e) => {
                    warn!(stream = kind.stream_field(), "no logs found for this stream: {e}");
                    failed.push(kind);
                }
            }
        }
        (events, failed)
    }

    async fn check_account(&self, wallet: &WalletSnapshot) -> bool {
        let Some(account) = wallet.account.as_ref() else {
            return false;
        };
        match self.module.account_exists(account).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(%account, "account lookup failed: {e}");
                false
            }
        }
    }

    /// Re-check the account and reload history for the snapshot's account.
    ///
    /// Not connected, or connected without an account, shows no events.
    pub async fn refresh(&self, wallet: &WalletSnapshot) -> bool {
        let ticket = self.gate.begin();

        let (account_exists, (events, failed_streams)) = match wallet.connected_account() {
            Some(account) => {
                let (exists, (raw, failed)) =
                    tokio::join!(self.check_account(wallet), self.fetch_streams());
                let events = build_history(&raw, self.module.module(), account);
                (exists, (events, failed))
            }
            None => (self.check_account(wallet).await, (Vec::new(), Vec::new())),
        };

        if !self.gate.is_current(ticket) {
            debug!("discarding stale history");
            return false;
        }
        debug!(count = events.len(), account_exists, "history loaded");
        let mut state = self.lock();
        state.events = events;
        state.account_exists = account_exists;
        state.failed_streams = failed_streams;
        true
    }

    pub fn events(&self) -> Vec<HistoryEvent> {
        self.lock().events.clone()
    }

    pub fn account_exists(&self) -> bool {
        self.lock().account_exists
    }

    /// Streams whose last read failed.
    pub fn failed_streams(&self) -> Vec<EventKind> {
        self.lock().failed_streams.clone()
    }

    /// Banners to show for `wallet`. Neither banner blocks the event list.
    pub fn banners(&self, wallet: &WalletSnapshot) -> Vec<Banner> {
        let mut banners = Vec::new();
        if wallet.network_mismatch(self.network) {
            banners.push(Banner::WrongNetwork {
                expected: self.network,
            });
        }
        if wallet.connected && !wallet.loading && !self.account_exists() {
            banners.push(Banner::AccountNotFound {
                expected: self.network,
            });
        }
        banners
    }
}
