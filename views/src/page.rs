//! The page: one wallet connector driving every view.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use birthday_chain::GiftModule;
use birthday_types::{AccountAddress, NetworkId, Octas, TimestampMillis};
use birthday_utils::Clock;
use birthday_wallet_core::{Notification, WalletConnector};

use crate::gate::RefreshGate;
use crate::history::HistoryView;
use crate::received::ReceivedGiftList;
use crate::sent::SentGiftList;
use crate::ticker::ClaimTicker;

/// Why the page re-rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Scheduled poll.
    Poll,
    /// Connection, account or network changed.
    WalletChanged,
    /// A submission started or finished.
    TxnChanged,
    /// A received gift became claimable.
    ClaimWindow,
}

/// Owns the connector and the views, and keeps them in step.
#[derive(Clone)]
pub struct GiftPage {
    connector: WalletConnector,
    sent: SentGiftList,
    received: ReceivedGiftList,
    history: HistoryView,
    clock: Arc<dyn Clock>,
    balance: Arc<std::sync::Mutex<Option<String>>>,
    balance_gate: RefreshGate,
}

impl GiftPage {
    pub fn new(connector: WalletConnector, module: GiftModule, clock: Arc<dyn Clock>) -> Self {
        let network = connector.network();
        Self {
            sent: SentGiftList::new(module.clone()),
            received: ReceivedGiftList::new(module.clone(), Arc::clone(&clock)),
            history: HistoryView::new(module, network),
            connector,
            clock,
            balance: Arc::new(std::sync::Mutex::new(None)),
            balance_gate: RefreshGate::new(),
        }
    }

    pub fn connector(&self) -> &WalletConnector {
        &self.connector
    }

    pub fn sent(&self) -> &SentGiftList {
        &self.sent
    }

    pub fn received(&self) -> &ReceivedGiftList {
        &self.received
    }

    pub fn history(&self) -> &HistoryView {
        &self.history
    }

    pub fn network(&self) -> NetworkId {
        self.connector.network()
    }

    pub fn now(&self) -> TimestampMillis {
        self.clock.now()
    }

    /// Display balance as of the last refresh.
    pub fn balance(&self) -> Option<String> {
        self.balance.lock().map(|b| b.clone()).unwrap_or(None)
    }

    /// Reload the display balance. Returns whether the result was stored
    /// (a newer refresh may have superseded it).
    pub async fn refresh_balance(&self) -> bool {
        let ticket = self.balance_gate.begin();
        let balance = self.connector.balance().await;
        if !self.balance_gate.is_current(ticket) {
            debug!("discarding stale balance");
            return false;
        }
        if let Ok(mut b) = self.balance.lock() {
            *b = balance;
        }
        true
    }

    /// Reload the balance and both gift lists.
    pub async fn refresh_lists(&self) {
        let snapshot = self.connector.snapshot();
        tokio::join!(
            self.refresh_balance(),
            self.sent.refresh(&snapshot),
            self.received.refresh(&snapshot),
        );
    }

    /// Reload everything, history included.
    pub async fn refresh_all(&self) {
        let snapshot = self.connector.snapshot();
        tokio::join!(
            self.refresh_balance(),
            self.sent.refresh(&snapshot),
            self.received.refresh(&snapshot),
            self.history.refresh(&snapshot),
        );
    }

    pub async fn send_gift(
        &self,
        recipient: &AccountAddress,
        amount: Octas,
        release: TimestampMillis,
    ) -> Option<Notification> {
        match self.connector.send_gift(recipient, amount, release).await {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::error!(%recipient, "send failed: {e}");
                None
            }
        }
    }

    pub async fn claim(&self, sender: &AccountAddress) -> Option<Notification> {
        self.received.claim(&self.connector, sender).await
    }

    pub async fn cancel(&self, recipient: &AccountAddress) -> Option<Notification> {
        self.sent.cancel(&self.connector, recipient).await
    }

    /// Keep the views current until `shutdown` resolves.
    ///
    /// Refreshes on every poll tick, wallet change and transaction flip, and
    /// calls `render` after each. The claim ticker runs for the lifetime of
    /// this call and triggers a render when a gift's claim state changes.
    /// An in-flight refresh is abandoned as soon as `shutdown` resolves.
    pub async fn run<F, S>(&self, poll_every: Duration, shutdown: S, mut render: F)
    where
        F: FnMut(&GiftPage, Trigger),
        S: Future<Output = ()>,
    {
        let mut wallet_rx = self.connector.subscribe();
        let mut txn_rx = self.connector.txn_state().subscribe();
        let ticker = ClaimTicker::spawn(Arc::clone(&self.clock), ClaimTicker::DEFAULT_PERIOD);
        let mut tick_rx = ticker.subscribe();
        let mut poll = tokio::time::interval(poll_every);
        let mut claimable = self.received.claimable_count();
        tokio::pin!(shutdown);

        info!(every = ?poll_every, "watching gifts");
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = poll.tick() => {
                    // a changed snapshot is picked up by the wallet branch instead
                    if !self.connector.sync() {
                        if !unless_shutdown(&mut shutdown, self.refresh_all()).await {
                            break;
                        }
                        claimable = self.received.claimable_count();
                        render(self, Trigger::Poll);
                    }
                }
                Ok(()) = wallet_rx.changed() => {
                    wallet_rx.borrow_and_update();
                    if !unless_shutdown(&mut shutdown, self.refresh_all()).await {
                        break;
                    }
                    claimable = self.received.claimable_count();
                    render(self, Trigger::WalletChanged);
                }
                Ok(()) = txn_rx.changed() => {
                    let in_progress = *txn_rx.borrow_and_update();
                    debug!(in_progress, "transaction state changed");
                    if !unless_shutdown(&mut shutdown, self.refresh_lists()).await {
                        break;
                    }
                    claimable = self.received.claimable_count();
                    render(self, Trigger::TxnChanged);
                }
                Ok(()) = tick_rx.changed() => {
                    tick_rx.borrow_and_update();
                    let now_claimable = self.received.claimable_count();
                    if now_claimable != claimable {
                        claimable = now_claimable;
                        render(self, Trigger::ClaimWindow);
                    }
                }
            }
        }
        drop(ticker);
        info!("stopped watching gifts");
    }
}

/// Drive `work` to completion unless `shutdown` resolves first.
/// Returns `false` when shut down.
async fn unless_shutdown<S, W>(shutdown: &mut S, work: W) -> bool
where
    S: Future<Output = ()> + Unpin,
    W: Future<Output = ()>,
{
    tokio::select! {
        _ = shutdown => false,
        _ = work => true,
    }
}
