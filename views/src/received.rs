//! Gifts addressed to the connected account.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use birthday_chain::{ChainError, GiftModule};
use birthday_types::{AccountAddress, RecipientGift, TimestampMillis};
use birthday_utils::Clock;
use birthday_wallet_core::{Notification, WalletConnector, WalletSnapshot};

use crate::list::ListState;

/// One received gift with its claim button state at a given instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceivedRow {
    pub gift: RecipientGift,
    pub claimable: bool,
}

/// Gifts sent to the connected account; claimable once their release time passes.
#[derive(Clone)]
pub struct ReceivedGiftList {
    module: GiftModule,
    clock: Arc<dyn Clock>,
    state: ListState<RecipientGift>,
}

impl ReceivedGiftList {
    pub fn new(module: GiftModule, clock: Arc<dyn Clock>) -> Self {
        Self {
            module,
            clock,
            state: ListState::new("received"),
        }
    }

    /// Re-query `view_recipients_gifts` for the snapshot's account.
    pub async fn refresh(&self, wallet: &WalletSnapshot) -> bool {
        let ticket = self.state.begin();
        if !wallet.connected {
            return self.state.clear(ticket);
        }
        let result = match wallet.account.as_ref() {
            Some(account) => self.module.received_gifts(account).await,
            None => Err(ChainError::NoAccount),
        };
        self.state.apply(ticket, result)
    }

    pub fn gifts(&self) -> Vec<RecipientGift> {
        self.state.items()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.last_error()
    }

    pub fn now(&self) -> TimestampMillis {
        self.clock.now()
    }

    /// Rows with claim eligibility evaluated at `now`.
    pub fn rows_at(&self, now: TimestampMillis) -> Vec<ReceivedRow> {
        self.state
            .items()
            .into_iter()
            .map(|gift| ReceivedRow {
                claimable: gift.is_claimable(now),
                gift,
            })
            .collect()
    }

    /// Rows with claim eligibility evaluated against the clock.
    pub fn rows(&self) -> Vec<ReceivedRow> {
        self.rows_at(self.clock.now())
    }

    /// How many gifts are claimable right now.
    pub fn claimable_count(&self) -> usize {
        let now = self.clock.now();
        self.state
            .items()
            .iter()
            .filter(|g| g.is_claimable(now))
            .count()
    }

    /// Claim the gift from `sender`.
    ///
    /// A listed gift whose release time has not come yet is not submitted,
    /// the same as a disabled claim button. Failures are logged and yield `None`.
    pub async fn claim(
        &self,
        connector: &WalletConnector,
        sender: &AccountAddress,
    ) -> Option<Notification> {
        let now = self.clock.now();
        let listed = self.state.items().into_iter().find(|g| g.sender.matches(sender));
        if let Some(gift) = listed {
            if !gift.is_claimable(now) {
                warn!(%sender, "gift is not claimable yet");
                return None;
            }
        }
        match connector.claim_gift(sender).await {
            Ok(notification) => Some(notification),
            Err(e) => {
                error!(%sender, "claim failed: {e}");
                None
            }
        }
    }
}
