//! Gifts the connected account has sent.

use tracing::error;

use birthday_chain::{ChainError, GiftModule};
use birthday_types::{AccountAddress, Gift};
use birthday_wallet_core::{Notification, WalletConnector, WalletSnapshot};

use crate::list::ListState;

/// Pending gifts sent from the connected account, cancellable at any time.
#[derive(Clone)]
pub struct SentGiftList {
    module: GiftModule,
    state: ListState<Gift>,
}

impl SentGiftList {
    pub fn new(module: GiftModule) -> Self {
        Self {
            module,
            state: ListState::new("sent"),
        }
    }

    /// Re-query `view_gifters_gifts` for the snapshot's account.
    ///
    /// A disconnected wallet clears the list. Returns whether the result was
    /// stored (a newer refresh may have superseded it).
    pub async fn refresh(&self, wallet: &WalletSnapshot) -> bool {
        let ticket = self.state.begin();
        if !wallet.connected {
            return self.state.clear(ticket);
        }
        let result = match wallet.account.as_ref() {
            Some(account) => self.module.sent_gifts(account).await,
            None => Err(ChainError::NoAccount),
        };
        self.state.apply(ticket, result)
    }

    pub fn gifts(&self) -> Vec<Gift> {
        self.state.items()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.last_error()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Cancel the gift to `recipient` and return the funds to the sender.
    ///
    /// Failures are logged and yield `None`. The shared transaction flag is
    /// reset either way.
    pub async fn cancel(
        &self,
        connector: &WalletConnector,
        recipient: &AccountAddress,
    ) -> Option<Notification> {
        match connector.cancel_gift(recipient).await {
            Ok(notification) => Some(notification),
            Err(e) => {
                error!(%recipient, "cancel failed: {e}");
                None
            }
        }
    }
}
