//! Page-owned "transaction in progress" state.
//!
//! One [`TxnState`] is created by the page and cloned into every view. Views
//! subscribe read-only to learn when a submission starts and ends; only the
//! submit path flips the flag, through a [`TxnGuard`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::WalletError;

#[derive(Clone, Debug)]
pub struct TxnState {
    tx: Arc<watch::Sender<bool>>,
}

impl TxnState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Receive every flip of the flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn in_progress(&self) -> bool {
        *self.tx.borrow()
    }

    /// Mark a submission as started.
    ///
    /// Fails with [`WalletError::TransactionInProgress`] while another guard
    /// is alive. The flag resets when the returned guard drops, whatever the
    /// submission's outcome.
    pub fn begin(&self) -> Result<TxnGuard, WalletError> {
        let mut acquired = false;
        self.tx.send_if_modified(|in_progress| {
            if *in_progress {
                false
            } else {
                *in_progress = true;
                acquired = true;
                true
            }
        });
        if acquired {
            Ok(TxnGuard {
                tx: Arc::clone(&self.tx),
            })
        } else {
            Err(WalletError::TransactionInProgress)
        }
    }
}

impl Default for TxnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the in-progress flag set; clears it on drop.
#[derive(Debug)]
pub struct TxnGuard {
    tx: Arc<watch::Sender<bool>>,
}

impl Drop for TxnGuard {
    fn drop(&mut self) {
        self.tx.send_replace(false);
    }
}
