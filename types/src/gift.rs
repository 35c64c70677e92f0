//! Gift display records.

use serde::{Deserialize, Serialize};

use crate::{AccountAddress, TimestampMillis};

/// A gift the connected account has sent and not yet seen claimed or cancelled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub recipient: AccountAddress,
    /// Decimal APT; `NaN` when the chain returned a non-numeric amount.
    pub amount: f64,
    /// `None` when the chain returned a non-numeric timestamp.
    pub release: Option<TimestampMillis>,
}

/// A gift addressed to the connected account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipientGift {
    pub sender: AccountAddress,
    pub amount: f64,
    pub release: Option<TimestampMillis>,
}

impl RecipientGift {
    /// Whether the gift can be claimed at `now`.
    ///
    /// The release instant itself is claimable. A gift with an unreadable
    /// release time is never claimable from the client side.
    pub fn is_claimable(&self, now: TimestampMillis) -> bool {
        self.release.is_some_and(|r| r.has_passed(now))
    }
}
