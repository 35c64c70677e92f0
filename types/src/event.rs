//! History event records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AccountAddress, TimestampMillis};

/// The three event kinds the gift module publishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    GiftAdded,
    GiftClaimed,
    GiftCancelled,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [Self::GiftAdded, Self::GiftClaimed, Self::GiftCancelled];

    /// Move struct name of the event within the module.
    pub fn struct_name(&self) -> &'static str {
        match self {
            Self::GiftAdded => "BirthdayGiftAddedEvent",
            Self::GiftClaimed => "BirthdayGiftClaimedEvent",
            Self::GiftCancelled => "BirthdayGiftRemovedEvent",
        }
    }

    /// Field of the module's `ModuleEvents` resource holding this stream.
    pub fn stream_field(&self) -> &'static str {
        match self {
            Self::GiftAdded => "birthday_gift_added_events",
            Self::GiftClaimed => "birthday_gift_claimed_events",
            Self::GiftCancelled => "birthday_gift_removed_events",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GiftAdded => "gift-added",
            Self::GiftClaimed => "gift-claimed",
            Self::GiftCancelled => "gift-cancelled",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the account history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Display key: sequence number and creation number concatenated.
    /// Not unique across streams.
    pub id: Option<u128>,
    /// `None` when the event type did not match a known kind.
    pub kind: Option<EventKind>,
    pub event_timestamp: Option<TimestampMillis>,
    pub recipient: AccountAddress,
    pub gifter: AccountAddress,
    pub amount: f64,
    pub gift_timestamp: Option<TimestampMillis>,
}

impl HistoryEvent {
    /// Whether `account` (already normalized) is the recipient or the gifter.
    pub fn involves(&self, account: &AccountAddress) -> bool {
        &self.recipient == account || &self.gifter == account
    }
}
