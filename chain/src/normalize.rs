//! Conversion of raw chain data into display records.
//!
//! Everything here is pure: no I/O, no clock. Malformed numbers never fail a
//! conversion; amounts become `NaN` and timestamps become `None`.

use std::cmp::Reverse;

use tracing::debug;

use birthday_types::amount::octas_str_to_apt;
use birthday_types::{AccountAddress, Gift, HistoryEvent, RecipientGift, TimestampMillis};

use crate::wire::{GiftTuple, RawEvent};
use crate::ModuleId;

/// Pair up the parallel arrays of a gift tuple, index by index.
///
/// Output length is the shortest array's length.
fn zip_tuple(raw: &GiftTuple) -> impl Iterator<Item = (AccountAddress, f64, Option<TimestampMillis>)> + '_ {
    if raw.is_ragged() {
        debug!(
            addresses = raw.0.len(),
            amounts = raw.1.len(),
            timestamps = raw.2.len(),
            "gift tuple arrays differ in length"
        );
    }
    raw.0
        .iter()
        .zip(raw.1.iter())
        .zip(raw.2.iter())
        .map(|((address, amount), secs)| {
            (
                AccountAddress::new(address.clone()),
                octas_str_to_apt(amount),
                TimestampMillis::parse_secs(secs),
            )
        })
}

/// Gifts the account has sent, from `view_gifters_gifts`.
pub fn convert_gift_data(raw: &GiftTuple) -> Vec<Gift> {
    zip_tuple(raw)
        .map(|(recipient, amount, release)| Gift {
            recipient,
            amount,
            release,
        })
        .collect()
}

/// Gifts addressed to the account, from `view_recipients_gifts`.
pub fn convert_recipient_data(raw: &GiftTuple) -> Vec<RecipientGift> {
    zip_tuple(raw)
        .map(|(sender, amount, release)| RecipientGift {
            sender,
            amount,
            release,
        })
        .collect()
}

/// Display id of an event: sequence number and creation number written side
/// by side and read back as one integer (`"12"` + `"3"` → `123`).
pub fn event_id(sequence_number: &str, creation_number: &str) -> Option<u128> {
    format!("{}{}", sequence_number.trim(), creation_number.trim())
        .parse()
        .ok()
}

/// Shape one raw event. Unknown event types are kept with `kind = None`.
pub fn shape_event(raw: &RawEvent, module: &ModuleId) -> HistoryEvent {
    HistoryEvent {
        id: event_id(&raw.sequence_number, &raw.guid.creation_number),
        kind: module.kind_of(&raw.event_type),
        event_timestamp: TimestampMillis::parse_secs(&raw.data.event_creation_timestamp_seconds),
        recipient: AccountAddress::new(raw.data.recipient.clone()),
        gifter: AccountAddress::new(raw.data.gifter.clone()),
        amount: octas_str_to_apt(&raw.data.gift_amount_apt),
        gift_timestamp: TimestampMillis::parse_secs(&raw.data.birthday_timestamp_seconds),
    }
}

/// Keep the events that involve `account` and order them most recent first.
///
/// Only the connected account's address is normalized; event payloads
/// already store addresses without leading zeros. Equal timestamps fall back
/// to the larger id first; events with an unreadable timestamp go last.
pub fn filter_and_sort(events: Vec<HistoryEvent>, account: &AccountAddress) -> Vec<HistoryEvent> {
    let account = account.normalized();
    let mut kept: Vec<HistoryEvent> = events.into_iter().filter(|e| e.involves(&account)).collect();
    kept.sort_by_key(|e| Reverse((e.event_timestamp, e.id)));
    kept
}

/// Shape, filter and sort in one pass over every stream's raw events.
pub fn build_history(
    raw: &[RawEvent],
    module: &ModuleId,
    account: &AccountAddress,
) -> Vec<HistoryEvent> {
    let shaped = raw.iter().map(|r| shape_event(r, module)).collect();
    filter_and_sort(shaped, account)
}
