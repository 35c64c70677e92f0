use proptest::prelude::*;

use birthday_chain::normalize::{convert_gift_data, convert_recipient_data, filter_and_sort};
use birthday_chain::GiftTuple;
use birthday_types::{AccountAddress, HistoryEvent, TimestampMillis};

fn rows() -> impl Strategy<Value = Vec<(String, u64, u64)>> {
    prop::collection::vec(
        ("0x[1-9a-f][0-9a-f]{0,15}", 0u64..u64::MAX / 2, 0u64..4_000_000_000),
        0..32,
    )
}

fn to_tuple(rows: &[(String, u64, u64)]) -> GiftTuple {
    GiftTuple(
        rows.iter().map(|r| r.0.clone()).collect(),
        rows.iter().map(|r| r.1.to_string()).collect(),
        rows.iter().map(|r| r.2.to_string()).collect(),
    )
}

proptest! {
    /// Sent gifts: same length, scaled amount and timestamp, original order.
    #[test]
    fn gift_conversion_scales_in_order(rows in rows()) {
        let gifts = convert_gift_data(&to_tuple(&rows));
        prop_assert_eq!(gifts.len(), rows.len());
        for (gift, (addr, amount, secs)) in gifts.iter().zip(rows.iter()) {
            prop_assert_eq!(gift.recipient.as_str(), addr.as_str());
            prop_assert_eq!(gift.amount, *amount as f64 / 1e8);
            prop_assert_eq!(gift.release, Some(TimestampMillis::new(secs * 1000)));
        }
    }

    /// Received gifts follow the same rules.
    #[test]
    fn recipient_conversion_scales_in_order(rows in rows()) {
        let gifts = convert_recipient_data(&to_tuple(&rows));
        prop_assert_eq!(gifts.len(), rows.len());
        for (gift, (addr, _, secs)) in gifts.iter().zip(rows.iter()) {
            prop_assert_eq!(gift.sender.as_str(), addr.as_str());
            prop_assert_eq!(gift.release.map(|r| r.as_secs()), Some(*secs));
        }
    }

    /// History output only involves the account and is non-increasing in time.
    #[test]
    fn history_is_filtered_and_descending(
        times in prop::collection::vec((0u64..1_000, prop::bool::ANY), 0..40)
    ) {
        let me = AccountAddress::new("0xabc");
        let events: Vec<HistoryEvent> = times
            .iter()
            .enumerate()
            .map(|(i, (t, mine))| HistoryEvent {
                id: Some(i as u128),
                kind: None,
                event_timestamp: Some(TimestampMillis::from_secs(*t)),
                recipient: AccountAddress::new(if *mine { "0xabc" } else { "0xdef" }),
                gifter: AccountAddress::new("0x999"),
                amount: 1.0,
                gift_timestamp: None,
            })
            .collect();
        let expected = times.iter().filter(|(_, mine)| *mine).count();

        let out = filter_and_sort(events, &AccountAddress::new("0x000abc"));
        prop_assert_eq!(out.len(), expected);
        prop_assert!(out.iter().all(|e| e.involves(&me)));
        prop_assert!(out.windows(2).all(|w| w[0].event_timestamp >= w[1].event_timestamp));
    }
}
