//! Integration tests wiring the views to a nullable chain, wallet and clock.
//!
//! Every test builds the same stack the CLI builds (module → connector →
//! views) with the network, the signer and time swapped for nullables.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use birthday_chain::module::COIN_BALANCE_FUNCTION;
use birthday_chain::{ChainClient, ChainConfig, GiftModule};
use birthday_nullables::wallet::NULL_WALLET_NAME;
use birthday_nullables::{gift_tuple_json, make_event, NullChain, NullClock, NullWallet};
use birthday_types::{AccountAddress, EventKind, NetworkId, Octas, TimestampMillis};
use birthday_views::{
    Banner, GiftPage, HistoryView, ReceivedGiftList, SentGiftList, Trigger,
};
use birthday_wallet_core::{TxnState, WalletAdapter, WalletConnector, WalletError};
use serde_json::json;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

const MODULE_ADDRESS: &str = "0xcafe";
const RESOURCE_ACCOUNT: &str = "0xbeef";
const ME: &str = "0xabc";

struct Harness {
    chain: Arc<NullChain>,
    wallet: Arc<NullWallet>,
    clock: Arc<NullClock>,
    module: GiftModule,
    connector: WalletConnector,
}

fn config() -> ChainConfig {
    ChainConfig {
        module_address: MODULE_ADDRESS.to_string(),
        resource_account_address: RESOURCE_ACCOUNT.to_string(),
        ..ChainConfig::default()
    }
}

fn harness(wallet: NullWallet) -> Harness {
    let chain = Arc::new(NullChain::new());
    let wallet = Arc::new(wallet);
    let clock = Arc::new(NullClock::new(0));
    let module = GiftModule::new(chain.clone() as Arc<dyn ChainClient>, &config());
    let connector = WalletConnector::new(
        wallet.clone() as Arc<dyn WalletAdapter>,
        module.clone(),
        NetworkId::Testnet,
        TxnState::new(),
    );
    Harness {
        chain,
        wallet,
        clock,
        module,
        connector,
    }
}

fn connected() -> Harness {
    harness(NullWallet::connected(ME, "testnet"))
}

impl Harness {
    fn function(&self, name: &str) -> String {
        self.module.module().function(name)
    }

    fn page(&self) -> GiftPage {
        GiftPage::new(self.connector.clone(), self.module.clone(), self.clock.clone())
    }
}

// ---------------------------------------------------------------------------
// Gift lists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sent_list_shows_pending_gifts() {
    let h = connected();
    h.chain.set_view_for(
        &h.function("view_gifters_gifts"),
        ME,
        gift_tuple_json(&[("0xf00d", 150_000_000, 1_700_000_000), ("0xd00d", 1, 5)]),
    );

    let sent = SentGiftList::new(h.module.clone());
    assert!(sent.refresh(&h.connector.snapshot()).await);

    let gifts = sent.gifts();
    assert_eq!(gifts.len(), 2);
    assert_eq!(gifts[0].recipient.as_str(), "0xf00d");
    assert!((gifts[0].amount - 1.5).abs() < 1e-12);
    assert_eq!(gifts[0].release, Some(TimestampMillis::from_secs(1_700_000_000)));
    assert!(sent.last_error().is_none());
}

#[tokio::test]
async fn failed_fetch_renders_empty_but_keeps_the_error() {
    let h = connected();
    let sent = SentGiftList::new(h.module.clone());
    h.chain.set_view(
        &h.function("view_gifters_gifts"),
        gift_tuple_json(&[("0xf00d", 100, 100)]),
    );
    sent.refresh(&h.connector.snapshot()).await;
    assert_eq!(sent.gifts().len(), 1);

    h.chain.fail_view(&h.function("view_gifters_gifts"), 500);
    assert!(sent.refresh(&h.connector.snapshot()).await);
    assert!(sent.is_empty());
    assert!(sent.last_error().is_some());
}

#[tokio::test]
async fn disconnected_wallet_clears_lists_without_querying() {
    let h = harness(NullWallet::new());
    let received = ReceivedGiftList::new(h.module.clone(), h.clock.clone());
    assert!(received.refresh(&h.connector.snapshot()).await);
    assert!(received.gifts().is_empty());
    assert!(received.last_error().is_none());
    assert!(h.chain.view_calls().is_empty());
}

#[tokio::test]
async fn claim_button_enables_exactly_at_release() {
    let h = connected();
    h.chain.set_view_for(
        &h.function("view_recipients_gifts"),
        ME,
        gift_tuple_json(&[("0xf00d", 100_000_000, 1_000)]),
    );
    let received = ReceivedGiftList::new(h.module.clone(), h.clock.clone());
    received.refresh(&h.connector.snapshot()).await;

    h.clock.set(999_999);
    assert!(!received.rows()[0].claimable);
    assert_eq!(received.claimable_count(), 0);

    h.clock.set(1_000_000);
    assert!(received.rows()[0].claimable);
    assert_eq!(received.claimable_count(), 1);
}

#[tokio::test]
async fn claim_refuses_a_locked_gift() {
    let h = connected();
    h.chain.set_view(
        &h.function("view_recipients_gifts"),
        gift_tuple_json(&[("0xf00d", 100_000_000, 1_000)]),
    );
    let received = ReceivedGiftList::new(h.module.clone(), h.clock.clone());
    received.refresh(&h.connector.snapshot()).await;

    let sender = AccountAddress::new("0xf00d");
    assert!(received.claim(&h.connector, &sender).await.is_none());
    assert!(h.wallet.submitted().is_empty());

    h.clock.set(1_000_000);
    let notice = received.claim(&h.connector, &sender).await.unwrap();
    assert_eq!(notice.title, "Gift claimed!");
    let submitted = h.wallet.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].function, h.function("claim_birthday_gift"));
    assert_eq!(submitted[0].arguments, vec!["0xf00d".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn stale_refresh_is_discarded() {
    let h = connected();
    let function = h.function("view_gifters_gifts");
    h.chain
        .set_view_for(&function, "0xa", gift_tuple_json(&[("0x1", 1, 1)]));
    h.chain
        .set_view_for(&function, "0xb", gift_tuple_json(&[("0x2", 2, 2), ("0x3", 3, 3)]));
    h.chain.delay_view(&function, Duration::from_secs(5));

    let sent = SentGiftList::new(h.module.clone());
    let mut first = h.connector.snapshot();
    first.account = Some(AccountAddress::new("0xa"));
    let mut second = first.clone();
    second.account = Some(AccountAddress::new("0xb"));

    let (first_stored, second_stored) = tokio::join!(sent.refresh(&first), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        sent.refresh(&second).await
    });

    assert!(!first_stored);
    assert!(second_stored);
    assert_eq!(sent.gifts().len(), 2);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

fn seed_history(h: &Harness) {
    let m = h.module.module();
    h.chain.set_stream(
        EventKind::GiftAdded.stream_field(),
        vec![
            make_event(m, EventKind::GiftAdded, 1, "0xabc", "0x9", 100, 50, 10),
            make_event(m, EventKind::GiftAdded, 2, "0x7", "0x8", 100, 50, 40),
        ],
    );
    h.chain.set_stream(
        EventKind::GiftClaimed.stream_field(),
        vec![make_event(m, EventKind::GiftClaimed, 1, "0xabc", "0x9", 100, 50, 30)],
    );
    h.chain.set_stream(
        EventKind::GiftCancelled.stream_field(),
        vec![make_event(m, EventKind::GiftCancelled, 1, "0x5", "0xabc", 100, 50, 20)],
    );
}

#[tokio::test]
async fn history_filters_by_normalized_account_and_sorts_newest_first() {
    let h = harness(NullWallet::connected("0x00abc", "testnet"));
    seed_history(&h);

    let history = HistoryView::new(h.module.clone(), NetworkId::Testnet);
    assert!(history.refresh(&h.connector.snapshot()).await);

    let times: Vec<u64> = history
        .events()
        .iter()
        .filter_map(|e| e.event_timestamp.map(|t| t.as_secs()))
        .collect();
    assert_eq!(times, vec![30, 20, 10]);
    assert!(history.failed_streams().is_empty());

    for (owner, _, limit) in h.chain.stream_calls() {
        assert_eq!(owner, RESOURCE_ACCOUNT);
        assert_eq!(limit, 10_000);
    }
}

#[tokio::test]
async fn one_failed_stream_does_not_hide_the_others() {
    let h = connected();
    seed_history(&h);
    h.chain
        .fail_stream(EventKind::GiftClaimed.stream_field(), 500);

    let history = HistoryView::new(h.module.clone(), NetworkId::Testnet);
    history.refresh(&h.connector.snapshot()).await;

    assert_eq!(history.events().len(), 2);
    assert_eq!(history.failed_streams(), vec![EventKind::GiftClaimed]);
}

#[tokio::test]
async fn missing_account_shows_banner_alongside_events() {
    let h = connected();
    seed_history(&h);
    h.chain.set_account_missing(ME);

    let history = HistoryView::new(h.module.clone(), NetworkId::Testnet);
    history.refresh(&h.connector.snapshot()).await;

    assert!(!history.account_exists());
    assert_eq!(history.events().len(), 3);
    assert_eq!(
        history.banners(&h.connector.snapshot()),
        vec![Banner::AccountNotFound {
            expected: NetworkId::Testnet
        }]
    );
}

#[tokio::test]
async fn account_lookup_failure_counts_as_missing() {
    let h = connected();
    h.chain.fail_account_lookups();
    let history = HistoryView::new(h.module.clone(), NetworkId::Testnet);
    history.refresh(&h.connector.snapshot()).await;
    assert!(!history.account_exists());
}

#[tokio::test]
async fn wrong_network_banner() {
    let h = harness(NullWallet::connected(ME, "mainnet"));
    let history = HistoryView::new(h.module.clone(), NetworkId::Testnet);
    history.refresh(&h.connector.snapshot()).await;
    let banners = history.banners(&h.connector.snapshot());
    assert_eq!(
        banners,
        vec![Banner::WrongNetwork {
            expected: NetworkId::Testnet
        }]
    );
    assert_eq!(banners[0].title(), "Switch your network!");
}

// ---------------------------------------------------------------------------
// Connector and transactions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_gift_submits_payload_and_links_explorer() {
    let h = connected();
    h.wallet.push_outcome(Ok("0xdead"));

    let notice = h
        .connector
        .send_gift(
            &AccountAddress::new("0xf00d"),
            Octas::new(250_000_000),
            TimestampMillis::from_secs(1_700_000_000),
        )
        .await
        .unwrap();

    assert_eq!(notice.hash, "0xdead");
    assert_eq!(
        notice.link,
        "https://explorer.aptoslabs.com/txn/0xdead?network=testnet"
    );
    let submitted = h.wallet.submitted();
    assert_eq!(submitted[0].function, h.function("add_birthday_gift"));
    assert_eq!(
        submitted[0].arguments,
        vec!["0xf00d".to_string(), "250000000".to_string(), "1700000000".to_string()]
    );
    assert!(!h.connector.txn_state().in_progress());
}

#[tokio::test]
async fn rejected_submission_resets_the_flag() {
    let h = connected();
    h.wallet.push_outcome(Err("user rejected"));

    let err = h
        .connector
        .cancel_gift(&AccountAddress::new("0xf00d"))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::Rejected(_)));
    assert!(!h.connector.txn_state().in_progress());

    // the next submission goes through
    assert!(h
        .connector
        .cancel_gift(&AccountAddress::new("0xf00d"))
        .await
        .is_ok());
}

#[tokio::test(start_paused = true)]
async fn second_submission_is_refused_while_one_is_in_flight() {
    let h = connected();
    h.wallet.set_submit_delay(Duration::from_secs(3));
    let gifter = AccountAddress::new("0xf00d");

    let (first, second) = tokio::join!(h.connector.claim_gift(&gifter), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(h.connector.txn_state().in_progress());
        h.connector.claim_gift(&gifter).await
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(WalletError::TransactionInProgress)));
    assert_eq!(h.wallet.submitted().len(), 1);
    assert!(!h.connector.txn_state().in_progress());
}

#[tokio::test]
async fn submitting_while_disconnected_fails() {
    let h = harness(NullWallet::new());
    let err = h
        .connector
        .claim_gift(&AccountAddress::new("0xf00d"))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::NotConnected));
    assert!(!h.connector.txn_state().in_progress());
}

#[tokio::test]
async fn connect_requires_an_installed_wallet() {
    let h = harness(NullWallet::new());
    assert!(matches!(
        h.connector.connect("Absent Wallet").await,
        Err(WalletError::NotInstalled(_))
    ));
    assert!(matches!(
        h.connector.connect("Nope").await,
        Err(WalletError::WalletNotFound(_))
    ));

    h.connector.connect(NULL_WALLET_NAME).await.unwrap();
    assert!(h.connector.snapshot().connected);

    h.connector.disconnect().await.unwrap();
    assert!(!h.connector.snapshot().connected);
}

#[tokio::test]
async fn balance_formats_and_falls_back_to_zero() {
    let h = connected();
    assert_eq!(h.connector.balance().await.as_deref(), Some("0"));

    h.chain.set_view(COIN_BALANCE_FUNCTION, json!(["123456789000"]));
    assert_eq!(h.connector.balance().await.as_deref(), Some("1,234.56789"));

    let calls = h.chain.view_calls();
    let last = calls.last().unwrap();
    assert_eq!(last.type_arguments, vec!["0x1::aptos_coin::AptosCoin".to_string()]);

    let disconnected = harness(NullWallet::new());
    assert_eq!(disconnected.connector.balance().await, None);
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_refresh_all_fills_every_view() {
    let h = connected();
    seed_history(&h);
    h.chain.set_view(
        &h.function("view_gifters_gifts"),
        gift_tuple_json(&[("0xf00d", 1, 1)]),
    );
    h.chain.set_view(
        &h.function("view_recipients_gifts"),
        gift_tuple_json(&[("0xd00d", 2, 2)]),
    );
    h.chain.set_view(COIN_BALANCE_FUNCTION, json!(["100000000"]));

    let page = h.page();
    page.refresh_all().await;

    assert_eq!(page.sent().gifts().len(), 1);
    assert_eq!(page.received().gifts().len(), 1);
    assert_eq!(page.history().events().len(), 3);
    assert_eq!(page.balance().as_deref(), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn page_loop_reacts_to_account_switch() {
    let h = connected();
    let page = h.page();
    let triggers = Arc::new(Mutex::new(Vec::new()));

    let wallet = h.wallet.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(6)).await;
        wallet.set_account("0xdef");
    });

    let seen = triggers.clone();
    page.run(
        Duration::from_secs(5),
        tokio::time::sleep(Duration::from_secs(12)),
        move |page, trigger| {
            seen.lock().unwrap().push((trigger, page.connector().snapshot().account));
        },
    )
    .await;

    let triggers = triggers.lock().unwrap();
    assert_eq!(triggers[0].0, Trigger::Poll);
    let switched = triggers
        .iter()
        .find(|(t, _)| *t == Trigger::WalletChanged)
        .expect("wallet change rendered");
    assert_eq!(switched.1, Some(AccountAddress::new("0xdef")));
}

#[tokio::test(start_paused = true)]
async fn stale_balance_is_discarded() {
    let h = harness(NullWallet::connected("0xa", "testnet"));
    h.chain
        .set_view_for(COIN_BALANCE_FUNCTION, "0xa", json!(["100000000"]));
    h.chain
        .set_view_for(COIN_BALANCE_FUNCTION, "0xb", json!(["200000000"]));
    h.chain
        .delay_view(COIN_BALANCE_FUNCTION, Duration::from_secs(5));
    let page = h.page();

    let (first_stored, second_stored) = tokio::join!(page.refresh_balance(), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        h.wallet.set_account("0xb");
        assert!(h.connector.sync());
        page.refresh_balance().await
    });

    assert!(!first_stored);
    assert!(second_stored);
    assert_eq!(page.balance().as_deref(), Some("2"));
}

#[tokio::test(start_paused = true)]
async fn page_loop_stops_without_waiting_for_slow_refresh() {
    let h = connected();
    h.chain.delay_view(
        &h.function("view_gifters_gifts"),
        Duration::from_secs(60),
    );
    let page = h.page();
    let renders = Arc::new(Mutex::new(0usize));

    let started = tokio::time::Instant::now();
    let counted = renders.clone();
    page.run(
        Duration::from_secs(5),
        tokio::time::sleep(Duration::from_secs(2)),
        move |_, _| *counted.lock().unwrap() += 1,
    )
    .await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(*renders.lock().unwrap(), 0);
}
