//! Plain-text rendering of the views.

use birthday_types::{AccountAddress, Gift, HistoryEvent, TimestampMillis};
use birthday_utils::{format_apt, format_countdown};
use birthday_wallet_core::{Notification, WalletInfo, WalletSnapshot};

use crate::banner::Banner;
use crate::received::ReceivedRow;

pub const NO_SENT_GIFTS: &str =
    "You don't have any active gifts. Send a gift to someone to get started!";
pub const NO_RECEIVED_GIFTS: &str =
    "You have no gifts yet. Send some gifts to your friends for their birthdays!";
pub const NO_HISTORY: &str = "No results.";
pub const NOT_CONNECTED: &str = "Connect your wallet to continue.";

/// Left-aligned columns separated by two spaces.
struct Table {
    header: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: Vec<&'static str>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self, empty: &str) -> String {
        if self.rows.is_empty() {
            return format!("{}\n{}\n", self.header.join("  "), empty);
        }
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        let line = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(widths.iter())
                .map(|(c, w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        let mut out = line(self.header.clone());
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row.iter().map(String::as_str).collect()));
            out.push('\n');
        }
        out
    }
}

fn date_or_unknown(t: Option<TimestampMillis>) -> String {
    t.map(|t| t.local_date_time())
        .unwrap_or_else(|| "unknown".to_string())
}

fn short(addr: &AccountAddress) -> String {
    addr.short(6)
}

pub fn render_sent(gifts: &[Gift]) -> String {
    let mut table = Table::new(vec!["Recipient", "Birthday", "Amount"]);
    for gift in gifts {
        table.push(vec![
            short(&gift.recipient),
            date_or_unknown(gift.release),
            format_apt(gift.amount, 2),
        ]);
    }
    table.render(NO_SENT_GIFTS)
}

pub fn render_received(rows: &[ReceivedRow], now: TimestampMillis) -> String {
    let mut table = Table::new(vec!["From", "Amount", "Release time", "Claim"]);
    for row in rows {
        let claim = if row.claimable {
            "ready".to_string()
        } else {
            format!("locked ({})", format_countdown(row.gift.release, now))
        };
        table.push(vec![
            short(&row.gift.sender),
            format_apt(row.gift.amount, 2),
            date_or_unknown(row.gift.release),
            claim,
        ]);
    }
    table.render(NO_RECEIVED_GIFTS)
}

pub fn render_history(events: &[HistoryEvent]) -> String {
    let mut table = Table::new(vec!["Id", "Type", "Time", "Gifter", "Recipient", "Amount", "Birthday"]);
    for event in events {
        table.push(vec![
            event.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            event
                .kind
                .map(|k| k.label().to_string())
                .unwrap_or_else(|| "unknown".into()),
            date_or_unknown(event.event_timestamp),
            short(&event.gifter),
            short(&event.recipient),
            format_apt(event.amount, 2),
            event
                .gift_timestamp
                .map(|t| t.local_date())
                .unwrap_or_else(|| "unknown".into()),
        ]);
    }
    table.render(NO_HISTORY)
}

pub fn render_banners(banners: &[Banner]) -> String {
    banners
        .iter()
        .map(|b| format!("! {}\n  {}\n", b.title(), b.description()))
        .collect()
}

/// Wallet button text: balance and abbreviated address, or the connect hint.
pub fn render_wallet(wallet: &WalletSnapshot, balance: Option<&str>) -> String {
    if wallet.loading {
        return "Loading...".to_string();
    }
    match wallet.connected_account() {
        Some(account) => format!("{} APT | {}", balance.unwrap_or("0"), account.short(5)),
        None => NOT_CONNECTED.to_string(),
    }
}

pub fn render_wallets(wallets: &[WalletInfo]) -> String {
    let mut table = Table::new(vec!["Wallet", "Status"]);
    for wallet in wallets {
        let status = if wallet.is_installed() {
            "connect".to_string()
        } else {
            format!("install from {}", wallet.url)
        };
        table.push(vec![wallet.name.clone(), status]);
    }
    table.render("No wallets available.")
}

pub fn render_notification(n: &Notification) -> String {
    format!("{}\n{}\nView txn: {}\n", n.title, n.description, n.link)
}
