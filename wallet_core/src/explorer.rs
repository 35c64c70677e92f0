//! Block-explorer links and success notices.

use serde::Serialize;

use birthday_types::NetworkId;

pub const EXPLORER_BASE_URL: &str = "https://explorer.aptoslabs.com";

/// Link to a transaction on the public explorer.
pub fn explorer_txn_url(hash: &str, network: NetworkId) -> String {
    format!("{EXPLORER_BASE_URL}/txn/{hash}?network={}", network.as_str())
}

/// A success notice shown after a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub hash: String,
    pub link: String,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        hash: impl Into<String>,
        network: NetworkId,
    ) -> Self {
        let hash = hash.into();
        Self {
            title: title.into(),
            description: description.into(),
            link: explorer_txn_url(&hash, network),
            hash,
        }
    }
}
