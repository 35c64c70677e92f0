//! Entry-function payload building.

use serde::{Deserialize, Serialize};

use birthday_chain::ModuleId;
use birthday_types::{AccountAddress, Octas, TimestampMillis};

use crate::WalletError;

/// Payload type marker for entry-function transactions.
pub const ENTRY_FUNCTION_PAYLOAD: &str = "entry_function_payload";

/// A transaction payload handed to the wallet for signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<String>,
}

impl EntryFunctionPayload {
    pub fn new(function: String, arguments: Vec<String>) -> Self {
        Self {
            payload_type: ENTRY_FUNCTION_PAYLOAD.to_string(),
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// Builds the gift module's three entry-function payloads.
#[derive(Clone, Debug)]
pub struct GiftPayloads {
    module: ModuleId,
}

impl GiftPayloads {
    pub fn new(module: ModuleId) -> Self {
        Self { module }
    }

    /// Lock `amount` for `recipient` until `release`.
    ///
    /// The module works in whole seconds; sub-second precision is dropped.
    pub fn add_gift(
        &self,
        recipient: &AccountAddress,
        amount: Octas,
        release: TimestampMillis,
    ) -> Result<EntryFunctionPayload, WalletError> {
        if !recipient.is_valid() {
            return Err(WalletError::InvalidInput(format!("recipient {recipient}")));
        }
        if amount.is_zero() {
            return Err(WalletError::InvalidInput("gift amount must be positive".into()));
        }
        Ok(EntryFunctionPayload::new(
            self.module.function("add_birthday_gift"),
            vec![
                recipient.to_string(),
                amount.raw().to_string(),
                release.as_secs().to_string(),
            ],
        ))
    }

    /// Cancel the pending gift to `recipient`, returning the funds.
    pub fn remove_gift(&self, recipient: &AccountAddress) -> EntryFunctionPayload {
        EntryFunctionPayload::new(
            self.module.function("remove_birthday_gift"),
            vec![recipient.to_string()],
        )
    }

    /// Claim the gift sent by `gifter`.
    pub fn claim_gift(&self, gifter: &AccountAddress) -> EntryFunctionPayload {
        EntryFunctionPayload::new(
            self.module.function("claim_birthday_gift"),
            vec![gifter.to_string()],
        )
    }
}
