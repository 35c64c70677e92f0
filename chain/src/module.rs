//! Typed queries against the deployed gift module.

use std::sync::Arc;

use birthday_types::{AccountAddress, EventKind, Gift, Octas, RecipientGift};

use crate::normalize::{convert_gift_data, convert_recipient_data};
use crate::wire::{GiftTuple, RawEvent, ViewRequest};
use crate::{ChainClient, ChainConfig, ChainError, ModuleId};

/// Standard coin balance view function.
pub const COIN_BALANCE_FUNCTION: &str = "0x1::coin::balance";

/// The native coin type.
pub const APTOS_COIN_TYPE: &str = "0x1::aptos_coin::AptosCoin";

/// Handle to the gift module on one network.
#[derive(Clone)]
pub struct GiftModule {
    client: Arc<dyn ChainClient>,
    module: ModuleId,
    resource_account: AccountAddress,
    event_limit: u32,
}

impl GiftModule {
    pub fn new(client: Arc<dyn ChainClient>, config: &ChainConfig) -> Self {
        Self {
            client,
            module: config.module(),
            resource_account: config.resource_account(),
            event_limit: config.event_limit,
        }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    pub fn client(&self) -> &Arc<dyn ChainClient> {
        &self.client
    }

    async fn gift_tuple(&self, function: &str, account: &AccountAddress) -> Result<GiftTuple, ChainError> {
        let request = ViewRequest::new(self.module.function(function)).arg(account.as_str());
        let value = self.client.view(&request).await?;
        serde_json::from_value(value)
            .map_err(|e| ChainError::Decode(format!("{function}: {e}")))
    }

    /// Gifts `account` has sent that are still pending.
    pub async fn sent_gifts(&self, account: &AccountAddress) -> Result<Vec<Gift>, ChainError> {
        let tuple = self.gift_tuple("view_gifters_gifts", account).await?;
        Ok(convert_gift_data(&tuple))
    }

    /// Gifts addressed to `account` that are still pending.
    pub async fn received_gifts(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<RecipientGift>, ChainError> {
        let tuple = self.gift_tuple("view_recipients_gifts", account).await?;
        Ok(convert_recipient_data(&tuple))
    }

    /// Every record of one event stream, up to the configured limit.
    pub async fn event_stream(&self, kind: EventKind) -> Result<Vec<RawEvent>, ChainError> {
        self.client
            .events(
                &self.resource_account,
                &self.module.events_handle(),
                kind.stream_field(),
                self.event_limit,
            )
            .await
    }

    /// Native coin balance of `account`.
    pub async fn coin_balance(&self, account: &AccountAddress) -> Result<Octas, ChainError> {
        let request = ViewRequest::new(COIN_BALANCE_FUNCTION)
            .type_arg(APTOS_COIN_TYPE)
            .arg(account.as_str());
        let value = self.client.view(&request).await?;
        parse_u64_result(&value).map(Octas::new)
    }

    pub async fn account_exists(&self, account: &AccountAddress) -> Result<bool, ChainError> {
        self.client.account_exists(account).await
    }
}

/// Read a single `u64` view result, which arrives as `["123"]`.
fn parse_u64_result(value: &serde_json::Value) -> Result<u64, ChainError> {
    let first = match value {
        serde_json::Value::Array(items) => items.first(),
        other => Some(other),
    };
    match first {
        Some(serde_json::Value::String(s)) => s
            .parse()
            .map_err(|e| ChainError::Decode(format!("balance {s:?}: {e}"))),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ChainError::Decode(format!("balance {n} is not a u64"))),
        _ => Err(ChainError::Decode(format!("unexpected balance result: {value}"))),
    }
}
