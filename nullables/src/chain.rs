//! Nullable chain: canned view results and event streams.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use birthday_chain::wire::{EventGuid, RawEventData};
use birthday_chain::{ChainClient, ChainError, ModuleId, RawEvent, ViewRequest};
use birthday_types::{AccountAddress, EventKind};

/// In-memory [`ChainClient`] that records every call.
///
/// View results are keyed by function name, optionally narrowed to a first
/// argument. Unknown functions and streams answer 404, like a fullnode would
/// for a module that is not deployed.
#[derive(Default)]
pub struct NullChain {
    views: Mutex<HashMap<String, Result<Value, u16>>>,
    view_delays: Mutex<HashMap<String, Duration>>,
    streams: Mutex<HashMap<String, Result<Vec<RawEvent>, u16>>>,
    missing_accounts: Mutex<HashSet<String>>,
    account_lookup_fails: Mutex<bool>,
    view_calls: Mutex<Vec<ViewRequest>>,
    stream_calls: Mutex<Vec<(String, String, u32)>>,
}

fn view_key(function: &str, first_arg: Option<&str>) -> String {
    match first_arg {
        Some(arg) => format!("{function}|{arg}"),
        None => function.to_string(),
    }
}

fn status_error(status: u16) -> ChainError {
    ChainError::Status {
        status,
        body: "simulated failure".to_string(),
    }
}

impl NullChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `function` with `value` for any arguments.
    pub fn set_view(&self, function: &str, value: Value) {
        self.views
            .lock()
            .unwrap()
            .insert(view_key(function, None), Ok(value));
    }

    /// Answer `function` with `value` only when called for `account`.
    pub fn set_view_for(&self, function: &str, account: &str, value: Value) {
        self.views
            .lock()
            .unwrap()
            .insert(view_key(function, Some(account)), Ok(value));
    }

    /// Answer `function` with an HTTP error status.
    pub fn fail_view(&self, function: &str, status: u16) {
        self.views
            .lock()
            .unwrap()
            .insert(view_key(function, None), Err(status));
    }

    /// Delay every answer to `function` by `delay`.
    pub fn delay_view(&self, function: &str, delay: Duration) {
        self.view_delays
            .lock()
            .unwrap()
            .insert(function.to_string(), delay);
    }

    /// Serve `events` from the stream stored in `field`.
    pub fn set_stream(&self, field: &str, events: Vec<RawEvent>) {
        self.streams
            .lock()
            .unwrap()
            .insert(field.to_string(), Ok(events));
    }

    pub fn fail_stream(&self, field: &str, status: u16) {
        self.streams
            .lock()
            .unwrap()
            .insert(field.to_string(), Err(status));
    }

    /// Report `address` as never created.
    pub fn set_account_missing(&self, address: &str) {
        self.missing_accounts
            .lock()
            .unwrap()
            .insert(address.to_string());
    }

    /// Make every account lookup fail with a transport error.
    pub fn fail_account_lookups(&self) {
        *self.account_lookup_fails.lock().unwrap() = true;
    }

    /// All view requests received so far.
    pub fn view_calls(&self) -> Vec<ViewRequest> {
        self.view_calls.lock().unwrap().clone()
    }

    /// Number of view requests made for `function`.
    pub fn view_call_count(&self, function: &str) -> usize {
        self.view_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.function == function)
            .count()
    }

    /// `(owner, field, limit)` of every stream read so far.
    pub fn stream_calls(&self) -> Vec<(String, String, u32)> {
        self.stream_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for NullChain {
    async fn view(&self, request: &ViewRequest) -> Result<Value, ChainError> {
        self.view_calls.lock().unwrap().push(request.clone());

        let delay = self.view_delays.lock().unwrap().get(&request.function).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let first_arg = request.arguments.first().and_then(Value::as_str);
        let views = self.views.lock().unwrap();
        let answer = views
            .get(&view_key(&request.function, first_arg))
            .or_else(|| views.get(&view_key(&request.function, None)))
            .cloned();
        match answer {
            Some(Ok(value)) => Ok(value),
            Some(Err(status)) => Err(status_error(status)),
            None => Err(status_error(404)),
        }
    }

    async fn events(
        &self,
        owner: &AccountAddress,
        _handle: &str,
        field: &str,
        limit: u32,
    ) -> Result<Vec<RawEvent>, ChainError> {
        self.stream_calls
            .lock()
            .unwrap()
            .push((owner.to_string(), field.to_string(), limit));
        match self.streams.lock().unwrap().get(field).cloned() {
            Some(Ok(events)) => Ok(events.into_iter().take(limit as usize).collect()),
            Some(Err(status)) => Err(status_error(status)),
            None => Err(status_error(404)),
        }
    }

    async fn account_exists(&self, address: &AccountAddress) -> Result<bool, ChainError> {
        if *self.account_lookup_fails.lock().unwrap() {
            return Err(ChainError::Http("simulated transport failure".into()));
        }
        Ok(!self
            .missing_accounts
            .lock()
            .unwrap()
            .contains(address.as_str()))
    }
}

/// JSON tuple returned by the gift listing view functions.
///
/// Rows are `(address, octas, release_secs)`.
pub fn gift_tuple_json(rows: &[(&str, u64, u64)]) -> Value {
    let addresses: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let amounts: Vec<String> = rows.iter().map(|r| r.1.to_string()).collect();
    let secs: Vec<String> = rows.iter().map(|r| r.2.to_string()).collect();
    json!([addresses, amounts, secs])
}

/// A gift module event as the fullnode would return it.
#[allow(clippy::too_many_arguments)]
pub fn make_event(
    module: &ModuleId,
    kind: EventKind,
    sequence_number: u64,
    recipient: &str,
    gifter: &str,
    octas: u64,
    birthday_secs: u64,
    created_secs: u64,
) -> RawEvent {
    let creation_number = match kind {
        EventKind::GiftAdded => 4,
        EventKind::GiftClaimed => 5,
        EventKind::GiftCancelled => 6,
    };
    RawEvent {
        event_type: module.event_type(kind),
        data: RawEventData {
            recipient: recipient.to_string(),
            gifter: gifter.to_string(),
            gift_amount_apt: octas.to_string(),
            birthday_timestamp_seconds: birthday_secs.to_string(),
            event_creation_timestamp_seconds: created_secs.to_string(),
        },
        sequence_number: sequence_number.to_string(),
        guid: EventGuid {
            creation_number: creation_number.to_string(),
            account_address: "0xbeef".to_string(),
        },
    }
}
