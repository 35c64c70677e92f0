//! JSON shapes exchanged with the fullnode REST API.

use serde::{Deserialize, Serialize};

/// Body of a `POST /view` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

impl ViewRequest {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }

    pub fn type_arg(mut self, ty: impl Into<String>) -> Self {
        self.type_arguments.push(ty.into());
        self
    }

    pub fn arg(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.push(value.into());
        self
    }
}

/// Return value of the gift listing view functions: three parallel arrays of
/// addresses, octa amounts and release seconds (all as strings).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftTuple(pub Vec<String>, pub Vec<String>, pub Vec<String>);

impl GiftTuple {
    /// Length of the shortest of the three arrays.
    pub fn len(&self) -> usize {
        self.0.len().min(self.1.len()).min(self.2.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the three arrays disagree on length.
    pub fn is_ragged(&self) -> bool {
        self.0.len() != self.1.len() || self.1.len() != self.2.len()
    }
}

/// One record of an event stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: RawEventData,
    pub sequence_number: String,
    pub guid: EventGuid,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventGuid {
    pub creation_number: String,
    #[serde(default)]
    pub account_address: String,
}

/// Payload carried by every gift module event. Integers arrive as strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventData {
    pub recipient: String,
    pub gifter: String,
    pub gift_amount_apt: String,
    pub birthday_timestamp_seconds: String,
    pub event_creation_timestamp_seconds: String,
}

/// Error body returned by the fullnode on non-success responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error_code: String,
}
