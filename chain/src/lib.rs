//! Chain access for the birthday gift client.
//!
//! - [`ChainClient`]: the read-only capability (view functions, event
//!   streams, account lookup), with [`RestClient`] as the fullnode-backed
//!   implementation.
//! - [`GiftModule`]: typed queries against the deployed `birthday_bot` module.
//! - [`normalize`]: pure conversion of raw tuples and events into display records.

pub mod client;
pub mod config;
pub mod error;
pub mod module;
pub mod normalize;
pub mod wire;

pub use client::{ChainClient, RestClient};
pub use config::{ChainConfig, ModuleId};
pub use error::ChainError;
pub use module::GiftModule;
pub use wire::{GiftTuple, RawEvent, RawEventData, ViewRequest};
