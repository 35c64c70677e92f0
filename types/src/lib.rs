//! Fundamental types for the birthday gift client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, octa amounts, millisecond timestamps, network identifiers,
//! and the display records for gifts and history events.

pub mod address;
pub mod amount;
pub mod error;
pub mod event;
pub mod gift;
pub mod network;
pub mod time;

pub use address::AccountAddress;
pub use amount::{Octas, OCTAS_PER_APT};
pub use error::TypesError;
pub use event::{EventKind, HistoryEvent};
pub use gift::{Gift, RecipientGift};
pub use network::NetworkId;
pub use time::TimestampMillis;
