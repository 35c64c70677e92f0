//! Headless views for the birthday gift client.
//!
//! Each view owns its display state, re-queries the chain when the wallet
//! snapshot or the shared transaction state changes, and degrades to an empty
//! list when a query fails. [`GiftPage`] wires the views to one wallet
//! connector and drives them from a single select loop.

pub mod banner;
pub mod gate;
pub mod history;
pub mod list;
pub mod page;
pub mod received;
pub mod render;
pub mod sent;
pub mod ticker;

pub use banner::Banner;
pub use gate::RefreshGate;
pub use history::HistoryView;
pub use page::{GiftPage, Trigger};
pub use received::{ReceivedGiftList, ReceivedRow};
pub use sent::SentGiftList;
pub use ticker::ClaimTicker;
