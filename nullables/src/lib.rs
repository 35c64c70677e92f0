//! In-memory stand-ins for the chain, the wallet and the clock.
//!
//! Each nullable implements the same trait as its production counterpart
//! (`ChainClient`, `WalletAdapter`, `Clock`), answers from scripted state, and
//! records what it was asked so tests can assert on requests and payloads.

pub mod chain;
pub mod clock;
pub mod wallet;

pub use chain::{gift_tuple_json, make_event, NullChain};
pub use clock::NullClock;
pub use wallet::NullWallet;
