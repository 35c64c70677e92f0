//! Shared utilities for the birthday gift client.

pub mod display;
pub mod logging;
pub mod time;

pub use display::{format_apt, format_balance};
pub use logging::{init_logging, LogFormat};
pub use time::{format_countdown, format_duration, Clock, SystemClock};
