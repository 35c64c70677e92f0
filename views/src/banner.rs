//! Persistent warning banners.

use serde::Serialize;
use std::fmt;

use birthday_types::NetworkId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Banner {
    /// The wallet is on a different network than the one the app is bound to.
    WrongNetwork { expected: NetworkId },
    /// The connected account has no on-chain resource yet.
    AccountNotFound { expected: NetworkId },
}

impl Banner {
    pub fn title(&self) -> &'static str {
        match self {
            Self::WrongNetwork { .. } => "Switch your network!",
            Self::AccountNotFound { .. } => "Account not found!",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::WrongNetwork { expected } => {
                format!("Switch your network to {expected} to use this app.")
            }
            Self::AccountNotFound { expected } => format!(
                "Please make sure your account exists on {expected} and try again."
            ),
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title(), self.description())
    }
}
