//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// An on-chain account address, kept exactly as reported.
///
/// Wallets may report addresses with leading zeros after the prefix
/// (`0x00ab...`) while event payloads store them without. Use
/// [`AccountAddress::normalized`] before comparing the two.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Maximum number of hex digits after the prefix (32 bytes).
    pub const MAX_HEX_LEN: usize = 64;

    /// Wrap a raw address string without validation.
    ///
    /// Addresses coming back from the chain are taken as-is; use
    /// [`AccountAddress::parse`] for user input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse and validate user input: `0x` followed by 1..=64 hex digits.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| TypesError::InvalidAddress(trimmed.to_string()))?;
        if digits.is_empty()
            || digits.len() > Self::MAX_HEX_LEN
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(TypesError::InvalidAddress(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this address is well-formed.
    pub fn is_valid(&self) -> bool {
        Self::parse(&self.0).is_ok()
    }

    /// Strip every leading zero immediately following the `0x` prefix.
    ///
    /// `0x00abc` becomes `0xabc`. An address that is all zeros collapses to
    /// `0x`, which is what the event payloads would never contain anyway.
    pub fn normalized(&self) -> Self {
        match self.0.strip_prefix(Self::PREFIX) {
            Some(digits) => Self(format!("{}{}", Self::PREFIX, digits.trim_start_matches('0'))),
            None => self.clone(),
        }
    }

    /// Whether two addresses refer to the same account once normalized.
    pub fn matches(&self, other: &AccountAddress) -> bool {
        self.normalized() == other.normalized()
    }

    /// Abbreviated form: the first `head` characters, `...`, and the last four.
    ///
    /// Addresses too short to abbreviate are returned unchanged.
    pub fn short(&self, head: usize) -> String {
        let s = self.0.as_str();
        if s.len() <= head + 4 || !s.is_ascii() {
            return s.to_string();
        }
        format!("{}...{}", &s[..head], &s[s.len() - 4..])
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
