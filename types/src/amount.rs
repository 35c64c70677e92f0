//! On-chain amounts.
//!
//! The chain stores APT as a fixed-point integer with 8 decimal places
//! ("octas"). Display values are `f64` APT; a malformed amount string yields
//! `f64::NAN` rather than an error so list views never fail on one bad row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Octas per APT (10^8).
pub const OCTAS_PER_APT: u64 = 100_000_000;

/// Raw on-chain amount in octas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Octas(u64);

impl Octas {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert to decimal APT for display.
    pub fn to_apt(&self) -> f64 {
        self.0 as f64 / OCTAS_PER_APT as f64
    }

    /// Convert a decimal APT amount to octas, rounding to the nearest octa.
    ///
    /// Returns `None` for negative, non-finite, or out-of-range input.
    pub fn from_apt(apt: f64) -> Option<Self> {
        if !apt.is_finite() || apt < 0.0 {
            return None;
        }
        Self::from_rounded((apt * OCTAS_PER_APT as f64).round())
    }

    /// `u64::MAX as f64` is 2^64, one past the largest representable amount.
    fn from_rounded(octas: f64) -> Option<Self> {
        if octas >= u64::MAX as f64 {
            return None;
        }
        Some(Self(octas as u64))
    }
}

impl fmt::Display for Octas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8} APT", self.to_apt())
    }
}

/// Scale an on-chain integer amount string to decimal APT.
///
/// Parsing is lenient in the same way a float parse is: anything that is not
/// a number produces `NaN`.
pub fn octas_str_to_apt(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(|v| v / OCTAS_PER_APT as f64)
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_eight_decimals() {
        assert_eq!(Octas::new(250_000_000).to_apt(), 2.5);
        assert_eq!(octas_str_to_apt("250000000"), 2.5);
        assert_eq!(octas_str_to_apt("1"), 0.00000001);
    }

    #[test]
    fn malformed_amount_is_nan() {
        assert!(octas_str_to_apt("ten").is_nan());
        assert!(octas_str_to_apt("").is_nan());
    }

    #[test]
    fn from_apt_rounds_to_nearest_octa() {
        assert_eq!(Octas::from_apt(1.5), Some(Octas::new(150_000_000)));
        assert_eq!(Octas::from_apt(0.1), Some(Octas::new(10_000_000)));
        assert_eq!(Octas::from_apt(-1.0), None);
        assert_eq!(Octas::from_apt(f64::NAN), None);
    }

    #[test]
    fn from_apt_rejects_amounts_past_u64() {
        assert_eq!(Octas::from_rounded(u64::MAX as f64), None);
        assert_eq!(Octas::from_rounded(2f64.powi(63)), Some(Octas::new(1 << 63)));
        assert_eq!(Octas::from_apt(1e12), None);
    }

    #[test]
    fn display_has_full_precision() {
        assert_eq!(Octas::new(1).to_string(), "0.00000001 APT");
    }
}
