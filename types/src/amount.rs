//! Output value type.
//!
//! Values are fixed-point integers counted in raw units, so validation never
//! touches floating point. One coin is [`COIN`] raw units.
//!
//! The representation is signed on purpose: a transaction handed to the core
//! by a decoder may declare a negative output, and rejecting it is the job of
//! the validator rather than the type system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw units per coin.
pub const COIN: i64 = 100_000_000;

/// A value carried by a transaction output, in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Whole coins, e.g. `Amount::coins(25)` for a 25-coin block reward.
    pub const fn coins(coins: i64) -> Self {
        Self(coins * COIN)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Sum a sequence of amounts, returning `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Canonical little-endian encoding used when hashing and signing.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let coin = COIN as u64;
        write!(f, "{sign}{}.{:08}", abs / coin, abs % coin)
    }
}
