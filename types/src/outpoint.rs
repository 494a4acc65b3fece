//! Spendable-output identifiers.

use crate::hash::TxHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one output of one transaction: `(origin transaction, output index)`.
///
/// Immutable once created. The ledger's unspent-output set is keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction that produced the output.
    pub tx: TxHash,
    /// Position of the output in that transaction's output list.
    pub index: u32,
}

impl OutPoint {
    pub fn new(tx: TxHash, index: u32) -> Self {
        Self { tx, index }
    }

    /// Canonical encoding: 32 hash bytes followed by the little-endian index.
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..32].copy_from_slice(self.tx.as_bytes());
        out[32..].copy_from_slice(&self.index.to_le_bytes());
        out
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx, self.index)
    }
}
