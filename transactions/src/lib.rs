//! UTXO transactions for the Cairn ledger.
//!
//! A transaction consumes previously created outputs (its inputs) and creates
//! new ones. Value may be destroyed, as an implicit fee, but never created;
//! the only value-creating transaction is a block's coinbase.
//!
//! - [`TransactionBuilder`] assembles, signs and hashes transactions.
//! - [`validation`] implements the five validity rules against an output set.

pub mod builder;
pub mod error;
pub mod validation;

pub use builder::TransactionBuilder;
pub use error::TransactionError;
pub use validation::{is_valid_transaction, validate_transaction, OutputSource};

use cairn_crypto::hash_transaction;
use cairn_types::{Amount, OutPoint, PublicKey, Signature, TxHash};
use serde::{Deserialize, Serialize};

/// A spendable output: a value and the key allowed to spend it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    pub value: Amount,
    pub owner: PublicKey,
}

impl Output {
    pub fn new(value: Amount, owner: PublicKey) -> Self {
        Self { value, owner }
    }
}

/// A reference to an existing output plus the owner's signature over this
/// input's signing digest (see [`Transaction::raw_data_to_sign`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    pub prev: OutPoint,
    pub signature: Option<Signature>,
}

/// A UTXO transaction. Immutable once built; `hash` commits to every other field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    /// Set only on coinbase transactions. Mixed into the hash so that two
    /// blocks paying the same reward to the same key still produce distinct
    /// coinbase ids.
    pub coinbase_height: Option<u64>,
}

impl Transaction {
    /// Build a coinbase: no inputs, a single output of `reward` to `owner`.
    pub fn coinbase(reward: Amount, owner: PublicKey, height: u64) -> Self {
        TransactionBuilder::new()
            .output(reward, owner)
            .coinbase_height(height)
            .build()
    }

    /// Whether this transaction has the shape of a coinbase paying `reward`:
    /// zero inputs and exactly one output worth exactly `reward`.
    pub fn is_coinbase_for(&self, reward: Amount) -> bool {
        self.inputs.is_empty() && self.outputs.len() == 1 && self.outputs[0].value == reward
    }

    /// The outpoint identifying output `index` of this transaction.
    pub fn outpoint(&self, index: u32) -> OutPoint {
        OutPoint::new(self.hash, index)
    }

    /// Iterate the outputs this transaction creates, keyed by outpoint.
    pub fn created_outputs(&self) -> impl Iterator<Item = (OutPoint, Output)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .map(|(i, output)| (self.outpoint(i as u32), *output))
    }

    /// Iterate the outpoints this transaction consumes.
    pub fn spent_outpoints(&self) -> impl Iterator<Item = OutPoint> + '_ {
        self.inputs.iter().map(|input| input.prev)
    }

    /// The digest the owner of input `index` must sign: the input's outpoint
    /// followed by every output's value and owner. `None` if out of range.
    pub fn raw_data_to_sign(&self, index: usize) -> Option<Vec<u8>> {
        let input = self.inputs.get(index)?;
        let mut data = Vec::with_capacity(36 + self.outputs.len() * 40);
        data.extend_from_slice(&input.prev.to_bytes());
        for output in &self.outputs {
            data.extend_from_slice(&output.value.to_le_bytes());
            data.extend_from_slice(output.owner.as_bytes());
        }
        Some(data)
    }

    /// Recompute the content hash from the current fields.
    pub fn compute_hash(&self) -> TxHash {
        let mut data = Vec::new();
        data.extend_from_slice(&(self.inputs.len() as u32).to_le_bytes());
        for input in &self.inputs {
            data.extend_from_slice(&input.prev.to_bytes());
            match &input.signature {
                Some(sig) => {
                    data.push(1);
                    data.extend_from_slice(sig.as_bytes());
                }
                None => data.push(0),
            }
        }
        data.extend_from_slice(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            data.extend_from_slice(&output.value.to_le_bytes());
            data.extend_from_slice(output.owner.as_bytes());
        }
        if let Some(height) = self.coinbase_height {
            data.extend_from_slice(&height.to_le_bytes());
        }
        hash_transaction(&[data.as_slice()])
    }

    /// Sum of output values, `None` on overflow.
    pub fn output_total(&self) -> Option<Amount> {
        Amount::checked_sum(self.outputs.iter().map(|o| o.value))
    }
}
