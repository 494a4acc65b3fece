//! The unspent-output set.

use cairn_transactions::{Output, OutputSource, Transaction};
use cairn_types::{Amount, OutPoint};
use std::collections::HashMap;

/// All currently spendable value as of one point in chain history.
///
/// Every entry was produced by some transaction and has not been consumed in
/// this set's lineage. Each block node owns its own copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoSet {
    utxos: HashMap<OutPoint, Output>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_utxo(&mut self, outpoint: OutPoint, output: Output) {
        self.utxos.insert(outpoint, output);
    }

    pub fn remove_utxo(&mut self, outpoint: &OutPoint) -> Option<Output> {
        self.utxos.remove(outpoint)
    }

    pub fn get(&self, outpoint: &OutPoint) -> Option<&Output> {
        self.utxos.get(outpoint)
    }

    pub fn contains(&self, outpoint: &OutPoint) -> bool {
        self.utxos.contains_key(outpoint)
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OutPoint, &Output)> {
        self.utxos.iter()
    }

    /// Add every output `tx` creates without consuming anything.
    ///
    /// Used for coinbases and trusted genesis transactions.
    pub fn add_outputs_of(&mut self, tx: &Transaction) {
        self.utxos.extend(tx.created_outputs());
    }

    /// Consume the outputs `tx` spends and add the ones it creates.
    ///
    /// The caller must have validated `tx` against this set.
    pub fn apply(&mut self, tx: &Transaction) {
        for outpoint in tx.spent_outpoints() {
            self.utxos.remove(&outpoint);
        }
        self.add_outputs_of(tx);
    }

    /// Total spendable value, `None` on overflow.
    pub fn total_value(&self) -> Option<Amount> {
        Amount::checked_sum(self.utxos.values().map(|o| o.value))
    }
}

impl OutputSource for UtxoSet {
    fn output(&self, outpoint: &OutPoint) -> Option<&Output> {
        self.get(outpoint)
    }
}

impl FromIterator<(OutPoint, Output)> for UtxoSet {
    fn from_iter<I: IntoIterator<Item = (OutPoint, Output)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}
