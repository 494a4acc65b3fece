//! Pending transaction pool.

use cairn_transactions::Transaction;
use cairn_types::TxHash;
use std::collections::HashMap;

/// Transactions submitted for inclusion in a future block, keyed by id.
///
/// Nothing is validated on the way in; validity is re-checked when a block is
/// assembled and again when it is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionPool {
    transactions: HashMap<TxHash, Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `tx`, replacing any transaction with the same id.
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.insert(tx.hash, tx);
    }

    pub fn remove_transaction(&mut self, hash: &TxHash) -> Option<Transaction> {
        self.transactions.remove(hash)
    }

    pub fn get(&self, hash: &TxHash) -> Option<&Transaction> {
        self.transactions.get(hash)
    }

    pub fn contains(&self, hash: &TxHash) -> bool {
        self.transactions.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Owned copies of every pending transaction, in no particular order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_types::{Amount, PublicKey};

    fn tx(seed: u8) -> Transaction {
        Transaction::coinbase(Amount::coins(1), PublicKey([seed; 32]), 1)
    }

    #[test]
    fn add_and_remove_by_id() {
        let mut pool = TransactionPool::new();
        let a = tx(1);
        pool.add_transaction(a.clone());
        pool.add_transaction(tx(2));

        assert_eq!(pool.len(), 2);
        assert!(pool.contains(&a.hash));
        assert_eq!(pool.remove_transaction(&a.hash), Some(a.clone()));
        assert!(!pool.contains(&a.hash));
        assert_eq!(pool.remove_transaction(&a.hash), None);
    }

    #[test]
    fn same_id_is_stored_once() {
        let mut pool = TransactionPool::new();
        pool.add_transaction(tx(3));
        pool.add_transaction(tx(3));
        assert_eq!(pool.len(), 1);
    }
}
