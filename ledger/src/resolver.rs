//! Fixed-point batch resolution.
//!
//! Given an unordered batch of candidate transactions, accept a maximal
//! mutually valid subset and apply it to a working copy of the output set.
//!
//! Candidates live in an index-addressed arena with an `accepted` flag. Each
//! pass re-validates every unaccepted candidate against the *current* working
//! set, so a transaction that spends an output created earlier in the same
//! batch is admitted once its parent has been applied; no dependency graph
//! is built. Passes repeat until one accepts nothing. Conflicting spends are
//! won by whichever candidate validates first, and the loser can never become
//! valid again because its input is gone.

use crate::utxo_set::UtxoSet;
use cairn_crypto::SignatureVerifier;
use cairn_transactions::{
    is_valid_transaction, validate_transaction, Transaction, TransactionError,
};

/// Applies batches of transactions to an owned working [`UtxoSet`].
pub struct TxHandler<'v, V: ?Sized> {
    utxo_set: UtxoSet,
    verifier: &'v V,
}

impl<'v, V: SignatureVerifier + ?Sized> TxHandler<'v, V> {
    /// Start from `utxo_set`. The handler owns and mutates its copy.
    pub fn new(utxo_set: UtxoSet, verifier: &'v V) -> Self {
        Self { utxo_set, verifier }
    }

    /// Whether `tx` is valid against the current working set.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        is_valid_transaction(tx, &self.utxo_set, self.verifier)
    }

    /// Accept a maximal mutually valid subset of `candidates`, updating the
    /// working set. Returned in order of acceptance. Rejected candidates are
    /// dropped silently.
    pub fn handle_txs(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        let mut accepted_flags = vec![false; candidates.len()];
        // Why each candidate failed on its most recent attempt.
        let mut exclusions: Vec<Option<TransactionError>> = vec![None; candidates.len()];
        let mut accepted = Vec::with_capacity(candidates.len());
        let mut pass = 0usize;

        loop {
            pass += 1;
            let mut progress = false;
            for (slot, tx) in candidates.iter().enumerate() {
                if accepted_flags[slot] {
                    continue;
                }
                match validate_transaction(tx, &self.utxo_set, self.verifier) {
                    Ok(()) => {
                        self.utxo_set.apply(tx);
                        accepted_flags[slot] = true;
                        exclusions[slot] = None;
                        accepted.push(tx.clone());
                        progress = true;
                    }
                    Err(reason) => exclusions[slot] = Some(reason),
                }
            }
            tracing::trace!(pass, accepted = accepted.len(), "resolver pass complete");
            if !progress {
                break;
            }
        }

        for (tx, reason) in candidates.iter().zip(&exclusions) {
            if let Some(reason) = reason {
                tracing::trace!(tx = %tx.hash, %reason, "candidate excluded");
            }
        }

        accepted
    }

    pub fn utxo_set(&self) -> &UtxoSet {
        &self.utxo_set
    }

    pub fn into_utxo_set(self) -> UtxoSet {
        self.utxo_set
    }
}

/// Outcome of [`resolve`].
#[derive(Clone, Debug)]
pub struct Resolution {
    /// Accepted transactions, in order of first acceptance.
    pub accepted: Vec<Transaction>,
    /// The input set with every accepted transaction applied.
    pub utxo_set: UtxoSet,
}

/// Resolve `candidates` against `utxo_set` in one call.
pub fn resolve<V>(candidates: &[Transaction], utxo_set: UtxoSet, verifier: &V) -> Resolution
where
    V: SignatureVerifier + ?Sized,
{
    let mut handler = TxHandler::new(utxo_set, verifier);
    let accepted = handler.handle_txs(candidates);
    Resolution {
        accepted,
        utxo_set: handler.into_utxo_set(),
    }
}
