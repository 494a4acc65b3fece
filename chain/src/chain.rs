//! The chain manager: validates incoming blocks against their parent's
//! output set, tracks the best chain and prunes old generations.

use crate::block::Block;
use crate::error::ChainError;
use crate::fork_tree::{BlockNode, ForkTree};
use cairn_crypto::{Ed25519Verifier, SignatureVerifier};
use cairn_ledger::{resolve, TransactionPool, UtxoSet};
use cairn_transactions::Transaction;
use cairn_types::{BlockHash, ChainParams};

/// Counters over the lifetime of a [`BlockChain`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub blocks_accepted: u64,
    pub blocks_rejected: u64,
    pub transactions_confirmed: u64,
    pub generations_pruned: u64,
}

/// A block forest rooted at a genesis block, plus the pending pool.
///
/// Every retained block carries the output set produced by applying it on top
/// of its parent's set. Mutation takes `&mut self`; share across threads
/// behind a lock.
pub struct BlockChain<V = Ed25519Verifier> {
    params: ChainParams,
    tree: ForkTree,
    pool: TransactionPool,
    verifier: V,
    stats: ChainStats,
}

impl BlockChain<Ed25519Verifier> {
    /// A chain starting at `genesis`, verifying signatures with Ed25519.
    pub fn new(genesis: Block, params: ChainParams) -> Self {
        Self::with_verifier(genesis, params, Ed25519Verifier)
    }
}

impl<V: SignatureVerifier> BlockChain<V> {
    /// A chain starting at `genesis` with a caller-supplied verifier.
    ///
    /// The genesis output set holds the coinbase output and every output of
    /// the genesis transactions. Genesis transactions are trusted; their
    /// inputs are not resolved.
    pub fn with_verifier(genesis: Block, params: ChainParams, verifier: V) -> Self {
        let mut utxo_set = UtxoSet::new();
        utxo_set.add_outputs_of(&genesis.coinbase);
        for tx in &genesis.transactions {
            utxo_set.add_outputs_of(tx);
        }
        tracing::debug!(
            hash = %genesis.hash,
            outputs = utxo_set.len(),
            "chain initialised from genesis"
        );
        Self {
            params,
            tree: ForkTree::new(genesis, utxo_set),
            pool: TransactionPool::new(),
            verifier,
            stats: ChainStats::default(),
        }
    }

    /// Try to attach `block`. Returns whether it was accepted.
    pub fn add_block(&mut self, block: Block) -> bool {
        self.process_block(block).is_ok()
    }

    /// Validate and attach `block`, returning its height.
    ///
    /// A block already in the forest is accepted again without any change.
    /// On error nothing about the chain has changed apart from the rejection
    /// counter.
    pub fn process_block(&mut self, block: Block) -> Result<u64, ChainError> {
        let hash = block.hash;
        let result = self.try_add(block);
        if let Err(reason) = &result {
            self.stats.blocks_rejected += 1;
            tracing::debug!(%hash, %reason, "block rejected");
        }
        result
    }

    fn try_add(&mut self, block: Block) -> Result<u64, ChainError> {
        let parent_hash = block.prev_block_hash.ok_or(ChainError::SecondGenesis)?;
        let parent = self
            .tree
            .get(&parent_hash)
            .ok_or(ChainError::UnknownParent {
                parent: parent_hash,
            })?;
        if let Some(existing) = self.tree.get(&block.hash) {
            return Ok(existing.height());
        }

        let height = parent.height() + 1;
        self.check_coinbase(&block.coinbase, height)?;

        let best_height = self.tree.best_height();
        if height + self.params.cut_off_age <= best_height {
            return Err(ChainError::TooDeep {
                height,
                best_height,
                cut_off_age: self.params.cut_off_age,
            });
        }

        let resolution = resolve(
            &block.transactions,
            parent.utxo_set().clone(),
            &self.verifier,
        );
        let in_declared_order = resolution.accepted.len() == block.transactions.len()
            && resolution
                .accepted
                .iter()
                .zip(&block.transactions)
                .all(|(accepted, declared)| accepted.hash == declared.hash);
        if !in_declared_order {
            return Err(ChainError::InvalidTransactions {
                declared: block.transactions.len(),
                accepted: resolution.accepted.len(),
            });
        }

        let mut utxo_set = resolution.utxo_set;
        utxo_set.add_outputs_of(&block.coinbase);
        for tx in &block.transactions {
            self.pool.remove_transaction(&tx.hash);
        }

        let hash = block.hash;
        let tx_count = block.transactions.len();
        let previous_best = self.tree.best().hash();
        let inserted = self.tree.insert(block, utxo_set);
        debug_assert_eq!(inserted, Some(height));

        self.stats.blocks_accepted += 1;
        self.stats.transactions_confirmed += tx_count as u64;
        tracing::debug!(%hash, height, transactions = tx_count, "block accepted");

        if self.tree.best().hash() != previous_best {
            tracing::info!(%hash, height, "best chain advanced");
        }

        self.stats.generations_pruned += self.tree.prune(self.params.cut_off_age);
        Ok(height)
    }

    /// The coinbase must pay exactly the block reward and commit to the
    /// block's height, so no two coinbases on one chain share an id.
    fn check_coinbase(&self, coinbase: &Transaction, height: u64) -> Result<(), ChainError> {
        let well_formed = coinbase.is_coinbase_for(self.params.block_reward);
        if well_formed && coinbase.coinbase_height == Some(height) {
            return Ok(());
        }
        let reason = if !coinbase.inputs.is_empty() {
            format!("coinbase has {} inputs", coinbase.inputs.len())
        } else if coinbase.outputs.len() != 1 {
            format!("coinbase has {} outputs, expected 1", coinbase.outputs.len())
        } else if !well_formed {
            format!(
                "coinbase pays {}, block reward is {}",
                coinbase.outputs[0].value, self.params.block_reward
            )
        } else {
            match coinbase.coinbase_height {
                Some(claimed) => {
                    format!("coinbase claims height {claimed}, block is at {height}")
                }
                None => format!("coinbase carries no height, block is at {height}"),
            }
        };
        Err(ChainError::InvalidCoinbase { reason })
    }

    /// Submit a transaction for future inclusion. No validation is done.
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.pool.add_transaction(tx);
    }

    /// The first block to reach the maximum height.
    pub fn best_block(&self) -> &Block {
        self.tree.best().block()
    }

    pub fn best_height(&self) -> u64 {
        self.tree.best_height()
    }

    /// The unspent outputs after the best block.
    pub fn best_utxo_set(&self) -> &UtxoSet {
        self.tree.best().utxo_set()
    }

    pub fn transaction_pool(&self) -> &TransactionPool {
        &self.pool
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn fork_tree(&self) -> &ForkTree {
        &self.tree
    }

    /// A retained block by hash.
    pub fn block(&self, hash: &BlockHash) -> Option<&BlockNode> {
        self.tree.get(hash)
    }

    pub fn stats(&self) -> ChainStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_crypto::keypair_from_seed;
    use cairn_nullables::NullVerifier;
    use cairn_transactions::{Output, TransactionBuilder};
    use cairn_types::{Amount, KeyPair, OutPoint, PublicKey};

    const REWARD: Amount = Amount::coins(25);

    fn key(seed: u8) -> PublicKey {
        keypair(seed).public
    }

    fn keypair(seed: u8) -> KeyPair {
        keypair_from_seed(&[seed; 32])
    }

    fn spend(prev: OutPoint, value: Amount, from: u8, to: u8) -> Transaction {
        TransactionBuilder::new()
            .input(prev)
            .output(value, key(to))
            .sign_all(&keypair(from).private)
            .build()
    }

    fn chain() -> BlockChain<NullVerifier> {
        let genesis = Block::genesis(key(0), REWARD);
        BlockChain::with_verifier(genesis, ChainParams::default(), NullVerifier::accept_all())
    }

    fn extend(chain: &BlockChain<NullVerifier>, seed: u8, txs: Vec<Transaction>) -> Block {
        let parent = chain.best_block();
        Block::on_top_of(parent.hash, chain.best_height() + 1, key(seed), REWARD, txs)
    }

    #[test]
    fn genesis_snapshot_includes_genesis_transaction_outputs() {
        let gift = TransactionBuilder::new()
            .output(Amount::coins(5), key(8))
            .output(Amount::coins(6), key(9))
            .build();
        let genesis = Block::new(
            None,
            Transaction::coinbase(REWARD, key(0), 1),
            vec![gift.clone()],
        );
        let chain = BlockChain::with_verifier(
            genesis.clone(),
            ChainParams::default(),
            NullVerifier::accept_all(),
        );

        let set = chain.best_utxo_set();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.get(&genesis.coinbase.outpoint(0)),
            Some(&Output::new(REWARD, key(0)))
        );
        assert!(set.contains(&gift.outpoint(1)));
        assert_eq!(chain.best_height(), 1);
    }

    #[test]
    fn accepting_a_block_moves_best_and_adds_coinbase() {
        let mut chain = chain();
        let block = extend(&chain, 1, vec![]);
        assert_eq!(chain.process_block(block.clone()).unwrap(), 2);

        assert_eq!(chain.best_block().hash, block.hash);
        assert!(chain.best_utxo_set().contains(&block.coinbase.outpoint(0)));
        assert_eq!(chain.stats().blocks_accepted, 1);
    }

    #[test]
    fn second_genesis_is_rejected() {
        let mut chain = chain();
        let other = Block::genesis(key(5), REWARD);
        assert!(matches!(
            chain.process_block(other),
            Err(ChainError::SecondGenesis)
        ));
    }

    #[test]
    fn wrong_reward_is_rejected() {
        let mut chain = chain();
        let parent = chain.best_block().hash;
        let block = Block::on_top_of(parent, 2, key(1), Amount::coins(26), vec![]);
        assert!(matches!(
            chain.process_block(block),
            Err(ChainError::InvalidCoinbase { .. })
        ));
    }

    #[test]
    fn coinbase_with_inputs_is_rejected() {
        let mut chain = chain();
        let genesis = chain.best_block().clone();
        let coinbase = TransactionBuilder::new()
            .input(genesis.coinbase.outpoint(0))
            .output(REWARD, key(1))
            .build();
        let block = Block::new(Some(genesis.hash), coinbase, vec![]);
        let err = chain.process_block(block).unwrap_err();
        assert!(err.to_string().contains("1 inputs"));
    }

    #[test]
    fn coinbase_without_height_is_rejected() {
        let mut chain = chain();
        let parent = chain.best_block().hash;
        let coinbase = TransactionBuilder::new().output(REWARD, key(1)).build();
        let block = Block::new(Some(parent), coinbase, vec![]);

        let err = chain.process_block(block).unwrap_err();
        assert!(matches!(err, ChainError::InvalidCoinbase { .. }));
        assert!(err.to_string().contains("no height"));
    }

    #[test]
    fn both_entry_points_count_rejections() {
        let mut chain = chain();
        let other = Block::genesis(key(5), REWARD);
        assert!(chain.process_block(other.clone()).is_err());
        assert!(!chain.add_block(other));
        assert_eq!(chain.stats().blocks_rejected, 2);
        assert_eq!(chain.stats().blocks_accepted, 0);
    }

    #[test]
    fn duplicate_block_is_idempotent() {
        let mut chain = chain();
        let block = extend(&chain, 1, vec![]);
        chain.process_block(block.clone()).unwrap();
        let before = chain.best_utxo_set().clone();

        assert!(chain.add_block(block));
        assert_eq!(chain.best_utxo_set(), &before);
        assert_eq!(chain.fork_tree().len(), 2);
        assert_eq!(chain.stats().blocks_accepted, 1);
    }

    #[test]
    fn included_transactions_leave_the_pool() {
        let mut chain = chain();
        let genesis = chain.best_block().clone();
        let payment = spend(genesis.coinbase.outpoint(0), REWARD, 0, 2);
        let unrelated = TransactionBuilder::new()
            .output(Amount::coins(1), key(3))
            .build();
        chain.add_transaction(payment.clone());
        chain.add_transaction(unrelated.clone());

        let block = extend(&chain, 1, vec![payment.clone()]);
        assert!(chain.add_block(block));
        assert!(!chain.transaction_pool().contains(&payment.hash));
        assert!(chain.transaction_pool().contains(&unrelated.hash));
        assert_eq!(chain.stats().transactions_confirmed, 1);
    }

    #[test]
    fn rejected_signature_rejects_block() {
        let genesis = Block::genesis(key(0), REWARD);
        let mut chain = BlockChain::with_verifier(
            genesis.clone(),
            ChainParams::default(),
            NullVerifier::reject_all(),
        );
        let payment = spend(genesis.coinbase.outpoint(0), REWARD, 0, 2);
        let block = Block::on_top_of(genesis.hash, 2, key(1), REWARD, vec![payment]);

        assert!(matches!(
            chain.process_block(block),
            Err(ChainError::InvalidTransactions {
                declared: 1,
                accepted: 0
            })
        ));
        assert_eq!(chain.stats().blocks_rejected, 1);
        assert_eq!(chain.best_height(), 1);
    }
}
