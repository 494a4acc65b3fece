//! Blocks: a coinbase plus an ordered list of transactions, linked to a parent.

use cairn_crypto::hash_block;
use cairn_transactions::Transaction;
use cairn_types::{Amount, BlockHash, PublicKey};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Parent link. `None` only for the genesis block.
    pub prev_block_hash: Option<BlockHash>,
    /// The block's single value-creating transaction.
    pub coinbase: Transaction,
    /// Ordinary transactions, in declared order.
    pub transactions: Vec<Transaction>,
    /// Hash over the parent link, the coinbase and every transaction id.
    pub hash: BlockHash,
}

impl Block {
    /// Assemble a block and compute its hash.
    pub fn new(
        prev_block_hash: Option<BlockHash>,
        coinbase: Transaction,
        transactions: Vec<Transaction>,
    ) -> Self {
        let mut block = Self {
            prev_block_hash,
            coinbase,
            transactions,
            hash: BlockHash::ZERO,
        };
        block.hash = block.compute_hash();
        block
    }

    /// A genesis block paying `reward` to `owner`, with no transactions.
    pub fn genesis(owner: PublicKey, reward: Amount) -> Self {
        Self::new(None, Transaction::coinbase(reward, owner, 1), Vec::new())
    }

    /// Build the block that extends `parent` at `height`, paying `reward` to `miner`.
    pub fn on_top_of(
        parent: BlockHash,
        height: u64,
        miner: PublicKey,
        reward: Amount,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self::new(
            Some(parent),
            Transaction::coinbase(reward, miner, height),
            transactions,
        )
    }

    pub fn is_genesis(&self) -> bool {
        self.prev_block_hash.is_none()
    }

    pub fn compute_hash(&self) -> BlockHash {
        let mut prev = Vec::with_capacity(33);
        match &self.prev_block_hash {
            Some(hash) => {
                prev.push(1u8);
                prev.extend_from_slice(hash.as_bytes());
            }
            None => prev.push(0u8),
        }
        let mut parts: Vec<&[u8]> = Vec::with_capacity(self.transactions.len() + 2);
        parts.push(prev.as_slice());
        parts.push(self.coinbase.hash.as_bytes());
        for tx in &self.transactions {
            parts.push(tx.hash.as_bytes());
        }
        hash_block(&parts)
    }
}
