//! The block forest.
//!
//! Nodes live in a hash-indexed arena; each node lists its children by hash
//! and there are no parent back-pointers, so the forest is a plain ownership
//! tree. The roots are the retention frontier: initially the genesis, later
//! whatever generation pruning has advanced to. All roots share one height.

use crate::block::Block;
use cairn_ledger::UtxoSet;
use cairn_types::BlockHash;
use std::collections::HashMap;

/// One accepted block with its height and the output set after applying it.
#[derive(Clone, Debug)]
pub struct BlockNode {
    block: Block,
    height: u64,
    children: Vec<BlockHash>,
    utxo_set: UtxoSet,
}

impl BlockNode {
    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn hash(&self) -> BlockHash {
        self.block.hash
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn children(&self) -> &[BlockHash] {
        &self.children
    }

    pub fn utxo_set(&self) -> &UtxoSet {
        &self.utxo_set
    }
}

/// Retained blocks plus the best (max-height) pointer.
#[derive(Debug)]
pub struct ForkTree {
    nodes: HashMap<BlockHash, BlockNode>,
    roots: Vec<BlockHash>,
    frontier_height: u64,
    best: BlockHash,
}

impl ForkTree {
    /// Height of the genesis block.
    pub const GENESIS_HEIGHT: u64 = 1;

    /// A forest holding only `genesis` with its initial output set.
    pub fn new(genesis: Block, utxo_set: UtxoSet) -> Self {
        let hash = genesis.hash;
        let root = BlockNode {
            block: genesis,
            height: Self::GENESIS_HEIGHT,
            children: Vec::new(),
            utxo_set,
        };
        Self {
            nodes: HashMap::from([(hash, root)]),
            roots: vec![hash],
            frontier_height: Self::GENESIS_HEIGHT,
            best: hash,
        }
    }

    pub fn get(&self, hash: &BlockHash) -> Option<&BlockNode> {
        self.nodes.get(hash)
    }

    pub fn contains(&self, hash: &BlockHash) -> bool {
        self.nodes.contains_key(hash)
    }

    /// The first block to reach the current maximum height.
    pub fn best(&self) -> &BlockNode {
        // The best node is strictly above the frontier whenever pruning runs,
        // so it is never removed.
        &self.nodes[&self.best]
    }

    pub fn best_height(&self) -> u64 {
        self.best().height
    }

    pub fn roots(&self) -> &[BlockHash] {
        &self.roots
    }

    /// Height shared by every root.
    pub fn frontier_height(&self) -> u64 {
        self.frontier_height
    }

    /// Number of retained blocks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of generations currently retained, frontier included.
    pub fn generations(&self) -> u64 {
        let deepest = self.nodes.values().map(|n| n.height).max();
        deepest.map_or(0, |h| h - self.frontier_height + 1)
    }

    /// Blocks with no retained children.
    pub fn leaves(&self) -> impl Iterator<Item = &BlockNode> {
        self.nodes.values().filter(|n| n.children.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockNode> {
        self.nodes.values()
    }

    /// Attach `block` under its parent with `utxo_set` as its state.
    ///
    /// Returns the new node's height, or `None` if the parent is not retained
    /// or the block is already present. The best pointer moves only on a
    /// strictly greater height, so the first block seen at a height wins.
    pub fn insert(&mut self, block: Block, utxo_set: UtxoSet) -> Option<u64> {
        let parent_hash = block.prev_block_hash?;
        if self.nodes.contains_key(&block.hash) {
            return None;
        }
        let parent = self.nodes.get_mut(&parent_hash)?;
        let height = parent.height + 1;
        let hash = block.hash;
        parent.children.push(hash);

        self.nodes.insert(
            hash,
            BlockNode {
                block,
                height,
                children: Vec::new(),
                utxo_set,
            },
        );
        if height > self.best_height() {
            self.best = hash;
        }
        Some(height)
    }

    /// Advance the frontier until the best block is at most `cut_off_age`
    /// generations above it. Each step replaces the roots with the union of
    /// their children and drops the old roots.
    ///
    /// Returns the number of generations dropped.
    pub fn prune(&mut self, cut_off_age: u64) -> u64 {
        let mut generations = 0;
        while self.best_height() - self.frontier_height > cut_off_age {
            let old_roots = std::mem::take(&mut self.roots);
            let mut dropped = 0usize;
            for hash in old_roots {
                if let Some(node) = self.nodes.remove(&hash) {
                    self.roots.extend(node.children);
                    dropped += 1;
                }
            }
            self.frontier_height += 1;
            generations += 1;
            tracing::trace!(
                frontier_height = self.frontier_height,
                dropped,
                roots = self.roots.len(),
                "pruned one generation"
            );
        }
        generations
    }
}
