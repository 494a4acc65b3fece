//! Block forest and chain manager for the Cairn ledger.
//!
//! The chain keeps every block within `cut_off_age` of the best height, each
//! with its own materialized unspent-output set, so a fork can be extended
//! without replaying history. Older generations are pruned as the best chain
//! advances, keeping memory bounded regardless of chain length.

pub mod block;
pub mod chain;
pub mod config;
pub mod error;
pub mod fork_tree;

pub use block::Block;
pub use chain::{BlockChain, ChainStats};
pub use config::ChainConfig;
pub use error::ChainError;
pub use fork_tree::{BlockNode, ForkTree};
