//! Consensus parameters of a chain.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};

/// Parameters every node on a chain must agree on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Maximum number of blocks a fork may trail the best chain before it is
    /// abandoned. Also bounds how many generations the forest retains
    /// (`cut_off_age + 1`).
    #[serde(default = "default_cut_off_age")]
    pub cut_off_age: u64,

    /// Value of the single coinbase output every block must carry.
    #[serde(default = "default_block_reward")]
    pub block_reward: Amount,
}

impl ChainParams {
    pub const DEFAULT_CUT_OFF_AGE: u64 = 10;
    pub const DEFAULT_BLOCK_REWARD: Amount = Amount::coins(25);
}

fn default_cut_off_age() -> u64 {
    ChainParams::DEFAULT_CUT_OFF_AGE
}

fn default_block_reward() -> Amount {
    ChainParams::DEFAULT_BLOCK_REWARD
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            cut_off_age: default_cut_off_age(),
            block_reward: default_block_reward(),
        }
    }
}
