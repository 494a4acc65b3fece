//! Blake2b-256 content addressing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use cairn_types::{BlockHash, TxHash};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash several byte slices as if they were concatenated, without allocating.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Hash a block's canonical encoding into its `BlockHash`.
pub fn hash_block(parts: &[&[u8]]) -> BlockHash {
    BlockHash::new(blake2b_256_multi(parts))
}

/// Hash a transaction's canonical encoding into its `TxHash`.
pub fn hash_transaction(parts: &[&[u8]]) -> TxHash {
    TxHash::new(blake2b_256_multi(parts))
}
