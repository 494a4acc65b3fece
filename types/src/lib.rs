//! Fundamental types for the Cairn ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! hashes, amounts, output identifiers, keys, and chain parameters.

pub mod amount;
pub mod block;
pub mod hash;
pub mod keys;
pub mod outpoint;
pub mod params;

pub use amount::{Amount, COIN};
pub use block::BlockHash;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use outpoint::OutPoint;
pub use params::ChainParams;
