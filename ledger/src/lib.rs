//! UTXO ledger state.
//!
//! - [`UtxoSet`]: the authoritative "can this be spent" map for one point in
//!   chain history.
//! - [`TransactionPool`]: transactions submitted for future inclusion.
//! - [`TxHandler`] / [`resolve`]: turns an unordered batch of candidates into
//!   a maximal mutually valid subset, applying it to a working set.

pub mod pool;
pub mod resolver;
pub mod utxo_set;

pub use pool::TransactionPool;
pub use resolver::{resolve, Resolution, TxHandler};
pub use utxo_set::UtxoSet;
