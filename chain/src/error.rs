use cairn_types::BlockHash;
use thiserror::Error;

/// Why a block was rejected, or the chain could not be configured.
///
/// Every rejection leaves the chain untouched.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("block has no parent; only the genesis may")]
    SecondGenesis,

    #[error("parent block {parent} is unknown or pruned")]
    UnknownParent { parent: BlockHash },

    #[error("malformed coinbase: {reason}")]
    InvalidCoinbase { reason: String },

    #[error("block at height {height} is too deep (best height {best_height}, cut-off age {cut_off_age})")]
    TooDeep {
        height: u64,
        best_height: u64,
        cut_off_age: u64,
    },

    #[error("only {accepted} of {declared} transactions are valid in declared order")]
    InvalidTransactions { declared: usize, accepted: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(#[from] cairn_utils::LoggingError),
}
