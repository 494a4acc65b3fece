use cairn_types::{Amount, OutPoint};
use thiserror::Error;

/// Why a transaction failed validation, or could not be built.
///
/// Validation variants are listed in the order the rules are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("input {input} spends unknown or already-spent output {outpoint}")]
    UnknownOutput { input: usize, outpoint: OutPoint },

    #[error("input {input} spends {outpoint}, already claimed by an earlier input")]
    DuplicateInput { input: usize, outpoint: OutPoint },

    #[error("input {input} has a missing or invalid signature")]
    InvalidSignature { input: usize },

    #[error("output {output} has negative value {value}")]
    NegativeOutput { output: usize, value: Amount },

    #[error("outputs ({outputs}) exceed inputs ({inputs})")]
    ValueCreated { inputs: Amount, outputs: Amount },

    #[error("value sum overflowed")]
    Overflow,

    #[error("input index {index} out of range ({len} inputs)")]
    InputOutOfRange { index: usize, len: usize },
}
