//! Transaction construction and signing.
//!
//! Signing digests cover every output, so outputs must be added before any
//! input is signed; adding an output afterwards invalidates earlier signatures.

use crate::error::TransactionError;
use crate::{Input, Output, Transaction};
use cairn_crypto::sign_message;
use cairn_types::{Amount, OutPoint, PrivateKey, PublicKey, Signature, TxHash};

#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    coinbase_height: Option<u64>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend `prev`. The input starts unsigned.
    pub fn input(mut self, prev: OutPoint) -> Self {
        self.inputs.push(Input {
            prev,
            signature: None,
        });
        self
    }

    /// Create an output of `value` owned by `owner`.
    pub fn output(mut self, value: Amount, owner: PublicKey) -> Self {
        self.outputs.push(Output { value, owner });
        self
    }

    pub fn coinbase_height(mut self, height: u64) -> Self {
        self.coinbase_height = Some(height);
        self
    }

    /// Sign input `index` with `key` over the input's current signing digest.
    pub fn sign_input(self, index: usize, key: &PrivateKey) -> Result<Self, TransactionError> {
        let digest = self
            .preview()
            .raw_data_to_sign(index)
            .ok_or(TransactionError::InputOutOfRange {
                index,
                len: self.inputs.len(),
            })?;
        let signature = sign_message(&digest, key);
        self.attach_signature(index, signature)
    }

    /// Sign every input with the same key.
    pub fn sign_all(mut self, key: &PrivateKey) -> Self {
        let unsigned = self.preview();
        for (index, input) in self.inputs.iter_mut().enumerate() {
            if let Some(digest) = unsigned.raw_data_to_sign(index) {
                input.signature = Some(sign_message(&digest, key));
            }
        }
        self
    }

    /// Attach an externally produced signature to input `index`.
    pub fn attach_signature(
        mut self,
        index: usize,
        signature: Signature,
    ) -> Result<Self, TransactionError> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(TransactionError::InputOutOfRange { index, len })?;
        input.signature = Some(signature);
        Ok(self)
    }

    /// Finalize: compute the content hash and freeze the transaction.
    pub fn build(self) -> Transaction {
        let mut tx = self.preview();
        tx.hash = tx.compute_hash();
        tx
    }

    fn preview(&self) -> Transaction {
        Transaction {
            hash: TxHash::ZERO,
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            coinbase_height: self.coinbase_height,
        }
    }
}
