//! Transaction validity against an unspent-output set.
//!
//! Rules, checked in order and short-circuiting on the first failure:
//!
//! 1. every input references an output present in the set;
//! 2. no output is claimed twice by the same transaction;
//! 3. every input carries a valid signature by the claimed output's owner;
//! 4. every output value is non-negative;
//! 5. input value is at least output value.
//!
//! Validation never mutates the set. Applying an accepted transaction is the
//! ledger's job.

use crate::error::TransactionError;
use crate::{Output, Transaction};
use cairn_crypto::SignatureVerifier;
use cairn_types::{Amount, OutPoint};
use std::collections::{HashMap, HashSet};

/// Read access to the outputs a transaction may spend.
pub trait OutputSource {
    fn output(&self, outpoint: &OutPoint) -> Option<&Output>;
}

impl OutputSource for HashMap<OutPoint, Output> {
    fn output(&self, outpoint: &OutPoint) -> Option<&Output> {
        self.get(outpoint)
    }
}

impl<S: OutputSource + ?Sized> OutputSource for &S {
    fn output(&self, outpoint: &OutPoint) -> Option<&Output> {
        (**self).output(outpoint)
    }
}

/// Check `tx` against `utxos`, reporting the first rule it breaks.
pub fn validate_transaction<S, V>(
    tx: &Transaction,
    utxos: &S,
    verifier: &V,
) -> Result<(), TransactionError>
where
    S: OutputSource + ?Sized,
    V: SignatureVerifier + ?Sized,
{
    // Rule 1: every claimed output exists.
    let mut claimed = Vec::with_capacity(tx.inputs.len());
    for (input, spend) in tx.inputs.iter().enumerate() {
        let output = utxos
            .output(&spend.prev)
            .ok_or(TransactionError::UnknownOutput {
                input,
                outpoint: spend.prev,
            })?;
        claimed.push(output);
    }

    // Rule 2: no output claimed twice.
    let mut seen = HashSet::with_capacity(tx.inputs.len());
    for (input, spend) in tx.inputs.iter().enumerate() {
        if !seen.insert(spend.prev) {
            return Err(TransactionError::DuplicateInput {
                input,
                outpoint: spend.prev,
            });
        }
    }

    // Rule 3: the owner of each claimed output signed this input.
    for (input, (spend, output)) in tx.inputs.iter().zip(&claimed).enumerate() {
        let verified = match (&spend.signature, tx.raw_data_to_sign(input)) {
            (Some(signature), Some(digest)) => verifier.verify(&output.owner, &digest, signature),
            _ => false,
        };
        if !verified {
            return Err(TransactionError::InvalidSignature { input });
        }
    }

    // Rule 4: no negative outputs.
    if let Some((output, bad)) = tx
        .outputs
        .iter()
        .enumerate()
        .find(|(_, o)| o.value.is_negative())
    {
        return Err(TransactionError::NegativeOutput {
            output,
            value: bad.value,
        });
    }

    // Rule 5: value is destroyed, never created.
    let inputs =
        Amount::checked_sum(claimed.iter().map(|o| o.value)).ok_or(TransactionError::Overflow)?;
    let outputs = tx.output_total().ok_or(TransactionError::Overflow)?;
    if inputs < outputs {
        return Err(TransactionError::ValueCreated { inputs, outputs });
    }

    Ok(())
}

/// Boolean form of [`validate_transaction`].
pub fn is_valid_transaction<S, V>(tx: &Transaction, utxos: &S, verifier: &V) -> bool
where
    S: OutputSource + ?Sized,
    V: SignatureVerifier + ?Sized,
{
    validate_transaction(tx, utxos, verifier).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionBuilder;
    use cairn_crypto::{keypair_from_seed, Ed25519Verifier};
    use cairn_nullables::NullVerifier;
    use cairn_types::{KeyPair, Signature, TxHash};

    fn alice() -> KeyPair {
        keypair_from_seed(&[0xA1; 32])
    }

    fn bob() -> KeyPair {
        keypair_from_seed(&[0xB0; 32])
    }

    fn funding(seed: u8) -> OutPoint {
        OutPoint::new(TxHash::new([seed; 32]), 0)
    }

    /// Two 10-coin outputs owned by alice.
    fn utxos() -> HashMap<OutPoint, Output> {
        let mut set = HashMap::new();
        set.insert(funding(1), Output::new(Amount::coins(10), alice().public));
        set.insert(funding(2), Output::new(Amount::coins(10), alice().public));
        set
    }

    #[test]
    fn test_valid_spend() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::coins(7), bob().public)
            .output(Amount::coins(3), alice().public)
            .sign_all(&alice().private)
            .build();

        assert_eq!(validate_transaction(&tx, &utxos(), &Ed25519Verifier), Ok(()));
    }

    #[test]
    fn test_fee_is_allowed() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .input(funding(2))
            .output(Amount::coins(15), bob().public)
            .sign_all(&alice().private)
            .build();

        assert!(is_valid_transaction(&tx, &utxos(), &Ed25519Verifier));
    }

    #[test]
    fn test_unknown_output() {
        let tx = TransactionBuilder::new()
            .input(funding(9))
            .output(Amount::coins(1), bob().public)
            .sign_all(&alice().private)
            .build();

        assert!(matches!(
            validate_transaction(&tx, &utxos(), &Ed25519Verifier),
            Err(TransactionError::UnknownOutput { input: 0, .. })
        ));
    }

    #[test]
    fn test_self_double_spend() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .input(funding(1))
            .output(Amount::coins(1), bob().public)
            .sign_all(&alice().private)
            .build();

        assert!(matches!(
            validate_transaction(&tx, &utxos(), &Ed25519Verifier),
            Err(TransactionError::DuplicateInput { input: 1, .. })
        ));
    }

    #[test]
    fn test_signature_by_wrong_key() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::coins(1), bob().public)
            .sign_all(&bob().private)
            .build();

        assert_eq!(
            validate_transaction(&tx, &utxos(), &Ed25519Verifier),
            Err(TransactionError::InvalidSignature { input: 0 })
        );
    }

    #[test]
    fn test_missing_signature() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::coins(1), bob().public)
            .build();

        // Even a permissive verifier cannot accept an absent signature.
        assert_eq!(
            validate_transaction(&tx, &utxos(), &NullVerifier::accept_all()),
            Err(TransactionError::InvalidSignature { input: 0 })
        );
    }

    #[test]
    fn test_garbage_signature() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::coins(1), bob().public)
            .attach_signature(0, Signature([0xEE; 64]))
            .unwrap()
            .build();

        assert!(!is_valid_transaction(&tx, &utxos(), &Ed25519Verifier));
    }

    #[test]
    fn test_negative_output() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::coins(12), bob().public)
            .output(Amount::coins(-5), alice().public)
            .sign_all(&alice().private)
            .build();

        assert_eq!(
            validate_transaction(&tx, &utxos(), &Ed25519Verifier),
            Err(TransactionError::NegativeOutput {
                output: 1,
                value: Amount::coins(-5)
            })
        );
    }

    #[test]
    fn test_value_creation() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::coins(11), bob().public)
            .sign_all(&alice().private)
            .build();

        assert_eq!(
            validate_transaction(&tx, &utxos(), &Ed25519Verifier),
            Err(TransactionError::ValueCreated {
                inputs: Amount::coins(10),
                outputs: Amount::coins(11)
            })
        );
    }

    #[test]
    fn test_output_overflow() {
        let tx = TransactionBuilder::new()
            .input(funding(1))
            .output(Amount::new(i64::MAX), bob().public)
            .output(Amount::new(1), bob().public)
            .sign_all(&alice().private)
            .build();

        assert_eq!(
            validate_transaction(&tx, &utxos(), &Ed25519Verifier),
            Err(TransactionError::Overflow)
        );
    }

    #[test]
    fn test_rules_short_circuit_in_order() {
        // Unknown output and bad signature: rule 1 is reported.
        let tx = TransactionBuilder::new()
            .input(funding(9))
            .output(Amount::coins(-1), bob().public)
            .build();

        assert!(matches!(
            validate_transaction(&tx, &utxos(), &NullVerifier::reject_all()),
            Err(TransactionError::UnknownOutput { .. })
        ));
    }

    #[test]
    fn test_no_inputs_no_outputs_is_valid() {
        let tx = TransactionBuilder::new().build();
        assert!(is_valid_transaction(&tx, &utxos(), &NullVerifier::reject_all()));
    }
}
