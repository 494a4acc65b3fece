//! Nullable signature verifier.

use cairn_crypto::SignatureVerifier;
use cairn_types::{PublicKey, Signature};
use std::cell::Cell;
use std::collections::HashSet;

#[derive(Debug)]
enum Policy {
    AcceptAll,
    RejectAll,
    RejectKeys(HashSet<PublicKey>),
}

/// A deterministic [`SignatureVerifier`] that ignores the signature bytes.
///
/// Counts calls so tests can assert how much verification work was done.
#[derive(Debug)]
pub struct NullVerifier {
    policy: Policy,
    calls: Cell<u64>,
}

impl NullVerifier {
    /// Every signature verifies.
    pub fn accept_all() -> Self {
        Self::with_policy(Policy::AcceptAll)
    }

    /// No signature verifies.
    pub fn reject_all() -> Self {
        Self::with_policy(Policy::RejectAll)
    }

    /// Signatures verify unless made for one of `keys`.
    pub fn rejecting<I: IntoIterator<Item = PublicKey>>(keys: I) -> Self {
        Self::with_policy(Policy::RejectKeys(keys.into_iter().collect()))
    }

    fn with_policy(policy: Policy) -> Self {
        Self {
            policy,
            calls: Cell::new(0),
        }
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}

impl SignatureVerifier for NullVerifier {
    fn verify(&self, public_key: &PublicKey, _message: &[u8], _signature: &Signature) -> bool {
        self.calls.set(self.calls.get() + 1);
        match &self.policy {
            Policy::AcceptAll => true,
            Policy::RejectAll => false,
            Policy::RejectKeys(keys) => !keys.contains(public_key),
        }
    }
}
