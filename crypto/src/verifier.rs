//! The signature-verification capability consumed by transaction validation.

use cairn_types::{PublicKey, Signature};

/// Opaque `verify(public_key, message, signature)` capability.
///
/// Implementations must return `false` for any malformed input rather than
/// panicking. Verification is synchronous and side-effect free.
pub trait SignatureVerifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        (**self).verify(public_key, message, signature)
    }
}

/// Ed25519 verification backed by `ed25519-dalek`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        crate::sign::verify_signature(message, signature, public_key)
    }
}
