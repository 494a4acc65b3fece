//! Cryptographic primitives for the Cairn ledger.
//!
//! - **Ed25519** for signing and verifying input signatures
//! - **Blake2b-256** for transaction and block ids
//! - [`SignatureVerifier`], the capability the validator consumes, so the
//!   signature scheme can be swapped without touching consensus code

pub mod hash;
pub mod keys;
pub mod sign;
pub mod verifier;

pub use hash::{blake2b_256, blake2b_256_multi, hash_block, hash_transaction};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
pub use verifier::{Ed25519Verifier, SignatureVerifier};
