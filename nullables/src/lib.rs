//! Nullable infrastructure for deterministic testing.
//!
//! External capabilities the ledger core consumes are abstracted behind
//! traits. This crate provides test-friendly implementations that return
//! deterministic answers, can be steered programmatically, and record how
//! they were used.

pub mod verifier;

pub use verifier::NullVerifier;
