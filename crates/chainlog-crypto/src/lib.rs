//! Cryptographic primitives for Chainlog.
//!
//! Provides SHA-256 commitment derivation, the fixed genesis constants, and a
//! hash chain verifier that works over any sequence of [`Linked`] records.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainVerifier, Linked, StructuralViolation, ViolationKind};
pub use hasher::{derive_commitment, genesis_commitment, GENESIS_PAYLOAD};
