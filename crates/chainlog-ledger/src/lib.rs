//! Append-only, hash-linked block ledger for Chainlog.
//!
//! This crate is the heart of Chainlog. It provides:
//! - [`Block`], an immutable record committing to its predecessor
//! - [`Chain`], the append-only sequence that owns every block
//! - `ChainReader` / `ChainWriter` trait boundaries
//! - Full-chain verification reporting the first divergent index
//!
//! Payloads are opaque. Persistence and transport belong to the caller.

pub mod block;
pub mod chain;
pub mod error;
pub mod traits;

pub use block::Block;
pub use chain::Chain;
pub use chainlog_crypto::{StructuralViolation, ViolationKind, GENESIS_PAYLOAD};
pub use chainlog_types::Commitment;
pub use error::LedgerError;
pub use traits::{ChainReader, ChainWriter};
