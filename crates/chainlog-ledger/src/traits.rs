use chainlog_types::Commitment;
use chainlog_crypto::StructuralViolation;

use crate::block::Block;
use crate::error::LedgerError;

/// Write boundary for chain append operations.
pub trait ChainWriter: Send + Sync {
    /// Append a payload after the current tail and return a copy of the new block.
    fn append(&self, payload: &[u8]) -> Block;
}

/// Read boundary for chain queries and verification.
///
/// Every method hands out copies; nothing returned can alter the chain.
pub trait ChainReader: Send + Sync {
    /// Number of blocks, genesis included. Never zero.
    fn block_count(&self) -> usize;

    /// The current tail block.
    fn tip(&self) -> Block;

    /// The block at `index`, if the chain is that long.
    fn get(&self, index: usize) -> Option<Block>;

    /// Blocks in `from..to`.
    fn range(&self, from: usize, to: usize) -> Result<Vec<Block>, LedgerError>;

    /// Snapshot of the whole sequence.
    fn blocks(&self) -> Vec<Block>;

    /// Index of the block carrying `commitment`, if any.
    fn position(&self, commitment: &Commitment) -> Option<usize>;

    /// Recompute every commitment and report the first divergence.
    fn verify(&self) -> Result<(), StructuralViolation>;
}
