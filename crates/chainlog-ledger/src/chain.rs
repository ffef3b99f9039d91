use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chainlog_crypto::{ChainVerifier, StructuralViolation};
use chainlog_types::Commitment;
use tracing::{debug, warn};

use crate::block::Block;
use crate::error::LedgerError;
use crate::traits::{ChainReader, ChainWriter};

/// Append-only sequence of hash-linked blocks.
///
/// The block vector lives behind a lock owned by the chain, so every append
/// runs "read tail, derive commitment, push" as one exclusive step and readers
/// never observe a half-built block. Share across threads with `Arc<Chain>`.
pub struct Chain {
    blocks: RwLock<Vec<Block>>,
}

impl Chain {
    /// Create a chain holding only the genesis block.
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(vec![Block::genesis()]),
        }
    }

    /// The genesis block. Identical for every chain.
    pub fn genesis(&self) -> Block {
        self.read_blocks()[0].clone()
    }

    // A panic cannot leave the vector half-written: the only mutation is a
    // single push of a fully derived block.
    fn read_blocks(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.blocks.read().unwrap_or_else(|poisoned| {
            warn!("chain lock poisoned; continuing with last consistent state");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_blocks(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.blocks.write().unwrap_or_else(|poisoned| {
            warn!("chain lock poisoned; continuing with last consistent state");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Chain {
    /// An independent chain with the same history.
    fn clone(&self) -> Self {
        Self {
            blocks: RwLock::new(self.read_blocks().clone()),
        }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks = self.read_blocks();
        f.debug_struct("Chain")
            .field("blocks", &blocks.len())
            .field("tip", &blocks.last().map(Block::commitment))
            .finish()
    }
}

impl ChainWriter for Chain {
    fn append(&self, payload: &[u8]) -> Block {
        let mut blocks = self.write_blocks();
        let tail = blocks
            .last()
            .map(Block::commitment)
            .unwrap_or_else(chainlog_crypto::genesis_commitment);

        let block = Block::successor(&tail, payload);
        blocks.push(block.clone());

        debug!(
            index = blocks.len() - 1,
            commitment = %block.commitment().short_hex(),
            len = payload.len(),
            "block appended"
        );
        block
    }
}

impl ChainReader for Chain {
    fn block_count(&self) -> usize {
        self.read_blocks().len()
    }

    fn tip(&self) -> Block {
        let blocks = self.read_blocks();
        blocks.last().cloned().unwrap_or_else(Block::genesis)
    }

    fn get(&self, index: usize) -> Option<Block> {
        self.read_blocks().get(index).cloned()
    }

    fn range(&self, from: usize, to: usize) -> Result<Vec<Block>, LedgerError> {
        let blocks = self.read_blocks();
        if from > to || to > blocks.len() {
            return Err(LedgerError::InvalidRange {
                from,
                to,
                len: blocks.len(),
            });
        }
        Ok(blocks[from..to].to_vec())
    }

    fn blocks(&self) -> Vec<Block> {
        self.read_blocks().clone()
    }

    fn position(&self, commitment: &Commitment) -> Option<usize> {
        self.read_blocks()
            .iter()
            .position(|block| block.commitment() == *commitment)
    }

    fn verify(&self) -> Result<(), StructuralViolation> {
        let blocks = self.read_blocks();
        match ChainVerifier::verify(blocks.as_slice()) {
            Ok(()) => {
                debug!(blocks = blocks.len(), "chain verified");
                Ok(())
            }
            Err(violation) => {
                warn!(index = violation.index, kind = %violation.kind, "chain verification failed");
                Err(violation)
            }
        }
    }
}
