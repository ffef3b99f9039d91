use chainlog_types::Commitment;

use crate::hasher::{derive_commitment, genesis_commitment, GENESIS_PAYLOAD};

/// Trait for records that participate in a hash chain.
pub trait Linked {
    /// The opaque payload bytes.
    fn payload(&self) -> &[u8];
    /// The predecessor's commitment (`None` for genesis).
    fn previous_commitment(&self) -> Option<Commitment>;
    /// The record's own stored commitment.
    fn commitment(&self) -> Commitment;
}

/// Hash chain integrity verifier.
///
/// Walks a sequence from genesis to tail and recomputes every commitment.
/// Stops at the first divergence: the smallest index where the stored
/// linkage disagrees with the predecessor, or where the recomputed
/// commitment disagrees with the stored one.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a full chain.
    ///
    /// Checks:
    /// 1. Index 0 is the fixed genesis block (sentinel link, genesis payload and commitment)
    /// 2. Each subsequent previous commitment matches the predecessor's commitment
    /// 3. Each commitment is correct for its payload and predecessor
    ///
    /// Linkage is checked before the commitment at the same index.
    pub fn verify<L: Linked>(blocks: &[L]) -> Result<(), StructuralViolation> {
        let Some(genesis) = blocks.first() else {
            return Err(StructuralViolation::new(0, ViolationKind::MissingGenesis));
        };
        Self::verify_genesis(genesis)?;

        for (offset, pair) in blocks.windows(2).enumerate() {
            Self::verify_successor(offset + 1, pair[0].commitment(), &pair[1])?;
        }

        Ok(())
    }

    fn verify_genesis<L: Linked>(genesis: &L) -> Result<(), StructuralViolation> {
        if genesis.previous_commitment().is_some() {
            return Err(StructuralViolation::new(0, ViolationKind::LinkageMismatch));
        }
        if genesis.payload() != GENESIS_PAYLOAD || genesis.commitment() != genesis_commitment() {
            return Err(StructuralViolation::new(0, ViolationKind::CommitmentMismatch));
        }
        Ok(())
    }

    fn verify_successor<L: Linked>(
        index: usize,
        predecessor: Commitment,
        block: &L,
    ) -> Result<(), StructuralViolation> {
        if block.previous_commitment() != Some(predecessor) {
            return Err(StructuralViolation::new(index, ViolationKind::LinkageMismatch));
        }
        if derive_commitment(block.payload(), Some(&predecessor)) != block.commitment() {
            return Err(StructuralViolation::new(index, ViolationKind::CommitmentMismatch));
        }
        Ok(())
    }
}

/// Which check failed at the first divergent index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Recomputed commitment differs from the stored one.
    CommitmentMismatch,
    /// Stored previous commitment differs from the predecessor's commitment.
    LinkageMismatch,
    /// The sequence is empty. A `Chain` never produces this.
    MissingGenesis,
}

/// Stored data disagrees with recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at index {index}")]
pub struct StructuralViolation {
    pub index: usize,
    pub kind: ViolationKind,
}

impl StructuralViolation {
    pub fn new(index: usize, kind: ViolationKind) -> Self {
        Self { index, kind }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::CommitmentMismatch => "commitment mismatch",
            Self::LinkageMismatch => "linkage mismatch",
            Self::MissingGenesis => "missing genesis block",
        };
        f.write_str(text)
    }
}
