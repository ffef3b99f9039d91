use chainlog_crypto::{derive_commitment, genesis_commitment, Linked, GENESIS_PAYLOAD};
use chainlog_types::Commitment;
use serde::{Serialize, Serializer};

/// An immutable ledger record.
///
/// Blocks are only created by a [`Chain`](crate::Chain), either as its genesis
/// block or through `append`. Callers receive clones and can read every field,
/// but cannot construct or modify a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    #[serde(serialize_with = "serialize_payload")]
    pub(crate) payload: Vec<u8>,
    #[serde(serialize_with = "serialize_previous")]
    pub(crate) previous_commitment: Option<Commitment>,
    pub(crate) commitment: Commitment,
}

impl Block {
    /// The fixed first block: genesis payload, sentinel link.
    pub(crate) fn genesis() -> Self {
        Self {
            payload: GENESIS_PAYLOAD.to_vec(),
            previous_commitment: None,
            commitment: genesis_commitment(),
        }
    }

    /// Derive the block that follows `predecessor`.
    pub(crate) fn successor(predecessor: &Commitment, payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            previous_commitment: Some(*predecessor),
            commitment: derive_commitment(payload, Some(predecessor)),
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The predecessor's commitment, `None` for genesis.
    pub fn previous_commitment(&self) -> Option<Commitment> {
        self.previous_commitment
    }

    /// The predecessor's commitment as hashed: empty for genesis.
    pub fn previous_commitment_bytes(&self) -> &[u8] {
        match &self.previous_commitment {
            Some(commitment) => commitment.as_ref(),
            None => &[],
        }
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_commitment.is_none()
    }
}

impl Linked for Block {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn previous_commitment(&self) -> Option<Commitment> {
        self.previous_commitment
    }

    fn commitment(&self) -> Commitment {
        self.commitment
    }
}

fn serialize_payload<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(payload))
}

fn serialize_previous<S: Serializer>(
    previous: &Option<Commitment>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match previous {
        Some(commitment) => commitment.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}
