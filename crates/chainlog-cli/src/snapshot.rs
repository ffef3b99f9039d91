//! JSON snapshots of a chain.
//!
//! A snapshot is a JSON array of entries, one per block, in chain order.
//! Payloads are hex encoded and the genesis previous commitment is the empty
//! string. Snapshots are verified with the same walk a live chain uses.

use std::fs;
use std::path::Path;

use chainlog_crypto::Linked;
use chainlog_ledger::Block;
use chainlog_types::Commitment;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors raised while reading or writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry at position {position} carries index {found}")]
    IndexGap { position: usize, found: usize },
}

/// One block as stored in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub index: usize,
    #[serde(with = "hex_payload")]
    pub payload: Vec<u8>,
    #[serde(with = "hex_previous")]
    pub previous_commitment: Option<Commitment>,
    pub commitment: Commitment,
}

impl SnapshotEntry {
    pub fn from_block(index: usize, block: &Block) -> Self {
        Self {
            index,
            payload: block.payload().to_vec(),
            previous_commitment: block.previous_commitment(),
            commitment: block.commitment(),
        }
    }
}

impl Linked for SnapshotEntry {
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

pub fn entries(blocks: &[Block]) -> Vec<SnapshotEntry> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| SnapshotEntry::from_block(index, block))
        .collect()
}

pub fn to_json(entries: &[SnapshotEntry]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parse a snapshot. Entry indices must run 0, 1, 2, ...
pub fn from_json(text: &str) -> Result<Vec<SnapshotEntry>, SnapshotError> {
    let entries: Vec<SnapshotEntry> = serde_json::from_str(text)?;
    if let Some((position, entry)) = entries
        .iter()
        .enumerate()
        .find(|(position, entry)| entry.index != *position)
    {
        return Err(SnapshotError::IndexGap {
            position,
            found: entry.index,
        });
    }
    Ok(entries)
}

pub fn write(path: &Path, entries: &[SnapshotEntry]) -> Result<(), SnapshotError> {
    fs::write(path, to_json(entries)?)?;
    tracing::debug!(path = %path.display(), blocks = entries.len(), "snapshot written");
    Ok(())
}

pub fn read(path: &Path) -> Result<Vec<SnapshotEntry>, SnapshotError> {
    let entries = from_json(&fs::read_to_string(path)?)?;
    tracing::debug!(path = %path.display(), blocks = entries.len(), "snapshot read");
    Ok(entries)
}

mod hex_payload {
    use super::*;

    pub fn serialize<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

mod hex_previous {
    use super::*;

    pub fn serialize<S: Serializer>(
        previous: &Option<Commitment>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match previous {
            Some(commitment) => commitment.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Commitment>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        Commitment::from_hex(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chainlog_crypto::{ChainVerifier, StructuralViolation, ViolationKind};
    use chainlog_ledger::{Chain, ChainReader, ChainWriter};

    use super::*;

    fn sample_entries() -> Vec<SnapshotEntry> {
        let chain = Chain::new();
        chain.append(b"tx1");
        chain.append(b"tx2");
        entries(&chain.blocks())
    }

    #[test]
    fn genesis_previous_is_empty_string() {
        let json = to_json(&sample_entries()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["previous_commitment"], "");
        assert_eq!(value[1]["payload"], "747831");
        assert_eq!(value[2]["index"], 2);
    }

    #[test]
    fn file_roundtrip_still_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.json");
        let original = sample_entries();

        write(&path, &original).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded, original);
        assert!(ChainVerifier::verify(&loaded).is_ok());
    }

    #[test]
    fn edited_payload_fails_verification() {
        let json = to_json(&sample_entries())
            .unwrap()
            .replace("\"747831\"", "\"74783178\"");
        let loaded = from_json(&json).unwrap();

        let err = ChainVerifier::verify(&loaded).unwrap_err();
        assert_eq!(err, StructuralViolation::new(1, ViolationKind::CommitmentMismatch));
    }

    #[test]
    fn empty_snapshot_has_no_genesis() {
        let loaded = from_json("[]").unwrap();
        let err = ChainVerifier::verify(&loaded).unwrap_err();
        assert_eq!(err.kind, ViolationKind::MissingGenesis);
    }

    #[test]
    fn out_of_order_indices_rejected() {
        let mut entries = sample_entries();
        entries[2].index = 7;
        let json = to_json(&entries).unwrap();
        let err = from_json(&json).unwrap_err();
        assert!(matches!(err, SnapshotError::IndexGap { position: 2, found: 7 }));
    }

    #[test]
    fn bad_hex_rejected() {
        let json = r#"[{"index":0,"payload":"zz","previous_commitment":"","commitment":"00"}]"#;
        assert!(matches!(from_json(json), Err(SnapshotError::Json(_))));
    }
}
