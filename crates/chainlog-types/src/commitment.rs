use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Width of a commitment digest in bytes.
pub const COMMITMENT_LEN: usize = 32;

/// A block commitment: the 256-bit digest binding a block's payload to its
/// predecessor.
///
/// Commitments are plain values. Two blocks with equal commitments are, up to
/// the collision resistance of the digest, the same block at the same position
/// in history.
///
/// Serialized form is lowercase hex rather than a byte array, so snapshots and
/// JSON reports show the same string `Display` prints and operators can compare
/// commitments across tools by eye.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Commitment([u8; COMMITMENT_LEN]);

impl Commitment {
    /// Wrap a pre-computed digest.
    pub const fn from_digest(digest: [u8; COMMITMENT_LEN]) -> Self {
        Self(digest)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Copy a commitment out of a byte slice of exactly [`COMMITMENT_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let digest: [u8; COMMITMENT_LEN] =
            bytes.try_into().map_err(|_| TypeError::InvalidLength {
                expected: COMMITMENT_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(digest))
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", self.short_hex())
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; COMMITMENT_LEN]> for Commitment {
    fn from(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Commitment> for [u8; COMMITMENT_LEN] {
    fn from(commitment: Commitment) -> Self {
        commitment.0
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
