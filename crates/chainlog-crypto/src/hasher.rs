use chainlog_types::Commitment;
use sha2::{Digest, Sha256};

/// Payload carried by the first block of every chain.
pub const GENESIS_PAYLOAD: &[u8] = b"Genesis";

/// Derive a block commitment: `SHA-256(payload || previous)`.
///
/// `previous` is `None` for the genesis block, which is encoded as the empty
/// byte sequence. There is no delimiter between the two parts.
pub fn derive_commitment(payload: &[u8], previous: Option<&Commitment>) -> Commitment {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    if let Some(prev) = previous {
        hasher.update(prev.as_bytes());
    }
    Commitment::from_digest(hasher.finalize().into())
}

/// Commitment of the genesis block. Identical for every chain.
pub fn genesis_commitment() -> Commitment {
    derive_commitment(GENESIS_PAYLOAD, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let prev = Commitment::from_digest([3; 32]);
        assert_eq!(
            derive_commitment(b"payload", Some(&prev)),
            derive_commitment(b"payload", Some(&prev))
        );
    }

    #[test]
    fn genesis_is_sha256_of_label() {
        assert_eq!(
            genesis_commitment().to_hex(),
            "81ddc8d248b2dccdd3fdd5e84f0cad62b08f2d10b57f9a831c13451e5c5c80a5"
        );
    }

    #[test]
    fn previous_is_concatenated_without_delimiter() {
        let prev = Commitment::from_digest([9; 32]);
        let mut joined = b"tx".to_vec();
        joined.extend_from_slice(prev.as_bytes());
        assert_eq!(
            derive_commitment(b"tx", Some(&prev)),
            derive_commitment(&joined, None)
        );
    }

    #[test]
    fn empty_payload_is_accepted() {
        let empty = derive_commitment(b"", None);
        assert_eq!(
            empty.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn predecessor_changes_commitment() {
        let a = Commitment::from_digest([1; 32]);
        let b = Commitment::from_digest([2; 32]);
        assert_ne!(
            derive_commitment(b"same", Some(&a)),
            derive_commitment(b"same", Some(&b))
        );
    }
}
