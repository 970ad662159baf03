//! Content addressing and commitment hashing.
//!
//! One function, SHA-256, serves both purposes. It must be the same digest
//! the ledger reports for private records, so that a locally recomputed
//! digest is directly comparable to an on-ledger one.

use sha2::{Digest as _, Sha256};
use shared_types::Digest;

/// SHA-256 of `data`.
#[must_use]
pub fn digest(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Commodity id derived from its private attribute blob.
#[must_use]
pub fn commodity_id_of(attributes: &[u8]) -> String {
    hex::encode(digest(attributes))
}

/// Digest of a transfer commitment blob.
#[must_use]
pub fn commitment_hash(commitment: &[u8]) -> Digest {
    digest(commitment)
}

#[must_use]
pub fn to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // sha256("abc")
        assert_eq!(
            commodity_id_of(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_commitment_hash_matches_content_digest() {
        let blob = br#"{"commodity":"x","transferKey":1,"transfer_id":"t"}"#;
        assert_eq!(commitment_hash(blob), digest(blob));
        assert_eq!(to_hex(&digest(blob)), commodity_id_of(blob));
    }
}
