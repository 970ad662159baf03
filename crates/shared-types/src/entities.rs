//! # Core Host Entities
//!
//! Primitive identifiers and records handed out by the ledger host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A 32-byte SHA-256 digest.
pub type Digest = [u8; 32];

/// Organization (membership service provider) identifier.
pub type OrgId = String;

/// Ledger-assigned transaction identifier.
pub type TxId = String;

/// Named byte blobs supplied out-of-band alongside an invocation.
///
/// Never written to the public transaction record.
pub type TransientMap = BTreeMap<String, Vec<u8>>;

/// One historical version of a public key, as returned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Transaction that wrote this version.
    pub tx_id: TxId,
    /// Commit timestamp of that transaction.
    pub timestamp: DateTime<Utc>,
    /// Value written (empty for deletes).
    pub value: Vec<u8>,
    /// Whether this version is a delete marker.
    pub is_delete: bool,
}

/// A key/value pair read from a private partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateRecord {
    pub key: String,
    pub value: Vec<u8>,
}
