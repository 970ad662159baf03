//! # Driven Ports (SPI - Outbound)
//!
//! The ledger host the contract runs inside. One `LedgerStub` is a view of a
//! single invocation: reads observe committed state, writes are buffered and
//! committed by the host as one unit after the invocation returns `Ok`.
//! Nothing written through the stub is visible to reads in the same
//! invocation.

use shared_types::{Digest, KeyModification, LedgerError, OrgId, PrivateRecord};
use std::collections::BTreeSet;

/// Per-invocation access to public state and private partitions.
pub trait LedgerStub {
    // === Public state ===

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Every committed version of `key`, oldest first.
    fn get_history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, LedgerError>;

    /// Replace the set of organizations that must endorse changes to `key`.
    fn set_state_endorsement(&mut self, key: &str, orgs: BTreeSet<OrgId>) -> Result<(), LedgerError>;

    // === Private partitions ===

    fn get_private_data(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Digest of a private record, readable without access to its content.
    fn get_private_data_hash(&self, partition: &str, key: &str) -> Result<Option<Digest>, LedgerError>;

    fn put_private_data(&mut self, partition: &str, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    fn del_private_data(&mut self, partition: &str, key: &str) -> Result<(), LedgerError>;

    /// Records of `partition` whose key starts with `prefix`, in key order.
    fn get_private_data_by_prefix(
        &self,
        partition: &str,
        prefix: &str,
    ) -> Result<Vec<PrivateRecord>, LedgerError>;
}
