//! # In-Memory Ledger Host
//!
//! A single-node stand-in for the ledger host, for tests and embedders.
//!
//! ## Commit Model
//!
//! - `begin()` opens a `TxSimulation`: reads see committed state only, writes
//!   are buffered in a write set.
//! - `commit()` applies the whole write set under one lock, appending a
//!   history entry per public write.
//! - `execute()` commits only if the invocation returned `Ok`, so a failed
//!   invocation leaves the ledger untouched.

use crate::domain::digest::digest;
use crate::ports::outbound::LedgerStub;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_types::{CallContext, Digest, KeyModification, LedgerError, OrgId, PrivateRecord, TxId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

type Partition = BTreeMap<String, Vec<u8>>;

#[derive(Debug, Default)]
struct LedgerState {
    public: BTreeMap<String, Vec<u8>>,
    private: BTreeMap<String, Partition>,
    history: BTreeMap<String, Vec<KeyModification>>,
    endorsement: BTreeMap<String, BTreeSet<OrgId>>,
    writes_applied: u64,
    commits: u64,
}

#[derive(Debug, Clone)]
enum Write {
    PutState { key: String, value: Vec<u8> },
    SetEndorsement { key: String, orgs: BTreeSet<OrgId> },
    PutPrivate { partition: String, key: String, value: Vec<u8> },
    DelPrivate { partition: String, key: String },
}

/// In-memory ledger with atomic per-invocation commits.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a simulation for one invocation.
    pub fn begin(&self, ctx: &CallContext) -> TxSimulation<'_> {
        TxSimulation {
            ledger: self,
            tx_id: ctx.tx_id().to_string(),
            timestamp: ctx.timestamp(),
            writes: Vec::new(),
        }
    }

    /// Apply a simulation's write set as one unit.
    pub fn commit(&self, sim: TxSimulation<'_>) {
        let mut state = self.state.write();
        let write_count = sim.writes.len() as u64;
        for write in sim.writes {
            match write {
                Write::PutState { key, value } => {
                    state.history.entry(key.clone()).or_default().push(KeyModification {
                        tx_id: sim.tx_id.clone(),
                        timestamp: sim.timestamp,
                        value: value.clone(),
                        is_delete: false,
                    });
                    state.public.insert(key, value);
                }
                Write::SetEndorsement { key, orgs } => {
                    state.endorsement.insert(key, orgs);
                }
                Write::PutPrivate {
                    partition,
                    key,
                    value,
                } => {
                    state.private.entry(partition).or_default().insert(key, value);
                }
                Write::DelPrivate { partition, key } => {
                    if let Some(records) = state.private.get_mut(&partition) {
                        records.remove(&key);
                    }
                }
            }
        }
        state.writes_applied += write_count;
        state.commits += 1;
        debug!(tx_id = %sim.tx_id, writes = write_count, "Transaction committed");
    }

    /// Run one invocation; commit its writes only if it succeeds.
    pub fn execute<T, E>(
        &self,
        ctx: &CallContext,
        invocation: impl FnOnce(&mut TxSimulation<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut sim = self.begin(ctx);
        let output = invocation(&mut sim)?;
        self.commit(sim);
        Ok(output)
    }

    /// Run a read-only invocation. Nothing is committed.
    pub fn query<T>(&self, ctx: &CallContext, invocation: impl FnOnce(&TxSimulation<'_>) -> T) -> T {
        let sim = self.begin(ctx);
        invocation(&sim)
    }

    // === Inspection ===

    pub fn public_state(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().public.get(key).cloned()
    }

    pub fn private_data(&self, partition: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .read()
            .private
            .get(partition)
            .and_then(|records| records.get(key).cloned())
    }

    /// Keys currently stored in a partition.
    pub fn private_keys(&self, partition: &str) -> Vec<String> {
        self.state
            .read()
            .private
            .get(partition)
            .map(|records| records.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn endorsement(&self, key: &str) -> Option<BTreeSet<OrgId>> {
        self.state.read().endorsement.get(key).cloned()
    }

    /// Total writes applied across all commits.
    pub fn write_count(&self) -> u64 {
        self.state.read().writes_applied
    }

    pub fn commit_count(&self) -> u64 {
        self.state.read().commits
    }
}

/// Buffered view of one invocation.
pub struct TxSimulation<'a> {
    ledger: &'a InMemoryLedger,
    tx_id: TxId,
    timestamp: DateTime<Utc>,
    writes: Vec<Write>,
}

impl TxSimulation<'_> {
    /// Number of writes buffered so far.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }
}

impl LedgerStub for TxSimulation<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.ledger.state.read().public.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey("empty public key".to_string()));
        }
        self.writes.push(Write::PutState {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn get_history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, LedgerError> {
        Ok(self
            .ledger
            .state
            .read()
            .history
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    fn set_state_endorsement(&mut self, key: &str, orgs: BTreeSet<OrgId>) -> Result<(), LedgerError> {
        self.writes.push(Write::SetEndorsement {
            key: key.to_string(),
            orgs,
        });
        Ok(())
    }

    fn get_private_data(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.ledger.private_data(partition, key))
    }

    fn get_private_data_hash(&self, partition: &str, key: &str) -> Result<Option<Digest>, LedgerError> {
        Ok(self
            .ledger
            .state
            .read()
            .private
            .get(partition)
            .and_then(|records| records.get(key))
            .map(|value| digest(value)))
    }

    fn put_private_data(&mut self, partition: &str, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey("empty private key".to_string()));
        }
        self.writes.push(Write::PutPrivate {
            partition: partition.to_string(),
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn del_private_data(&mut self, partition: &str, key: &str) -> Result<(), LedgerError> {
        self.writes.push(Write::DelPrivate {
            partition: partition.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    fn get_private_data_by_prefix(
        &self,
        partition: &str,
        prefix: &str,
    ) -> Result<Vec<PrivateRecord>, LedgerError> {
        let state = self.ledger.state.read();
        let Some(records) = state.private.get(partition) else {
            return Ok(Vec::new());
        };
        Ok(records
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| PrivateRecord {
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
