//! # Call Context
//!
//! Everything the host knows about one invocation, passed explicitly into
//! every contract operation.
//!
//! ## Fields
//!
//! - `caller_org`: organization of the invoking identity (absent when the
//!   identity carries no organization attribute)
//! - `host_org`: organization owning the peer that executes the call, and
//!   therefore the only private partition this call may read or write
//! - `tx_id` / `timestamp`: assigned by the host, identical for every write of
//!   the invocation
//! - `transient`: out-of-band private payload

use crate::entities::{OrgId, TransientMap, TxId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Per-invocation context supplied by the ledger host.
#[derive(Debug, Clone)]
pub struct CallContext {
    caller_org: Option<OrgId>,
    host_org: OrgId,
    tx_id: TxId,
    timestamp: DateTime<Utc>,
    transient: TransientMap,
}

impl CallContext {
    /// Create a context with an explicit caller, host, transaction id and time.
    pub fn new(
        caller_org: Option<OrgId>,
        host_org: impl Into<OrgId>,
        tx_id: impl Into<TxId>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            caller_org,
            host_org: host_org.into(),
            tx_id: tx_id.into(),
            timestamp,
            transient: TransientMap::new(),
        }
    }

    /// A call made by `org` on one of its own peers, with a fresh transaction
    /// id and the current time.
    pub fn for_org(org: impl Into<OrgId>) -> Self {
        let org = org.into();
        Self::new(
            Some(org.clone()),
            org,
            Uuid::new_v4().simple().to_string(),
            Utc::now(),
        )
    }

    /// Builder method to attach a transient payload entry.
    pub fn with_transient(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.transient.insert(name.into(), value.into());
        self
    }

    /// Builder method to execute on a different organization's peer.
    pub fn on_host(mut self, host_org: impl Into<OrgId>) -> Self {
        self.host_org = host_org.into();
        self
    }

    pub fn caller_org(&self) -> Option<&str> {
        self.caller_org.as_deref()
    }

    pub fn host_org(&self) -> &str {
        &self.host_org
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn transient(&self) -> &TransientMap {
        &self.transient
    }
}
