//! # Commodity Transfer Contract
//!
//! Private multi-party transfer of content-addressed commodities on a
//! permissioned ledger.
//!
//! ## Purpose
//!
//! A commodity's id is the hex SHA-256 of its private attribute blob. The
//! blob itself only ever lives in the owning organization's private
//! partition. Ownership moves when the owner and a recipient have each
//! committed to the same transfer term in their own partitions, and the
//! owner then discloses that term; the ledger proves both sides agree by
//! comparing digests, never by revealing the blobs.
//!
//! ## Transfer Preconditions
//!
//! | Check | Condition | Enforcement Location |
//! |-------|-----------|---------------------|
//! | CHECK1 | caller owns the commodity | `contract/transfer.rs` - `verify_transfer_conditions()` |
//! | CHECK2 | owner and recipient attribute digests are equal | `contract/transfer.rs` - `verify_transfer_conditions()` |
//! | CHECK3 | disclosed term matches both stored commitments | `contract/transfer.rs` - `verify_transfer_conditions()` |
//!
//! ## Private Partition Layout
//!
//! | Key | Record |
//! |-----|--------|
//! | `<commodity id>` | attribute blob |
//! | `\0T\0<id>\0` | owner-side commitment |
//! | `\0K\0<id>\0` | recipient-side commitment |
//! | `\0GR\0<id>\0<tx id>\0` | receipt issued to the recipient |
//! | `\0PR\0<tx id>\0<id>\0` | receipt issued to the former owner |
//!
//! ## Usage Example
//!
//! ```ignore
//! use cc_commodity_transfer::prelude::*;
//!
//! let ledger = InMemoryLedger::new();
//! let contract = CommodityContract::default();
//! let ctx = CallContext::for_org("Org1MSP").with_transient("commodity_properties", blob);
//!
//! let id = ledger.execute(&ctx, |stub| contract.create_commodity(&ctx, stub, "", "grain"))?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod contract;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod telemetry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Agreement, AgreementRole, Commodity, HistoryRecord, Receipt, ReceiptKind, ReceiptRecord,
    };
    pub use crate::domain::protocol::ProtocolState;

    // Domain services
    pub use crate::domain::digest::{commitment_hash, commodity_id_of, digest, to_hex};
    pub use crate::domain::identity::partition_name;
    pub use crate::domain::keys::{commitment_key, receipt_key};

    // Ports
    pub use crate::ports::{CommodityTransferApi, LedgerStub};

    // Errors
    pub use crate::errors::{ContractError, ErrorKind, VerificationFailure};

    // Adapters
    pub use crate::adapters::{InMemoryLedger, TxSimulation};

    // Contract
    pub use crate::config::ContractConfig;
    pub use crate::contract::CommodityContract;
    pub use crate::dispatch::ContractDispatcher;

    pub use shared_types::CallContext;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contract name as registered with the host.
pub const CONTRACT_NAME: &str = "commodity-transfer";

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_exports() {
        use prelude::*;
        let _ = ContractConfig::default();
        let _ = InMemoryLedger::new();
        assert_eq!(partition_name("Org1MSP"), "implicit_org_Org1MSP");
    }

    #[test]
    fn test_contract_name() {
        assert_eq!(CONTRACT_NAME, "commodity-transfer");
        assert!(!VERSION.is_empty());
    }
}
