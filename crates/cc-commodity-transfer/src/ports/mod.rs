//! # Ports
//!
//! - `inbound`: the contract API invoked by the host dispatcher
//! - `outbound`: the ledger host the contract depends on

pub mod inbound;
pub mod outbound;

pub use inbound::CommodityTransferApi;
pub use outbound::LedgerStub;
