//! # Driving Ports (API - Inbound)
//!
//! Entry points of the commodity transfer contract. Every operation receives
//! the invocation's `CallContext` and the host's `LedgerStub`; private inputs
//! (attribute blobs, commitments) arrive through the context's transient map.

use crate::domain::entities::{
    Agreement, AgreementRole, Commodity, HistoryRecord, ReceiptKind, ReceiptRecord,
};
use crate::domain::protocol::ProtocolState;
use crate::errors::ContractError;
use crate::ports::outbound::LedgerStub;
use shared_types::CallContext;

/// Commodity transfer contract API.
pub trait CommodityTransferApi {
    // === Commodity Registry ===

    /// Create a commodity from the transient attribute blob and return its id.
    fn create_commodity(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        target: &str,
        public_description: &str,
    ) -> Result<String, ContractError>;

    /// Public record of a commodity. No access control.
    fn read_commodity(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<Commodity, ContractError>;

    /// Owner-only update of the public description.
    fn change_public_description(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
        new_description: &str,
    ) -> Result<(), ContractError>;

    /// Id of the on-ledger commodity matching the transient attribute blob.
    fn resolve_commodity_id(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
    ) -> Result<String, ContractError>;

    // === Private Commitment Store ===

    /// Store the transient attribute blob in the caller's own partition.
    fn put_private_attributes(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<(), ContractError>;

    /// The caller's own attribute blob for a commodity.
    fn get_private_attributes(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<Vec<u8>, ContractError>;

    /// The caller's own commitment blob on the given side.
    fn get_commitment(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
        role: AgreementRole,
    ) -> Result<Vec<u8>, ContractError>;

    // === Agreement Protocol ===

    /// Current owner records its transfer commitment.
    fn agree_to_put(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<(), ContractError>;

    /// Prospective recipient records its attribute copy and commitment.
    fn agree_to_get(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<(), ContractError>;

    /// Check the transient attribute blob against the owner's on-ledger
    /// digest and the commodity id.
    fn verify_attributes(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<bool, ContractError>;

    /// Derived protocol progress between the owner and `counterparty`.
    fn protocol_state(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
        counterparty: &str,
    ) -> Result<ProtocolState, ContractError>;

    // === Transfer Engine ===

    /// Validate all preconditions, then hand the commodity to `recipient_org`.
    fn transfer(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
        recipient_org: &str,
    ) -> Result<(), ContractError>;

    // === Ledger Query Facade ===

    /// Every committed version of the public record, oldest first.
    fn history(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<Vec<HistoryRecord>, ContractError>;

    /// The caller's own commitments on the given side.
    fn pending_agreements(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        role: AgreementRole,
    ) -> Result<Vec<Agreement>, ContractError>;

    /// The caller's own receipts of the given kind.
    fn receipts(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        kind: ReceiptKind,
    ) -> Result<Vec<ReceiptRecord>, ContractError>;
}
