//! # Commodity Transfer Contract
//!
//! Composes the registry, private store, agreement protocol, transfer engine
//! and query facade behind [`CommodityTransferApi`].

pub mod agreement;
pub mod private_store;
pub mod queries;
pub mod registry;
pub mod transfer;

use crate::config::ContractConfig;
use crate::domain::entities::{
    Agreement, AgreementRole, Commodity, HistoryRecord, ReceiptKind, ReceiptRecord,
};
use crate::domain::identity::caller_partition;
use crate::domain::protocol::ProtocolState;
use crate::errors::ContractError;
use crate::ports::inbound::CommodityTransferApi;
use crate::ports::outbound::LedgerStub;
use private_store::transient_payload;
use shared_types::CallContext;
use tracing::{info, instrument};

/// The contract. Stateless apart from its configuration; all state lives in
/// the ledger reached through the stub.
#[derive(Debug, Clone, Default)]
pub struct CommodityContract {
    config: ContractConfig,
}

impl CommodityContract {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }
}

impl CommodityTransferApi for CommodityContract {
    fn create_commodity(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        target: &str,
        public_description: &str,
    ) -> Result<String, ContractError> {
        registry::create(&self.config, ctx, stub, target, public_description)
    }

    fn read_commodity(
        &self,
        _ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<Commodity, ContractError> {
        registry::read(stub, commodity_id)
    }

    fn change_public_description(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
        new_description: &str,
    ) -> Result<(), ContractError> {
        registry::update_description(ctx, stub, commodity_id, new_description)
    }

    fn resolve_commodity_id(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
    ) -> Result<String, ContractError> {
        registry::resolve_id(&self.config, ctx, stub)
    }

    #[instrument(skip(self, ctx, stub), fields(tx_id = %ctx.tx_id()))]
    fn put_private_attributes(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<(), ContractError> {
        let (caller_org, _) = caller_partition(ctx)?;
        let attributes = transient_payload(ctx, &self.config.properties_key)?;
        private_store::put_attributes(stub, &caller_org, commodity_id, attributes)?;
        info!(commodity_id, org = %caller_org, "Private attributes stored");
        Ok(())
    }

    fn get_private_attributes(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<Vec<u8>, ContractError> {
        let (caller_org, _) = caller_partition(ctx)?;
        private_store::get_attributes(stub, &caller_org, commodity_id)
    }

    fn get_commitment(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
        role: AgreementRole,
    ) -> Result<Vec<u8>, ContractError> {
        let (caller_org, _) = caller_partition(ctx)?;
        private_store::get_commitment(stub, &caller_org, commodity_id, role)
    }

    fn agree_to_put(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<(), ContractError> {
        agreement::agree_to_put(&self.config, ctx, stub, commodity_id)
    }

    fn agree_to_get(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<(), ContractError> {
        agreement::agree_to_get(&self.config, ctx, stub, commodity_id)
    }

    fn verify_attributes(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<bool, ContractError> {
        agreement::verify_attributes(&self.config, ctx, stub, commodity_id)
    }

    fn protocol_state(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
        counterparty: &str,
    ) -> Result<ProtocolState, ContractError> {
        agreement::protocol_state(ctx, stub, commodity_id, counterparty)
    }

    fn transfer(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        commodity_id: &str,
        recipient_org: &str,
    ) -> Result<(), ContractError> {
        transfer::transfer(&self.config, ctx, stub, commodity_id, recipient_org)
    }

    fn history(
        &self,
        _ctx: &CallContext,
        stub: &dyn LedgerStub,
        commodity_id: &str,
    ) -> Result<Vec<HistoryRecord>, ContractError> {
        queries::history(stub, commodity_id)
    }

    fn pending_agreements(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        role: AgreementRole,
    ) -> Result<Vec<Agreement>, ContractError> {
        queries::pending_agreements(ctx, stub, role)
    }

    fn receipts(
        &self,
        ctx: &CallContext,
        stub: &dyn LedgerStub,
        kind: ReceiptKind,
    ) -> Result<Vec<ReceiptRecord>, ContractError> {
        queries::receipts(ctx, stub, kind)
    }
}
