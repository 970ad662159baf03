//! # Commodity Registry
//!
//! Public commodity records. The record's id is the content address of the
//! creator's private attribute blob; re-creating identical content therefore
//! overwrites the same record, which is accepted.

use crate::config::ContractConfig;
use crate::contract::private_store::{self, transient_payload};
use crate::domain::digest::commodity_id_of;
use crate::domain::entities::Commodity;
use crate::domain::identity::{require_same_partition_org, resolve_caller_org};
use crate::errors::ContractError;
use crate::ports::outbound::LedgerStub;
use shared_types::CallContext;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(config, ctx, stub, public_description), fields(tx_id = %ctx.tx_id()))]
pub fn create(
    config: &ContractConfig,
    ctx: &CallContext,
    stub: &mut dyn LedgerStub,
    target: &str,
    public_description: &str,
) -> Result<String, ContractError> {
    let attributes = transient_payload(ctx, &config.properties_key)?;
    let commodity_id = commodity_id_of(attributes);

    let caller_org = resolve_caller_org(ctx)?;
    require_same_partition_org(ctx, &caller_org)?;

    let commodity = Commodity::new(&commodity_id, &caller_org, target, public_description);
    write(stub, &commodity)?;

    // Only the owner's peers may endorse future updates.
    set_owner_endorsement(stub, &commodity_id, &caller_org)?;

    private_store::put_attributes(stub, &caller_org, &commodity_id, attributes)?;

    info!(commodity_id = %commodity_id, owner_org = %caller_org, "Commodity created");
    Ok(commodity_id)
}

#[instrument(level = "debug", skip(stub))]
pub fn read(stub: &dyn LedgerStub, commodity_id: &str) -> Result<Commodity, ContractError> {
    let bytes = stub
        .get_state(commodity_id)?
        .ok_or_else(|| ContractError::not_found("commodity", commodity_id))?;
    let commodity: Commodity = serde_json::from_slice(&bytes)?;
    debug!(owner_org = %commodity.owner_org, "Commodity read");
    Ok(commodity)
}

#[instrument(skip(ctx, stub, new_description), fields(tx_id = %ctx.tx_id()))]
pub fn update_description(
    ctx: &CallContext,
    stub: &mut dyn LedgerStub,
    commodity_id: &str,
    new_description: &str,
) -> Result<(), ContractError> {
    let caller_org = resolve_caller_org(ctx)?;
    let mut commodity = read(stub, commodity_id)?;
    require_owner(&commodity, &caller_org, "update the description of")?;

    commodity.public_description = new_description.to_string();
    write(stub, &commodity)?;
    info!(commodity_id, "Public description updated");
    Ok(())
}

/// Id of the on-ledger commodity whose content is the transient attribute blob.
#[instrument(level = "debug", skip(config, ctx, stub))]
pub fn resolve_id(
    config: &ContractConfig,
    ctx: &CallContext,
    stub: &dyn LedgerStub,
) -> Result<String, ContractError> {
    let attributes = transient_payload(ctx, &config.properties_key)?;
    let commodity_id = commodity_id_of(attributes);
    let commodity = read(stub, &commodity_id)?;
    Ok(commodity.id)
}

/// Fails unless `caller_org` currently owns `commodity`.
pub(crate) fn require_owner(
    commodity: &Commodity,
    caller_org: &str,
    action: &'static str,
) -> Result<(), ContractError> {
    if commodity.owner_org != caller_org {
        warn!(
            commodity_id = %commodity.id,
            caller_org,
            owner_org = %commodity.owner_org,
            action,
            "Rejected non-owner"
        );
        return Err(ContractError::NotOwner {
            caller_org: caller_org.to_string(),
            owner_org: commodity.owner_org.clone(),
            commodity_id: commodity.id.clone(),
            action,
        });
    }
    Ok(())
}

pub(crate) fn write(stub: &mut dyn LedgerStub, commodity: &Commodity) -> Result<(), ContractError> {
    stub.put_state(&commodity.id, serde_json::to_vec(commodity)?)?;
    Ok(())
}

pub(crate) fn set_owner_endorsement(
    stub: &mut dyn LedgerStub,
    commodity_id: &str,
    owner_org: &str,
) -> Result<(), ContractError> {
    stub.set_state_endorsement(commodity_id, BTreeSet::from([owner_org.to_string()]))?;
    Ok(())
}
