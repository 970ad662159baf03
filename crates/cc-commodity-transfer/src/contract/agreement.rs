//! # Agreement Protocol
//!
//! Each party records its transfer commitment in its own partition. The
//! commitment itself never leaves the partition; the ledger's digest of it is
//! what the transfer engine compares later.
//!
//! Commitments are scoped by role and commodity only, not by counter-party,
//! so one organization holds at most one recipient-side commitment per
//! commodity at a time.

use crate::config::ContractConfig;
use crate::contract::private_store::{self, transient_payload};
use crate::contract::registry;
use crate::domain::digest::{digest, to_hex};
use crate::domain::entities::{Agreement, AgreementRole};
use crate::domain::identity::{caller_partition, resolve_caller_org};
use crate::domain::protocol::ProtocolState;
use crate::errors::{ContractError, VerificationFailure};
use crate::ports::outbound::LedgerStub;
use shared_types::CallContext;
use tracing::{info, instrument, warn};

/// Commitment blob from the transient map, checked to be a well-formed
/// agreement. The raw bytes are returned untouched.
pub(crate) fn commitment_payload<'c>(
    config: &ContractConfig,
    ctx: &'c CallContext,
) -> Result<(&'c [u8], Agreement), ContractError> {
    let blob = transient_payload(ctx, &config.transfer_key_key)?;
    let agreement = serde_json::from_slice(blob).map_err(|e| {
        ContractError::Input(format!("{} is not a valid agreement: {e}", config.transfer_key_key))
    })?;
    Ok((blob, agreement))
}

#[instrument(skip(config, ctx, stub), fields(tx_id = %ctx.tx_id()))]
pub fn agree_to_put(
    config: &ContractConfig,
    ctx: &CallContext,
    stub: &mut dyn LedgerStub,
    commodity_id: &str,
) -> Result<(), ContractError> {
    let commodity = registry::read(stub, commodity_id)?;
    let (caller_org, _) = caller_partition(ctx)?;
    registry::require_owner(&commodity, &caller_org, "agree to transfer")?;

    let (commitment, _) = commitment_payload(config, ctx)?;
    private_store::put_commitment(stub, &caller_org, commodity_id, AgreementRole::ForTransfer, commitment)?;

    info!(commodity_id, owner_org = %caller_org, "Owner agreed to transfer");
    Ok(())
}

#[instrument(skip(config, ctx, stub), fields(tx_id = %ctx.tx_id()))]
pub fn agree_to_get(
    config: &ContractConfig,
    ctx: &CallContext,
    stub: &mut dyn LedgerStub,
    commodity_id: &str,
) -> Result<(), ContractError> {
    let (caller_org, _) = caller_partition(ctx)?;

    let attributes = transient_payload(ctx, &config.properties_key)?;
    let (commitment, _) = commitment_payload(config, ctx)?;

    private_store::put_attributes(stub, &caller_org, commodity_id, attributes)?;
    private_store::put_commitment(stub, &caller_org, commodity_id, AgreementRole::ForAcquire, commitment)?;

    info!(commodity_id, recipient_org = %caller_org, "Recipient agreed to acquire");
    Ok(())
}

/// Checks the transient attribute blob first against the owner's on-ledger
/// digest, then the on-ledger digest against the commodity id.
#[instrument(skip(config, ctx, stub), fields(tx_id = %ctx.tx_id()))]
pub fn verify_attributes(
    config: &ContractConfig,
    ctx: &CallContext,
    stub: &dyn LedgerStub,
    commodity_id: &str,
) -> Result<bool, ContractError> {
    let attributes = transient_payload(ctx, &config.properties_key)?;
    let commodity = registry::read(stub, commodity_id)?;

    let on_ledger = private_store::attributes_digest(stub, &commodity.owner_org, commodity_id)?
        .ok_or_else(|| ContractError::not_found("commodity private properties hash", commodity_id))?;

    let supplied = digest(attributes);
    if supplied != on_ledger {
        warn!(commodity_id, "Supplied attributes differ from owner's");
        return Err(ContractError::Verification {
            commodity_id: commodity_id.to_string(),
            failure: VerificationFailure::DigestMismatch {
                supplied: to_hex(&supplied),
                on_ledger: to_hex(&on_ledger),
            },
        });
    }

    if to_hex(&on_ledger) != commodity_id {
        warn!(commodity_id, "Owner's attributes do not hash to the commodity id");
        return Err(ContractError::Verification {
            commodity_id: commodity_id.to_string(),
            failure: VerificationFailure::IdentityMismatch {
                on_ledger: to_hex(&on_ledger),
            },
        });
    }

    Ok(true)
}

#[instrument(level = "debug", skip(ctx, stub))]
pub fn protocol_state(
    ctx: &CallContext,
    stub: &dyn LedgerStub,
    commodity_id: &str,
    counterparty: &str,
) -> Result<ProtocolState, ContractError> {
    resolve_caller_org(ctx)?;
    let commodity = registry::read(stub, commodity_id)?;

    let owner_side = private_store::commitment_digest(
        stub,
        &commodity.owner_org,
        commodity_id,
        AgreementRole::ForTransfer,
    )?;
    let recipient_side =
        private_store::commitment_digest(stub, counterparty, commodity_id, AgreementRole::ForAcquire)?;

    Ok(ProtocolState::derive(
        &commodity,
        counterparty,
        owner_side.is_some(),
        recipient_side.is_some(),
    ))
}
