//! # Transfer Engine
//!
//! Three checks, then one multi-record mutation:
//!
//! | Check | Proves | Failure |
//! |-------|--------|---------|
//! | CHECK1 | caller owns the commodity | `NotOwner` |
//! | CHECK2 | owner and recipient hold identical attribute content | `NotFound` / `Consistency` |
//! | CHECK3 | both parties committed to the disclosed term | `NotFound` / `AgreementMismatch` |
//!
//! No write is issued until all three pass. The writes are buffered by the
//! host and committed together; this engine has no compensation logic.

use crate::config::ContractConfig;
use crate::contract::agreement::commitment_payload;
use crate::contract::{private_store, registry};
use crate::domain::digest::{commitment_hash, to_hex};
use crate::domain::entities::{AgreementRole, Commodity, Receipt, ReceiptKind};
use crate::domain::identity::resolve_caller_org;
use crate::errors::ContractError;
use crate::ports::outbound::LedgerStub;
use shared_types::{CallContext, Digest};
use tracing::{info, instrument, warn};

#[instrument(skip(config, ctx, stub), fields(tx_id = %ctx.tx_id()))]
pub fn transfer(
    config: &ContractConfig,
    ctx: &CallContext,
    stub: &mut dyn LedgerStub,
    commodity_id: &str,
    recipient_org: &str,
) -> Result<(), ContractError> {
    let caller_org = resolve_caller_org(ctx)?;
    let (commitment, agreement) = commitment_payload(config, ctx)?;

    if recipient_org.is_empty() {
        return Err(ContractError::Input("recipient org is empty".to_string()));
    }

    let commodity = registry::read(stub, commodity_id)?;
    verify_transfer_conditions(stub, &commodity, &caller_org, recipient_org, commitment)?;

    let receipt = Receipt {
        transfer_key: agreement.transfer_key,
        timestamp: ctx.timestamp(),
    };
    apply_transfer(stub, ctx.tx_id(), commodity, recipient_org, &receipt)?;

    info!(
        commodity_id,
        source_org = %caller_org,
        recipient_org,
        "Commodity transferred"
    );
    Ok(())
}

/// CHECK1..CHECK3. Reads only.
fn verify_transfer_conditions(
    stub: &dyn LedgerStub,
    commodity: &Commodity,
    caller_org: &str,
    recipient_org: &str,
    commitment: &[u8],
) -> Result<(), ContractError> {
    let commodity_id = commodity.id.as_str();

    // CHECK1: caller owns the commodity
    registry::require_owner(commodity, caller_org, "transfer")?;
    if recipient_org == caller_org {
        return Err(ContractError::Input(format!(
            "{caller_org} cannot transfer commodity {commodity_id} to itself"
        )));
    }

    // CHECK2: both parties hold the same attribute content
    let owner_digest = require_digest(
        private_store::attributes_digest(stub, caller_org, commodity_id)?,
        "commodity private properties hash of owner",
        commodity_id,
    )?;
    let recipient_digest = require_digest(
        private_store::attributes_digest(stub, recipient_org, commodity_id)?,
        "commodity private properties hash of recipient",
        commodity_id,
    )?;
    if owner_digest != recipient_digest {
        warn!(commodity_id, caller_org, recipient_org, "Attribute digests disagree");
        return Err(ContractError::Consistency {
            commodity_id: commodity_id.to_string(),
            owner_org: caller_org.to_string(),
            owner_digest: to_hex(&owner_digest),
            recipient_org: recipient_org.to_string(),
            recipient_digest: to_hex(&recipient_digest),
        });
    }

    // CHECK3: the disclosed term is what both parties committed to
    let owner_commitment = require_digest(
        private_store::commitment_digest(stub, caller_org, commodity_id, AgreementRole::ForTransfer)?,
        "owner-side transfer commitment",
        commodity_id,
    )?;
    let recipient_commitment = require_digest(
        private_store::commitment_digest(stub, recipient_org, commodity_id, AgreementRole::ForAcquire)?,
        "recipient-side transfer commitment",
        commodity_id,
    )?;

    let disclosed = commitment_hash(commitment);
    for (role, org, stored) in [
        (AgreementRole::ForTransfer, caller_org, owner_commitment),
        (AgreementRole::ForAcquire, recipient_org, recipient_commitment),
    ] {
        if disclosed != stored {
            warn!(commodity_id, org, %role, "Disclosed commitment does not match");
            return Err(ContractError::AgreementMismatch {
                commodity_id: commodity_id.to_string(),
                role,
                org: org.to_string(),
                disclosed: to_hex(&disclosed),
                stored: to_hex(&stored),
            });
        }
    }

    Ok(())
}

fn require_digest(
    digest: Option<Digest>,
    what: &'static str,
    commodity_id: &str,
) -> Result<Digest, ContractError> {
    digest.ok_or_else(|| ContractError::not_found(what, commodity_id))
}

/// Ownership change, endorsement reset, stale record cleanup, receipts.
fn apply_transfer(
    stub: &mut dyn LedgerStub,
    tx_id: &str,
    mut commodity: Commodity,
    recipient_org: &str,
    receipt: &Receipt,
) -> Result<(), ContractError> {
    let former_owner = commodity.owner_org.clone();
    let commodity_id = commodity.id.clone();

    commodity.hand_over(recipient_org);
    registry::write(stub, &commodity)?;
    registry::set_owner_endorsement(stub, &commodity_id, recipient_org)?;

    private_store::delete_attributes(stub, &former_owner, &commodity_id)?;
    private_store::delete_commitment(stub, &former_owner, &commodity_id, AgreementRole::ForTransfer)?;
    private_store::delete_commitment(stub, recipient_org, &commodity_id, AgreementRole::ForAcquire)?;

    private_store::put_receipt(stub, recipient_org, ReceiptKind::Getter, &commodity_id, tx_id, receipt)?;
    private_store::put_receipt(stub, &former_owner, ReceiptKind::Putter, &commodity_id, tx_id, receipt)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::contract::agreement::{agree_to_get, agree_to_put};
    use crate::domain::digest::commodity_id_of;
    use crate::domain::entities::Agreement;
    use crate::errors::ErrorKind;

    const OWNER: &str = "Org1MSP";
    const RECIPIENT: &str = "Org2MSP";
    const OUTSIDER: &str = "Org3MSP";
    const BLOB: &[u8] = b"lot 17, grade A";

    /// Owner agreed on term key 100; recipient agreed with the given blob and key.
    fn prepare(ledger: &InMemoryLedger, recipient_blob: &[u8], recipient_key: i64) -> (String, Agreement) {
        let config = ContractConfig::default();
        let id = commodity_id_of(BLOB);
        let owner_term = Agreement::new(&id, 100, "t-1");
        let recipient_term = Agreement::new(&id, recipient_key, "t-1");

        let ctx = CallContext::for_org(OWNER).with_transient(&config.properties_key, BLOB.to_vec());
        ledger
            .execute(&ctx, |stub| registry::create(&config, &ctx, stub, "", "lot"))
            .unwrap();

        let ctx = CallContext::for_org(OWNER)
            .with_transient(&config.transfer_key_key, owner_term.to_bytes().unwrap());
        ledger
            .execute(&ctx, |stub| agree_to_put(&config, &ctx, stub, &id))
            .unwrap();

        let ctx = CallContext::for_org(RECIPIENT)
            .with_transient(&config.properties_key, recipient_blob.to_vec())
            .with_transient(&config.transfer_key_key, recipient_term.to_bytes().unwrap());
        ledger
            .execute(&ctx, |stub| agree_to_get(&config, &ctx, stub, &id))
            .unwrap();

        (id, owner_term)
    }

    /// Runs the engine on an uncommitted simulation and returns its outcome
    /// together with the number of writes it issued.
    fn run(
        ledger: &InMemoryLedger,
        caller: &str,
        id: &str,
        recipient: &str,
        term: &Agreement,
    ) -> (Result<(), ContractError>, usize) {
        let config = ContractConfig::default();
        let ctx = CallContext::for_org(caller)
            .with_transient(&config.transfer_key_key, term.to_bytes().unwrap());
        let mut sim = ledger.begin(&ctx);
        let result = transfer(&config, &ctx, &mut sim, id, recipient);
        (result, sim.pending_writes())
    }

    #[test]
    fn test_non_owner_rejected_before_any_write() {
        let ledger = InMemoryLedger::new();
        let (id, term) = prepare(&ledger, BLOB, 100);

        let (result, writes) = run(&ledger, RECIPIENT, &id, OUTSIDER, &term);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Authorization);
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_non_owner_self_transfer_is_authorization_error() {
        let ledger = InMemoryLedger::new();
        let (id, term) = prepare(&ledger, BLOB, 100);

        let (result, writes) = run(&ledger, RECIPIENT, &id, RECIPIENT, &term);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Authorization);
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_owner_self_transfer_is_input_error() {
        let ledger = InMemoryLedger::new();
        let (id, term) = prepare(&ledger, BLOB, 100);

        let (result, writes) = run(&ledger, OWNER, &id, OWNER, &term);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Input);
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_attribute_mismatch_rejected_before_any_write() {
        let ledger = InMemoryLedger::new();
        let (id, term) = prepare(&ledger, b"lot 17, grade B", 100);

        let (result, writes) = run(&ledger, OWNER, &id, RECIPIENT, &term);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Consistency);
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_term_mismatch_rejected_before_any_write() {
        let ledger = InMemoryLedger::new();
        let (id, term) = prepare(&ledger, BLOB, 99);

        let (result, writes) = run(&ledger, OWNER, &id, RECIPIENT, &term);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::AgreementMismatch);
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_accepted_transfer_issues_full_write_set() {
        let ledger = InMemoryLedger::new();
        let (id, term) = prepare(&ledger, BLOB, 100);

        // record, endorsement, three deletions, two receipts
        let (result, writes) = run(&ledger, OWNER, &id, RECIPIENT, &term);
        assert!(result.is_ok());
        assert_eq!(writes, 7);
    }
}
