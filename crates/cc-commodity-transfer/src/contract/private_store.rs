//! # Private Commitment Store
//!
//! Attribute blobs, commitments and receipts inside an organization's
//! private partition. Callers are responsible for partition authorization;
//! these helpers only address records.

use crate::domain::entities::{AgreementRole, Receipt, ReceiptKind};
use crate::domain::identity::partition_name;
use crate::domain::keys::{commitment_key, receipt_key};
use crate::errors::ContractError;
use crate::ports::outbound::LedgerStub;
use shared_types::{CallContext, Digest};

/// Transient payload entry `name`, also accepting a capitalised first letter.
pub(crate) fn transient_payload<'c>(
    ctx: &'c CallContext,
    name: &str,
) -> Result<&'c [u8], ContractError> {
    let transient = ctx.transient();
    transient
        .get(name)
        .or_else(|| transient.get(&capitalize(name)))
        .map(Vec::as_slice)
        .ok_or_else(|| ContractError::Input(format!("{name} key not found in the transient map")))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// === Attributes ===

pub fn put_attributes(
    stub: &mut dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
    blob: &[u8],
) -> Result<(), ContractError> {
    stub.put_private_data(&partition_name(org_id), commodity_id, blob.to_vec())?;
    Ok(())
}

pub fn get_attributes(
    stub: &dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
) -> Result<Vec<u8>, ContractError> {
    stub.get_private_data(&partition_name(org_id), commodity_id)?
        .ok_or_else(|| ContractError::not_found("commodity private details", commodity_id))
}

pub fn delete_attributes(
    stub: &mut dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
) -> Result<(), ContractError> {
    stub.del_private_data(&partition_name(org_id), commodity_id)?;
    Ok(())
}

// === Commitments ===

/// Store a commitment exactly as supplied, so its digest is reproducible.
pub fn put_commitment(
    stub: &mut dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
    role: AgreementRole,
    blob: &[u8],
) -> Result<(), ContractError> {
    let key = commitment_key(role, commodity_id)?;
    stub.put_private_data(&partition_name(org_id), &key, blob.to_vec())?;
    Ok(())
}

pub fn get_commitment(
    stub: &dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
    role: AgreementRole,
) -> Result<Vec<u8>, ContractError> {
    let key = commitment_key(role, commodity_id)?;
    stub.get_private_data(&partition_name(org_id), &key)?
        .ok_or_else(|| ContractError::not_found("commodity key", commodity_id))
}

pub fn delete_commitment(
    stub: &mut dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
    role: AgreementRole,
) -> Result<(), ContractError> {
    let key = commitment_key(role, commodity_id)?;
    stub.del_private_data(&partition_name(org_id), &key)?;
    Ok(())
}

/// On-ledger digest of a commitment, without reading its content.
pub fn commitment_digest(
    stub: &dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
    role: AgreementRole,
) -> Result<Option<Digest>, ContractError> {
    let key = commitment_key(role, commodity_id)?;
    digest_of(stub, &partition_name(org_id), &key)
}

// === Digests ===

/// Ledger-provided digest of any private record.
pub fn digest_of(
    stub: &dyn LedgerStub,
    partition: &str,
    key: &str,
) -> Result<Option<Digest>, ContractError> {
    Ok(stub.get_private_data_hash(partition, key)?)
}

pub fn attributes_digest(
    stub: &dyn LedgerStub,
    org_id: &str,
    commodity_id: &str,
) -> Result<Option<Digest>, ContractError> {
    digest_of(stub, &partition_name(org_id), commodity_id)
}

// === Receipts ===

pub fn put_receipt(
    stub: &mut dyn LedgerStub,
    org_id: &str,
    kind: ReceiptKind,
    commodity_id: &str,
    tx_id: &str,
    receipt: &Receipt,
) -> Result<(), ContractError> {
    let key = receipt_key(kind, commodity_id, tx_id)?;
    stub.put_private_data(&partition_name(org_id), &key, serde_json::to_vec(receipt)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_transient_lookup_accepts_capitalised_key() {
        let ctx = CallContext::for_org("Org1MSP").with_transient("Commodity_properties", b"x".to_vec());
        assert_eq!(transient_payload(&ctx, "commodity_properties").unwrap(), b"x");
    }

    #[test]
    fn test_transient_exact_key_wins() {
        let ctx = CallContext::for_org("Org1MSP")
            .with_transient("commodity_properties", b"exact".to_vec())
            .with_transient("Commodity_properties", b"capital".to_vec());
        assert_eq!(transient_payload(&ctx, "commodity_properties").unwrap(), b"exact");
    }

    #[test]
    fn test_missing_transient_is_input_error() {
        let ctx = CallContext::for_org("Org1MSP");
        let err = transient_payload(&ctx, "commodity_transferKey").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
