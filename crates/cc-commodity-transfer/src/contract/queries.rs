//! # Ledger Query Facade
//!
//! Read-only views. History is public; agreements and receipts come from the
//! caller's own partition only.

use crate::domain::entities::{
    Agreement, AgreementRole, Commodity, HistoryRecord, Receipt, ReceiptKind, ReceiptRecord,
};
use crate::domain::identity::caller_partition;
use crate::domain::keys::{commitment_prefix, parse_receipt_key, receipt_prefix};
use crate::errors::ContractError;
use crate::ports::outbound::LedgerStub;
use shared_types::CallContext;
use tracing::{debug, instrument};

/// Chain of custody of a commodity, oldest version first.
#[instrument(level = "debug", skip(stub))]
pub fn history(stub: &dyn LedgerStub, commodity_id: &str) -> Result<Vec<HistoryRecord>, ContractError> {
    let records = stub
        .get_history_for_key(commodity_id)?
        .into_iter()
        .filter(|modification| !modification.is_delete)
        .map(|modification| -> Result<HistoryRecord, ContractError> {
            let record: Commodity = serde_json::from_slice(&modification.value)?;
            Ok(HistoryRecord {
                record,
                tx_id: modification.tx_id,
                timestamp: modification.timestamp,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(versions = records.len(), "History read");
    Ok(records)
}

#[instrument(level = "debug", skip(ctx, stub))]
pub fn pending_agreements(
    ctx: &CallContext,
    stub: &dyn LedgerStub,
    role: AgreementRole,
) -> Result<Vec<Agreement>, ContractError> {
    let (_, partition) = caller_partition(ctx)?;
    let prefix = commitment_prefix(role)?;

    stub.get_private_data_by_prefix(&partition, &prefix)?
        .into_iter()
        .map(|record| -> Result<Agreement, ContractError> {
            Ok(serde_json::from_slice(&record.value)?)
        })
        .collect()
}

#[instrument(level = "debug", skip(ctx, stub))]
pub fn receipts(
    ctx: &CallContext,
    stub: &dyn LedgerStub,
    kind: ReceiptKind,
) -> Result<Vec<ReceiptRecord>, ContractError> {
    let (_, partition) = caller_partition(ctx)?;
    let prefix = receipt_prefix(kind)?;

    stub.get_private_data_by_prefix(&partition, &prefix)?
        .into_iter()
        .map(|record| -> Result<ReceiptRecord, ContractError> {
            let (commodity_id, tx_id) = parse_receipt_key(kind, &record.key)?;
            let receipt: Receipt = serde_json::from_slice(&record.value)?;
            Ok(ReceiptRecord {
                commodity_id,
                tx_id,
                receipt,
            })
        })
        .collect()
}
