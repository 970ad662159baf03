//! # Identity & Authorization Helper
//!
//! Resolves the calling organization and guards private partitions: a peer
//! of org X only serves reads and writes of X's own partition, so a client of
//! org Y must not be able to write into X's partition through X's peer.

use crate::errors::ContractError;
use shared_types::{CallContext, LedgerError, OrgId};
use tracing::warn;

/// Prefix of every implicit per-organization partition.
pub const PARTITION_PREFIX: &str = "implicit_org_";

/// Deterministic partition name for an organization.
#[must_use]
pub fn partition_name(org_id: &str) -> String {
    format!("{PARTITION_PREFIX}{org_id}")
}

/// Organization of the invoking identity.
pub fn resolve_caller_org(ctx: &CallContext) -> Result<OrgId, ContractError> {
    match ctx.caller_org() {
        Some(org) if !org.is_empty() => Ok(org.to_string()),
        _ => Err(ContractError::Identity(LedgerError::MissingIdentity)),
    }
}

/// Fails unless `org_id` owns the partition served by the executing peer.
pub fn require_same_partition_org(ctx: &CallContext, org_id: &str) -> Result<(), ContractError> {
    if org_id != ctx.host_org() {
        warn!(
            caller_org = org_id,
            host_org = ctx.host_org(),
            "Rejected private data access from foreign org"
        );
        return Err(ContractError::PartitionNotOwned {
            caller_org: org_id.to_string(),
            host_org: ctx.host_org().to_string(),
        });
    }
    Ok(())
}

/// Resolve the caller, check it owns the local partition, and return both.
pub fn caller_partition(ctx: &CallContext) -> Result<(OrgId, String), ContractError> {
    let org = resolve_caller_org(ctx)?;
    require_same_partition_org(ctx, &org)?;
    let partition = partition_name(&org);
    Ok((org, partition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use chrono::Utc;

    #[test]
    fn test_partition_name() {
        assert_eq!(partition_name("Org1MSP"), "implicit_org_Org1MSP");
    }

    #[test]
    fn test_missing_identity() {
        let ctx = CallContext::new(None, "Org1MSP", "tx", Utc::now());
        assert_eq!(resolve_caller_org(&ctx).unwrap_err().kind(), ErrorKind::Identity);

        let ctx = CallContext::new(Some(String::new()), "Org1MSP", "tx", Utc::now());
        assert_eq!(resolve_caller_org(&ctx).unwrap_err().kind(), ErrorKind::Identity);
    }

    #[test]
    fn test_foreign_partition_rejected() {
        let ctx = CallContext::for_org("Org2MSP").on_host("Org1MSP");
        let err = caller_partition(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn test_own_partition_accepted() {
        let ctx = CallContext::for_org("Org1MSP");
        let (org, partition) = caller_partition(&ctx).unwrap();
        assert_eq!(org, "Org1MSP");
        assert_eq!(partition, "implicit_org_Org1MSP");
    }
}
