//! # Error Types
//!
//! All error types for the commodity transfer contract.
//!
//! Error context carries org ids, commodity ids and hex digests. Private
//! blobs are never formatted into an error.

use crate::domain::entities::AgreementRole;
use shared_types::{LedgerError, OrgId};
use std::fmt;
use thiserror::Error;

// =============================================================================
// ERROR KIND
// =============================================================================

/// Stable classification of a [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller organization could not be determined.
    Identity,
    /// Missing or malformed required payload or argument.
    Input,
    /// Referenced record absent.
    NotFound,
    /// Caller org mismatch with partition or ownership.
    Authorization,
    /// Two parties' stored attribute digests disagree.
    Consistency,
    /// Disclosed commitment digest does not match a stored commitment.
    AgreementMismatch,
    /// Attribute digest or identity mismatch during explicit verification.
    Verification,
    /// Host failure.
    Ledger,
    /// Stored record could not be encoded or decoded.
    Serialization,
}

// =============================================================================
// VERIFICATION FAILURE
// =============================================================================

/// Which equality failed during attribute verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationFailure {
    /// The supplied blob differs from what the owner holds.
    DigestMismatch { supplied: String, on_ledger: String },
    /// The owner's blob was never the content the commodity id was derived from.
    IdentityMismatch { on_ledger: String },
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigestMismatch {
                supplied,
                on_ledger,
            } => write!(
                f,
                "digest {supplied} of supplied attributes does not match on-ledger digest {on_ledger}"
            ),
            Self::IdentityMismatch { on_ledger } => write!(
                f,
                "on-ledger digest {on_ledger} matches the supplied attributes but not the commodity id: commodity was altered from its initial form"
            ),
        }
    }
}

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors returned by contract operations.
///
/// Any error aborts the invocation; the host discards every buffered write.
#[derive(Debug, Clone, Error)]
pub enum ContractError {
    /// Caller identity unavailable.
    #[error("failed getting client's org id: {0}")]
    Identity(#[source] LedgerError),

    /// Required payload or argument missing or malformed.
    #[error("invalid input: {0}")]
    Input(String),

    /// Referenced record absent.
    #[error("{what} does not exist: {key}")]
    NotFound { what: &'static str, key: String },

    /// Caller tried to act on a commodity owned by another org.
    #[error("a client from {caller_org} cannot {action} commodity {commodity_id} owned by {owner_org}")]
    NotOwner {
        caller_org: OrgId,
        owner_org: OrgId,
        commodity_id: String,
        action: &'static str,
    },

    /// Caller tried to use a private partition of another org.
    #[error("client from org {caller_org} is not authorized to read or write private data from an org {host_org} peer")]
    PartitionNotOwned { caller_org: OrgId, host_org: OrgId },

    /// Owner and recipient hold different attribute content.
    #[error("on-ledger attribute digest {owner_digest} of {owner_org} does not match on-ledger digest {recipient_digest} of {recipient_org} for {commodity_id}")]
    Consistency {
        commodity_id: String,
        owner_org: OrgId,
        owner_digest: String,
        recipient_org: OrgId,
        recipient_digest: String,
    },

    /// Disclosed commitment was not agreed by one of the parties.
    #[error("digest {disclosed} of disclosed commitment does not match {role} commitment digest {stored} held by {org} for {commodity_id}")]
    AgreementMismatch {
        commodity_id: String,
        role: AgreementRole,
        org: OrgId,
        disclosed: String,
        stored: String,
    },

    /// Explicit attribute verification failed.
    #[error("verification of {commodity_id} failed: {failure}")]
    Verification {
        commodity_id: String,
        failure: VerificationFailure,
    },

    /// Host failure.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ContractError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(_) => ErrorKind::Identity,
            Self::Input(_) => ErrorKind::Input,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotOwner { .. } | Self::PartitionNotOwned { .. } => ErrorKind::Authorization,
            Self::Consistency { .. } => ErrorKind::Consistency,
            Self::AgreementMismatch { .. } => ErrorKind::AgreementMismatch,
            Self::Verification { .. } => ErrorKind::Verification,
            Self::Ledger(_) => ErrorKind::Ledger,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_kinds() {
        let not_owner = ContractError::NotOwner {
            caller_org: "Org2MSP".into(),
            owner_org: "Org1MSP".into(),
            commodity_id: "abc".into(),
            action: "transfer",
        };
        let partition = ContractError::PartitionNotOwned {
            caller_org: "Org2MSP".into(),
            host_org: "Org1MSP".into(),
        };
        assert_eq!(not_owner.kind(), ErrorKind::Authorization);
        assert_eq!(partition.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn test_verification_messages_are_distinct() {
        let digest = VerificationFailure::DigestMismatch {
            supplied: "aa".into(),
            on_ledger: "bb".into(),
        };
        let identity = VerificationFailure::IdentityMismatch {
            on_ledger: "bb".into(),
        };
        assert!(digest.to_string().contains("does not match on-ledger digest"));
        assert!(identity.to_string().contains("not the commodity id"));
    }

    #[test]
    fn test_ledger_error_converts() {
        let err: ContractError = LedgerError::Unavailable("down".into()).into();
        assert_eq!(err.kind(), ErrorKind::Ledger);
    }
}
