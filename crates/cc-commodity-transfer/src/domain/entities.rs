//! # Domain Entities
//!
//! Records persisted by the contract, in public state or in an organization's
//! private partition.
//!
//! ## Encoding
//!
//! All records are JSON. Field names follow the wire format client
//! applications already use (`commodityID`, `ownerCompany`, `transferKey`).
//! Commitment blobs are the exception: they are stored as the raw bytes the
//! caller supplied so their digests stay comparable across organizations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{OrgId, TxId};
use std::fmt;

/// `objectType` of every public commodity record.
pub const COMMODITY_OBJECT_TYPE: &str = "Commodity";

// =============================================================================
// COMMODITY
// =============================================================================

/// Public record of a commodity, one per asset.
///
/// `id` is the hex SHA-256 of the private attribute blob at creation time and
/// never changes. `owner_org` changes only through a committed transfer, which
/// also moves the previous owner into `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commodity {
    #[serde(rename = "objectType")]
    pub object_type: String,
    #[serde(rename = "commodityID")]
    pub id: String,
    #[serde(rename = "ownerCompany")]
    pub owner_org: OrgId,
    pub source: OrgId,
    #[serde(default)]
    pub target: OrgId,
    #[serde(rename = "publicDescription")]
    pub public_description: String,
    /// Reserved. Detailed attributes live only in private partitions.
    #[serde(rename = "detailedInformation", default)]
    pub detailed_information: String,
}

impl Commodity {
    /// A freshly created commodity owned (and sourced) by `owner_org`.
    pub fn new(
        id: impl Into<String>,
        owner_org: impl Into<OrgId>,
        target: impl Into<OrgId>,
        public_description: impl Into<String>,
    ) -> Self {
        let owner_org = owner_org.into();
        Self {
            object_type: COMMODITY_OBJECT_TYPE.to_string(),
            id: id.into(),
            source: owner_org.clone(),
            owner_org,
            target: target.into(),
            public_description: public_description.into(),
            detailed_information: String::new(),
        }
    }

    /// Hand the commodity to `new_owner`, remembering the current owner.
    pub fn hand_over(&mut self, new_owner: impl Into<OrgId>) {
        self.source = std::mem::replace(&mut self.owner_org, new_owner.into());
    }
}

// =============================================================================
// AGREEMENT (transfer commitment)
// =============================================================================

/// Structured form of a transfer commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    #[serde(rename = "commodity")]
    pub commodity_id: String,
    #[serde(rename = "transferKey")]
    pub transfer_key: i64,
    #[serde(rename = "transfer_id")]
    pub transfer_id: String,
}

impl Agreement {
    pub fn new(commodity_id: impl Into<String>, transfer_key: i64, transfer_id: impl Into<String>) -> Self {
        Self {
            commodity_id: commodity_id.into(),
            transfer_key,
            transfer_id: transfer_id.into(),
        }
    }

    /// Canonical JSON bytes, as a client would submit them.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Which side of a transfer a commitment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgreementRole {
    /// Current owner's commitment to hand the commodity over.
    ForTransfer,
    /// Prospective recipient's commitment to acquire it.
    ForAcquire,
}

impl AgreementRole {
    /// Composite key object type.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ForTransfer => "T",
            Self::ForAcquire => "K",
        }
    }
}

impl fmt::Display for AgreementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForTransfer => write!(f, "owner-side"),
            Self::ForAcquire => write!(f, "recipient-side"),
        }
    }
}

// =============================================================================
// RECEIPT
// =============================================================================

/// Immutable proof that a transfer was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "transferKey")]
    pub transfer_key: i64,
    pub timestamp: DateTime<Utc>,
}

/// Which party a receipt was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptKind {
    /// Issued to the recipient, keyed `(commodity id, tx id)`.
    Getter,
    /// Issued to the former owner, keyed `(tx id, commodity id)`.
    Putter,
}

impl ReceiptKind {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Getter => "GR",
            Self::Putter => "PR",
        }
    }
}

/// A receipt together with the identifiers from its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    #[serde(rename = "commodityID")]
    pub commodity_id: String,
    #[serde(rename = "txId")]
    pub tx_id: TxId,
    pub receipt: Receipt,
}

// =============================================================================
// HISTORY
// =============================================================================

/// One committed version of a commodity's public record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Record")]
    pub record: Commodity,
    #[serde(rename = "txId")]
    pub tx_id: TxId,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_wire_names() {
        let commodity = Commodity::new("abc", "Org1MSP", "Org3MSP", "ten tons of copper");
        let json = serde_json::to_value(&commodity).unwrap();
        assert_eq!(json["objectType"], "Commodity");
        assert_eq!(json["commodityID"], "abc");
        assert_eq!(json["ownerCompany"], "Org1MSP");
        assert_eq!(json["source"], "Org1MSP");
        assert_eq!(json["detailedInformation"], "");
    }

    #[test]
    fn test_hand_over_moves_owner_to_source() {
        let mut commodity = Commodity::new("abc", "Org1MSP", "", "");
        commodity.hand_over("Org2MSP");
        assert_eq!(commodity.owner_org, "Org2MSP");
        assert_eq!(commodity.source, "Org1MSP");
    }

    #[test]
    fn test_agreement_parses_client_json() {
        let raw = br#"{"commodity":"abc","transferKey":42,"transfer_id":"t-1"}"#;
        let agreement: Agreement = serde_json::from_slice(raw).unwrap();
        assert_eq!(agreement, Agreement::new("abc", 42, "t-1"));
    }

    #[test]
    fn test_role_tags_are_distinct() {
        assert_ne!(AgreementRole::ForTransfer.tag(), AgreementRole::ForAcquire.tag());
        assert_ne!(ReceiptKind::Getter.tag(), ReceiptKind::Putter.tag());
    }
}
