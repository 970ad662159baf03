//! Role-scoped private keys.
//!
//! Attribute blobs are stored under the bare commodity id. Commitments and
//! receipts live under composite keys so they can never collide with an
//! attribute record and can be enumerated by tag.

use crate::domain::entities::{AgreementRole, ReceiptKind};
use shared_types::{create_composite_key, split_composite_key, LedgerError};

/// Key of a commitment for `commodity_id` on the given side.
pub fn commitment_key(role: AgreementRole, commodity_id: &str) -> Result<String, LedgerError> {
    create_composite_key(role.tag(), &[commodity_id])
}

/// Prefix matching every commitment on the given side.
pub fn commitment_prefix(role: AgreementRole) -> Result<String, LedgerError> {
    create_composite_key(role.tag(), &[])
}

/// Key of a receipt issued for `commodity_id` in transaction `tx_id`.
pub fn receipt_key(kind: ReceiptKind, commodity_id: &str, tx_id: &str) -> Result<String, LedgerError> {
    match kind {
        ReceiptKind::Getter => create_composite_key(kind.tag(), &[commodity_id, tx_id]),
        ReceiptKind::Putter => create_composite_key(kind.tag(), &[tx_id, commodity_id]),
    }
}

pub fn receipt_prefix(kind: ReceiptKind) -> Result<String, LedgerError> {
    create_composite_key(kind.tag(), &[])
}

/// Recover `(commodity id, tx id)` from a receipt key.
pub fn parse_receipt_key(kind: ReceiptKind, key: &str) -> Result<(String, String), LedgerError> {
    let (object_type, mut attributes) = split_composite_key(key)?;
    if object_type != kind.tag() || attributes.len() != 2 {
        return Err(LedgerError::InvalidKey(format!(
            "{key:?} is not a {} receipt key",
            kind.tag()
        )));
    }
    let second = attributes.pop().unwrap_or_default();
    let first = attributes.pop().unwrap_or_default();
    Ok(match kind {
        ReceiptKind::Getter => (first, second),
        ReceiptKind::Putter => (second, first),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_keys_do_not_collide_with_attributes() {
        let id = "0a1b";
        let owner = commitment_key(AgreementRole::ForTransfer, id).unwrap();
        let recipient = commitment_key(AgreementRole::ForAcquire, id).unwrap();
        assert_ne!(owner, id);
        assert_ne!(owner, recipient);
        assert!(owner.starts_with(&commitment_prefix(AgreementRole::ForTransfer).unwrap()));
        assert!(!recipient.starts_with(&commitment_prefix(AgreementRole::ForTransfer).unwrap()));
    }

    #[test]
    fn test_receipt_key_order_per_kind() {
        let getter = receipt_key(ReceiptKind::Getter, "c1", "tx9").unwrap();
        let putter = receipt_key(ReceiptKind::Putter, "c1", "tx9").unwrap();
        assert_eq!(getter, "\u{0}GR\u{0}c1\u{0}tx9\u{0}");
        assert_eq!(putter, "\u{0}PR\u{0}tx9\u{0}c1\u{0}");

        assert_eq!(
            parse_receipt_key(ReceiptKind::Getter, &getter).unwrap(),
            ("c1".to_string(), "tx9".to_string())
        );
        assert_eq!(
            parse_receipt_key(ReceiptKind::Putter, &putter).unwrap(),
            ("c1".to_string(), "tx9".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_wrong_kind() {
        let getter = receipt_key(ReceiptKind::Getter, "c1", "tx9").unwrap();
        assert!(parse_receipt_key(ReceiptKind::Putter, &getter).is_err());
    }
}
