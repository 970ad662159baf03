//! # Agreement State Machine
//!
//! ```text
//! CREATED ──agreeToPut──→ OWNER_AGREED ──agreeToGet──→ BOTH_AGREED ──transfer──→ TRANSFERRED
//!    │                                                      ↑
//!    └──agreeToGet──→ RECIPIENT_AGREED ──agreeToPut─────────┘
//! ```
//!
//! Nothing here is persisted. The state is derived from the public record
//! and from which commitment records exist, which is how the ledger encodes
//! protocol progress.

use crate::domain::entities::Commodity;
use serde::{Deserialize, Serialize};

/// Progress of a transfer between the current owner and one counter-party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolState {
    Created,
    OwnerAgreed,
    /// Acquisition proposed before the owner committed.
    RecipientAgreed,
    BothAgreed,
    Transferred,
}

impl ProtocolState {
    /// Derive the state for `counterparty` from public state and commitment
    /// presence.
    #[must_use]
    pub fn derive(
        commodity: &Commodity,
        counterparty: &str,
        owner_side_present: bool,
        recipient_side_present: bool,
    ) -> Self {
        if commodity.owner_org == counterparty && commodity.source != counterparty {
            return Self::Transferred;
        }
        match (owner_side_present, recipient_side_present) {
            (true, true) => Self::BothAgreed,
            (true, false) => Self::OwnerAgreed,
            (false, true) => Self::RecipientAgreed,
            (false, false) => Self::Created,
        }
    }

    /// Whether a transfer to the counter-party may be attempted.
    #[must_use]
    pub fn is_ready(self) -> bool {
        self == Self::BothAgreed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Commodity {
        Commodity::new("c1", "Org1MSP", "", "")
    }

    #[test]
    fn test_presence_table() {
        let c = fresh();
        assert_eq!(ProtocolState::derive(&c, "Org2MSP", false, false), ProtocolState::Created);
        assert_eq!(ProtocolState::derive(&c, "Org2MSP", true, false), ProtocolState::OwnerAgreed);
        assert_eq!(
            ProtocolState::derive(&c, "Org2MSP", false, true),
            ProtocolState::RecipientAgreed
        );
        assert!(ProtocolState::derive(&c, "Org2MSP", true, true).is_ready());
    }

    #[test]
    fn test_transferred_after_hand_over() {
        let mut c = fresh();
        c.hand_over("Org2MSP");
        assert_eq!(ProtocolState::derive(&c, "Org2MSP", false, false), ProtocolState::Transferred);
    }

    #[test]
    fn test_creator_is_not_transferred() {
        // Right after creation owner == source, so the owner itself is not a recipient.
        let c = fresh();
        assert_eq!(ProtocolState::derive(&c, "Org1MSP", false, false), ProtocolState::Created);
    }
}
