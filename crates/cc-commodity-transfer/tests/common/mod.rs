//! Shared harness for integration tests.

#![allow(dead_code)]

use cc_commodity_transfer::prelude::*;

pub const ORG_A: &str = "Org1MSP";
pub const ORG_B: &str = "Org2MSP";
pub const ORG_C: &str = "Org3MSP";

pub const PROPERTIES: &str = "commodity_properties";
pub const TRANSFER_KEY: &str = "commodity_transferKey";

pub const BLOB_X: &[u8] = br#"{"grade":"A","weight_kg":1200,"lot":"X-17"}"#;

/// A ledger plus the contract, driving every call as its own transaction.
pub struct Harness {
    pub ledger: InMemoryLedger,
    pub contract: CommodityContract,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            ledger: InMemoryLedger::new(),
            contract: CommodityContract::default(),
        }
    }

    pub fn ctx(org: &str) -> CallContext {
        CallContext::for_org(org)
    }

    pub fn with_blob(org: &str, blob: &[u8]) -> CallContext {
        CallContext::for_org(org).with_transient(PROPERTIES, blob.to_vec())
    }

    pub fn with_term(org: &str, term: &Agreement) -> CallContext {
        CallContext::for_org(org).with_transient(TRANSFER_KEY, term.to_bytes().unwrap())
    }

    pub fn create(&self, org: &str, blob: &[u8]) -> Result<String, ContractError> {
        let ctx = Self::with_blob(org, blob);
        self.ledger
            .execute(&ctx, |stub| self.contract.create_commodity(&ctx, stub, "", "bulk grain"))
    }

    pub fn agree_to_put(&self, org: &str, id: &str, term: &Agreement) -> Result<(), ContractError> {
        let ctx = Self::with_term(org, term);
        self.ledger
            .execute(&ctx, |stub| self.contract.agree_to_put(&ctx, stub, id))
    }

    pub fn agree_to_get(
        &self,
        org: &str,
        id: &str,
        blob: &[u8],
        term: &Agreement,
    ) -> Result<(), ContractError> {
        let ctx = Self::with_blob(org, blob).with_transient(TRANSFER_KEY, term.to_bytes().unwrap());
        self.ledger
            .execute(&ctx, |stub| self.contract.agree_to_get(&ctx, stub, id))
    }

    pub fn verify(&self, org: &str, id: &str, blob: &[u8]) -> Result<bool, ContractError> {
        let ctx = Self::with_blob(org, blob);
        self.ledger
            .query(&ctx, |stub| self.contract.verify_attributes(&ctx, stub, id))
    }

    pub fn transfer(
        &self,
        org: &str,
        id: &str,
        recipient: &str,
        term: &Agreement,
    ) -> Result<CallContext, ContractError> {
        let ctx = Self::with_term(org, term);
        self.ledger
            .execute(&ctx, |stub| self.contract.transfer(&ctx, stub, id, recipient))?;
        Ok(ctx)
    }

    pub fn read(&self, id: &str) -> Result<Commodity, ContractError> {
        let ctx = Self::ctx(ORG_C);
        self.ledger
            .query(&ctx, |stub| self.contract.read_commodity(&ctx, stub, id))
    }

    pub fn state(&self, org: &str, id: &str, counterparty: &str) -> ProtocolState {
        let ctx = Self::ctx(org);
        self.ledger
            .query(&ctx, |stub| self.contract.protocol_state(&ctx, stub, id, counterparty))
            .unwrap()
    }

    /// A created commodity with both parties agreed on `term`.
    pub fn agreed(&self, term_key: i64) -> (String, Agreement) {
        let id = self.create(ORG_A, BLOB_X).unwrap();
        let term = Agreement::new(&id, term_key, format!("transfer-{term_key}"));
        self.agree_to_put(ORG_A, &id, &term).unwrap();
        self.agree_to_get(ORG_B, &id, BLOB_X, &term).unwrap();
        (id, term)
    }
}
