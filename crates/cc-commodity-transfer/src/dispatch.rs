//! # Entry-Point Dispatcher
//!
//! Routes host invocations (function name plus positional string arguments)
//! to the typed contract API.
//!
//! ## Output Encoding
//!
//! - String results (ids, private blobs, commitments) are returned raw.
//! - Structured results are JSON.
//! - Operations without a result return an empty payload.

use crate::domain::entities::AgreementRole;
use crate::errors::ContractError;
use crate::ports::inbound::CommodityTransferApi;
use crate::ports::outbound::LedgerStub;
use serde::Serialize;
use shared_types::CallContext;
use tracing::{debug, instrument};

/// Entry points known to the dispatcher.
pub const ENTRY_POINTS: &[&str] = &[
    "CreateAsset",
    "ChangePublicDescription",
    "AgreeToPut",
    "AgreeToGet",
    "VerifyCommodityProperties",
    "TransferCommodity",
    "ReadCommodity",
    "GetCommodityPrivateProperties",
    "GetCommodityUpstreamKey",
    "GetCommodityDownstreamKey",
    "QueryCommodityPutAgreements",
    "QueryCommodityGetAgreements",
    "QueryCommodityHistory",
    "GetCommodityHashId",
];

/// Host-facing router over a [`CommodityTransferApi`].
pub struct ContractDispatcher<A: CommodityTransferApi> {
    api: A,
}

impl<A: CommodityTransferApi> ContractDispatcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Invoke `function` with positional `args`.
    #[instrument(skip(self, ctx, stub, args), fields(tx_id = %ctx.tx_id()))]
    pub fn invoke(
        &self,
        ctx: &CallContext,
        stub: &mut dyn LedgerStub,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        debug!(argc = args.len(), "Dispatching");
        let api = &self.api;

        match function {
            "CreateAsset" => {
                let [target, description] = arity::<2>(function, args)?;
                let id = api.create_commodity(ctx, stub, target, description)?;
                Ok(id.into_bytes())
            }
            "ChangePublicDescription" => {
                let [id, description] = arity::<2>(function, args)?;
                api.change_public_description(ctx, stub, id, description)?;
                Ok(Vec::new())
            }
            "AgreeToPut" => {
                let [id] = arity::<1>(function, args)?;
                api.agree_to_put(ctx, stub, id)?;
                Ok(Vec::new())
            }
            "AgreeToGet" => {
                let [id] = arity::<1>(function, args)?;
                api.agree_to_get(ctx, stub, id)?;
                Ok(Vec::new())
            }
            "VerifyCommodityProperties" => {
                let [id] = arity::<1>(function, args)?;
                json(&api.verify_attributes(ctx, stub, id)?)
            }
            "TransferCommodity" => {
                let [id, recipient] = arity::<2>(function, args)?;
                api.transfer(ctx, stub, id, recipient)?;
                Ok(Vec::new())
            }
            "ReadCommodity" => {
                let [id] = arity::<1>(function, args)?;
                json(&api.read_commodity(ctx, stub, id)?)
            }
            "GetCommodityPrivateProperties" => {
                let [id] = arity::<1>(function, args)?;
                api.get_private_attributes(ctx, stub, id)
            }
            "GetCommodityUpstreamKey" => {
                let [id] = arity::<1>(function, args)?;
                api.get_commitment(ctx, stub, id, AgreementRole::ForTransfer)
            }
            "GetCommodityDownstreamKey" => {
                let [id] = arity::<1>(function, args)?;
                api.get_commitment(ctx, stub, id, AgreementRole::ForAcquire)
            }
            "QueryCommodityPutAgreements" => {
                arity::<0>(function, args)?;
                json(&api.pending_agreements(ctx, stub, AgreementRole::ForTransfer)?)
            }
            "QueryCommodityGetAgreements" => {
                arity::<0>(function, args)?;
                json(&api.pending_agreements(ctx, stub, AgreementRole::ForAcquire)?)
            }
            "QueryCommodityHistory" => {
                let [id] = arity::<1>(function, args)?;
                json(&api.history(ctx, stub, id)?)
            }
            "GetCommodityHashId" => {
                arity::<0>(function, args)?;
                Ok(api.resolve_commodity_id(ctx, stub)?.into_bytes())
            }
            unknown => Err(ContractError::Input(format!("unknown function {unknown}"))),
        }
    }
}

fn arity<'a, const N: usize>(function: &str, args: &'a [String]) -> Result<[&'a str; N], ContractError> {
    if args.len() != N {
        return Err(ContractError::Input(format!(
            "{function} expects {N} argument(s), got {}",
            args.len()
        )));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

fn json<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    Ok(serde_json::to_vec(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::contract::CommodityContract;
    use crate::domain::entities::{Agreement, Commodity};
    use crate::errors::ErrorKind;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn dispatcher() -> ContractDispatcher<CommodityContract> {
        ContractDispatcher::new(CommodityContract::default())
    }

    #[test]
    fn test_unknown_function_is_input_error() {
        let ledger = InMemoryLedger::new();
        let ctx = CallContext::for_org("Org1MSP");
        let err = ledger
            .execute(&ctx, |stub| dispatcher().invoke(&ctx, stub, "DeleteAsset", &[]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_wrong_arity_is_input_error() {
        let ledger = InMemoryLedger::new();
        let ctx = CallContext::for_org("Org1MSP");
        let err = ledger
            .execute(&ctx, |stub| {
                dispatcher().invoke(&ctx, stub, "ReadCommodity", &args(&["a", "b"]))
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_create_then_read_through_entry_points() {
        let ledger = InMemoryLedger::new();
        let dispatcher = dispatcher();
        let ctx = CallContext::for_org("Org1MSP").with_transient("commodity_properties", b"blob".to_vec());

        let id = ledger
            .execute(&ctx, |stub| {
                dispatcher.invoke(&ctx, stub, "CreateAsset", &args(&["Org2MSP", "grain"]))
            })
            .unwrap();
        let id = String::from_utf8(id).unwrap();

        let reader = CallContext::for_org("Org2MSP");
        let bytes = ledger
            .execute(&reader, |stub| {
                dispatcher.invoke(&reader, stub, "ReadCommodity", &args(&[id.as_str()]))
            })
            .unwrap();
        let commodity: Commodity = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(commodity.owner_org, "Org1MSP");
        assert_eq!(commodity.public_description, "grain");

        let private = ledger
            .execute(&ctx, |stub| {
                dispatcher.invoke(&ctx, stub, "GetCommodityPrivateProperties", &args(&[id.as_str()]))
            })
            .unwrap();
        assert_eq!(private, b"blob".to_vec());
    }

    #[test]
    fn test_put_agreements_listed_as_json() {
        let ledger = InMemoryLedger::new();
        let dispatcher = dispatcher();
        let ctx = CallContext::for_org("Org1MSP").with_transient("commodity_properties", b"blob".to_vec());
        let id = ledger
            .execute(&ctx, |stub| dispatcher.invoke(&ctx, stub, "CreateAsset", &args(&["", "d"])))
            .map(|bytes| String::from_utf8(bytes).unwrap())
            .unwrap();

        let term = Agreement::new(&id, 7, "t-1");
        let agree_ctx = CallContext::for_org("Org1MSP")
            .with_transient("commodity_transferKey", term.to_bytes().unwrap());
        ledger
            .execute(&agree_ctx, |stub| {
                dispatcher.invoke(&agree_ctx, stub, "AgreeToPut", &args(&[id.as_str()]))
            })
            .unwrap();

        let listed = ledger
            .execute(&agree_ctx, |stub| {
                dispatcher.invoke(&agree_ctx, stub, "QueryCommodityPutAgreements", &[])
            })
            .unwrap();
        let agreements: Vec<Agreement> = serde_json::from_slice(&listed).unwrap();
        assert_eq!(agreements, vec![term]);
    }

    #[test]
    fn test_entry_point_table_is_complete() {
        assert_eq!(ENTRY_POINTS.len(), 14);
    }
}
