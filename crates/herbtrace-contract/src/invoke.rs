//! # JSON Dispatch Surface
//!
//! The invocation contract of the ledger platform: one operation name plus
//! one JSON-encoded argument object in, one JSON-encoded result out. A
//! payload that does not decode into the operation's argument struct fails
//! the whole call with `MalformedArgument`; unknown operation names do too.

use herbtrace_core::{BatchId, Error, MedicineId, ParticipantId, Result};
use herbtrace_ledger::{LedgerState, TransactionContext};
use serde::Deserialize;
use serde::Serialize;

use crate::auth::resolve_context;
use crate::batch::{
    add_processing_step, add_quality_test, create_herb_batch, load_batch, transfer_batch,
    AddProcessingStepArgs, AddQualityTestArgs, CreateHerbBatchArgs, TransferBatchArgs,
};
use crate::medicine::{create_medicine, load_medicine, CreateMedicineArgs};
use crate::participant::{
    onboard_farmer, onboard_laboratory, onboard_manufacturer, OnboardFarmerArgs,
    OnboardLaboratoryArgs, OnboardManufacturerArgs,
};
use crate::query::{
    asset_history, batches_by_farmer, consumer_info, fetch_ledger, track_supply_chain,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchIdArg {
    batch_id: BatchId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MedicineIdArg {
    medicine_id: MedicineId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemIdArg {
    item_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetIdArg {
    asset_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FarmerIdArg {
    farmer_id: ParticipantId,
}

fn decode<'a, T: Deserialize<'a>>(payload: &'a str) -> Result<T> {
    serde_json::from_str(payload).map_err(|e| Error::MalformedArgument(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Invoke one named operation with its JSON argument object.
///
/// Mutations return the written document; queries return the reconstructed
/// view. Every error is surfaced verbatim to the caller.
pub fn dispatch<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    operation: &str,
    payload: &str,
) -> Result<String> {
    match operation {
        "onboardFarmer" => encode(&onboard_farmer(ctx, decode::<OnboardFarmerArgs>(payload)?)?),
        "onboardLaboratory" => encode(&onboard_laboratory(
            ctx,
            decode::<OnboardLaboratoryArgs>(payload)?,
        )?),
        "onboardManufacturer" => encode(&onboard_manufacturer(
            ctx,
            decode::<OnboardManufacturerArgs>(payload)?,
        )?),
        "createHerbBatch" => encode(&create_herb_batch(ctx, decode::<CreateHerbBatchArgs>(payload)?)?),
        "addQualityTest" => encode(&add_quality_test(ctx, decode::<AddQualityTestArgs>(payload)?)?),
        "addProcessingStep" => encode(&add_processing_step(
            ctx,
            decode::<AddProcessingStepArgs>(payload)?,
        )?),
        "transferBatch" => encode(&transfer_batch(ctx, decode::<TransferBatchArgs>(payload)?)?),
        "createMedicine" => encode(&create_medicine(ctx, decode::<CreateMedicineArgs>(payload)?)?),

        "getBatch" => {
            let args: BatchIdArg = decode(payload)?;
            encode(&load_batch(ctx.state, &args.batch_id)?)
        }
        "getMedicine" => {
            let args: MedicineIdArg = decode(payload)?;
            encode(&load_medicine(ctx.state, &args.medicine_id)?)
        }
        "getConsumerInfo" => {
            let args: MedicineIdArg = decode(payload)?;
            encode(&consumer_info(ctx.state, &args.medicine_id)?)
        }
        "trackSupplyChain" => {
            let args: ItemIdArg = decode(payload)?;
            encode(&track_supply_chain(ctx.state, &args.item_id)?)
        }
        "getAssetHistory" => {
            let args: AssetIdArg = decode(payload)?;
            encode(&asset_history(ctx.state, &args.asset_id)?)
        }
        "getBatchesByFarmer" => {
            let args: FarmerIdArg = decode(payload)?;
            encode(&batches_by_farmer(ctx.state, &args.farmer_id)?)
        }
        "fetchLedger" => {
            let context = resolve_context(&ctx.caller)?;
            encode(&fetch_ledger(ctx.state, &context)?)
        }

        other => Err(Error::MalformedArgument(format!("unknown operation {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbtrace_core::Timestamp;
    use herbtrace_ledger::{CallerIdentity, MemoryLedger};

    use crate::auth::ORG_REGULATOR;

    #[test]
    fn unknown_operation_is_malformed() {
        let mut ledger = MemoryLedger::new();
        let mut ctx = ledger.begin_at(
            CallerIdentity::bare(ORG_REGULATOR, "admin"),
            "tx-1",
            Timestamp::parse("2024-01-01").unwrap(),
        );
        let err = dispatch(&mut ctx, "mintGold", "{}").unwrap_err();
        assert!(matches!(err, Error::MalformedArgument(_)));
    }

    #[test]
    fn garbage_payload_is_malformed() {
        let mut ledger = MemoryLedger::new();
        let mut ctx = ledger.begin_at(
            CallerIdentity::bare(ORG_REGULATOR, "admin"),
            "tx-1",
            Timestamp::parse("2024-01-01").unwrap(),
        );
        let err = dispatch(&mut ctx, "onboardFarmer", "not json").unwrap_err();
        assert!(matches!(err, Error::MalformedArgument(_)));
    }

    #[test]
    fn dispatch_roundtrips_an_onboarding() {
        let mut ledger = MemoryLedger::new();
        let mut ctx = ledger.begin_at(
            CallerIdentity::bare(ORG_REGULATOR, "admin"),
            "tx-1",
            Timestamp::parse("2024-01-01").unwrap(),
        );
        let out = dispatch(
            &mut ctx,
            "onboardFarmer",
            r#"{"farmerId":"FARM-1","name":"Ravi","farmLocation":"Dehradun","contact":"r@x"}"#,
        )
        .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["docType"], "farmer");

        let fetched = dispatch(&mut ctx, "getBatchesByFarmer", r#"{"farmerId":"FARM-1"}"#).unwrap();
        assert_eq!(fetched, "[]");
    }
}
