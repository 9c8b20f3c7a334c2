//! # Medicine Assembly
//!
//! A medicine is created once by a manufacturer from a set of existing
//! batches and is immutable afterwards. All referenced batches are read and
//! verified before the single write — if any is missing, the operation
//! aborts with nothing persisted.

use herbtrace_core::{BatchId, Error, MedicineId, ParticipantId, Result, Role, Timestamp};
use herbtrace_ledger::{LedgerState, TransactionContext};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{authorize, resolve_context};
use crate::batch::load_batch;
use crate::provenance::{self, ActivityCode, EntityRole, ProvenanceEntity, ProvenanceRecord, Reference};

/// A finished medicine assembled from herb batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Always `"medicine"`.
    pub doc_type: String,
    pub id: MedicineId,
    pub medicine_name: String,
    /// The batches consumed by this medicine.
    pub batch_ids: Vec<BatchId>,
    pub manufacturing_date: Timestamp,
    pub expiry_date: Timestamp,
    pub manufacturer_id: ParticipantId,
    /// Deterministic payload encoded into the pack QR code; rendering is a
    /// presentation concern and happens elsewhere.
    pub qr_payload: String,
    /// Always `"manufactured"` — the single terminal state.
    pub status: String,
    pub provenance: Vec<ProvenanceRecord>,
}

/// Arguments for `createMedicine`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicineArgs {
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub batch_ids: Vec<BatchId>,
    pub manufacturing_date: String,
    pub expiry_date: String,
}

/// Create a medicine. Manufacturer role, any organization.
///
/// Every referenced batch id must already exist; the existence reads all
/// happen before the write, so a missing batch aborts with the medicine key
/// still absent.
pub fn create_medicine<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: CreateMedicineArgs,
) -> Result<Medicine> {
    let context = resolve_context(&ctx.caller)?;
    authorize(&context, "createMedicine", &[(Role::Manufacturer, None)])?;

    if args.medicine_id.is_empty() {
        return Err(Error::MalformedArgument("medicineId must not be empty".into()));
    }
    if args.batch_ids.is_empty() {
        return Err(Error::MalformedArgument("batchIds must not be empty".into()));
    }
    if ctx.state.get(args.medicine_id.as_str())?.is_some() {
        return Err(Error::AlreadyExists(format!("medicine {}", args.medicine_id)));
    }

    // All-or-nothing read validation: verify every batch before any write.
    for batch_id in &args.batch_ids {
        load_batch(ctx.state, batch_id)?;
    }

    let manufacturing_date = Timestamp::parse(&args.manufacturing_date)?;
    let expiry_date = Timestamp::parse(&args.expiry_date)?;
    if expiry_date <= manufacturing_date {
        return Err(Error::MalformedArgument(
            "expiryDate must be after manufacturingDate".into(),
        ));
    }

    let sources = args
        .batch_ids
        .iter()
        .map(|b| ProvenanceEntity {
            role: EntityRole::Source,
            what: Reference::to("HerbBatch", b.as_str()),
        })
        .collect();
    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::Manufacture,
        vec![Reference::to("Medicine", args.medicine_id.as_str())],
        "medicine assembled from batches",
        manufacturing_date,
    )
    .with_entities(sources);

    let qr_payload = qr_payload(&args.medicine_id, &args.batch_ids);
    let medicine = Medicine {
        doc_type: "medicine".to_string(),
        id: args.medicine_id,
        medicine_name: args.medicine_name,
        batch_ids: args.batch_ids,
        manufacturing_date,
        expiry_date,
        manufacturer_id: ParticipantId::new(context.subject_id),
        qr_payload,
        status: "manufactured".to_string(),
        provenance: vec![record],
    };
    ctx.state
        .put(medicine.id.as_str(), serde_json::to_vec(&medicine)?)?;
    info!(medicine = %medicine.id, batches = medicine.batch_ids.len(), "medicine created");
    Ok(medicine)
}

/// Deterministic QR payload: the consumer-info locator for this medicine.
fn qr_payload(id: &MedicineId, batch_ids: &[BatchId]) -> String {
    let batches: Vec<&str> = batch_ids.iter().map(BatchId::as_str).collect();
    format!("herbtrace://medicine/{id}?batches={}", batches.join(","))
}

/// Load and decode a medicine document, failing `NotFound` when absent.
pub fn load_medicine<S: LedgerState>(state: &S, id: &MedicineId) -> Result<Medicine> {
    let bytes = state
        .get(id.as_str())?
        .ok_or_else(|| Error::NotFound(format!("medicine {id}")))?;
    let medicine: Medicine = serde_json::from_slice(&bytes)?;
    if medicine.doc_type != "medicine" {
        return Err(Error::NotFound(format!("{id} is not a medicine")));
    }
    Ok(medicine)
}
