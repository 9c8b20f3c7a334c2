//! # Lineage Reconstruction
//!
//! Read-only views assembled from the documents and the platform's per-key
//! history log. Reads run against a stable snapshot and need no
//! authorization — except the full-ledger dump, which stays regulator-only.
//!
//! `batches_by_farmer` and `fetch_ledger` are full-keyspace range scans
//! filtered client-side: O(n) over the whole dataset, kept that way on
//! purpose rather than silently indexed.

use herbtrace_core::{CallerContext, Error, MedicineId, ParticipantId, Result, Role, Timestamp};
use herbtrace_ledger::LedgerState;
use serde::{Deserialize, Serialize};

use crate::auth::authorize;
use crate::batch::{load_batch, HerbBatch, QualityStatus};
use crate::medicine::{load_medicine, Medicine};

/// One ingredient of a medicine, summarized for the consumer view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInfo {
    pub batch_id: String,
    pub herb_name: String,
    pub scientific_name: String,
    pub farm_location: String,
    /// The approved collection zone the batch was harvested in.
    pub zone: Option<String>,
    pub quality_status: QualityStatus,
}

/// One event on the merged provenance timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// `Harvest`, `Quality Test`, `Processing`, `Transfer` or `Manufacturing`.
    pub event: String,
    pub date: Timestamp,
    pub detail: String,
}

/// Aggregated conservation score over a medicine's batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilitySummary {
    /// Mean of the batches' sustainability scores.
    pub average_score: Option<f64>,
    pub batches_scored: usize,
}

/// The consumer-facing provenance view of a medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerInfo {
    pub medicine_id: String,
    pub medicine_name: String,
    pub manufacturing_date: Timestamp,
    pub expiry_date: Timestamp,
    pub ingredients: Vec<IngredientInfo>,
    /// All events across all batches plus manufacturing, ascending by date.
    pub timeline: Vec<TimelineEvent>,
    pub sustainability: SustainabilitySummary,
}

/// Reconstruct the consumer view: ingredients, merged event timeline, and
/// the aggregated sustainability score.
pub fn consumer_info<S: LedgerState>(state: &S, medicine_id: &MedicineId) -> Result<ConsumerInfo> {
    let medicine = load_medicine(state, medicine_id)?;

    let mut ingredients = Vec::new();
    let mut timeline = Vec::new();
    let mut score_sum = 0.0;
    let mut scored = 0usize;

    for batch_id in &medicine.batch_ids {
        let batch = load_batch(state, batch_id)?;

        ingredients.push(IngredientInfo {
            batch_id: batch.id.to_string(),
            herb_name: batch.herb_name.clone(),
            scientific_name: batch.scientific_name.clone(),
            farm_location: batch.farm_location.clone(),
            zone: batch.validation_results.geo.zone.clone(),
            quality_status: batch.quality_status,
        });

        score_sum += batch.validation_results.sustainability.score as f64;
        scored += 1;

        timeline.push(TimelineEvent {
            event: "Harvest".to_string(),
            date: batch.harvest_date,
            detail: format!("{} collected at {}", batch.herb_name, batch.farm_location),
        });
        for test in &batch.quality_tests {
            timeline.push(TimelineEvent {
                event: "Quality Test".to_string(),
                date: test.test_date,
                detail: format!("{} test by {}: {:?}", test.test_type, test.lab_id, test.status),
            });
        }
        for step in &batch.processing_steps {
            timeline.push(TimelineEvent {
                event: "Processing".to_string(),
                date: step.date,
                detail: format!("{} by {}", step.processing_type, step.processor_id),
            });
        }
        for transfer in &batch.transfer_history {
            timeline.push(TimelineEvent {
                event: "Transfer".to_string(),
                date: transfer.recorded_at,
                detail: format!("{} to {}", transfer.from_id, transfer.to_id),
            });
        }
    }

    timeline.push(TimelineEvent {
        event: "Manufacturing".to_string(),
        date: medicine.manufacturing_date,
        detail: format!("{} assembled by {}", medicine.medicine_name, medicine.manufacturer_id),
    });

    // Stable sort: equal dates keep batch insertion order.
    timeline.sort_by_key(|e| e.date);

    Ok(ConsumerInfo {
        medicine_id: medicine.id.to_string(),
        medicine_name: medicine.medicine_name,
        manufacturing_date: medicine.manufacturing_date,
        expiry_date: medicine.expiry_date,
        ingredients,
        timeline,
        sustainability: SustainabilitySummary {
            average_score: (scored > 0).then(|| score_sum / scored as f64),
            batches_scored: scored,
        },
    })
}

/// An asset plus one hop of the batches it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainTrace {
    /// The asset document as stored.
    pub item: serde_json::Value,
    /// For medicines, the referenced batches; empty otherwise. One hop only,
    /// no recursive expansion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub batches: Vec<HerbBatch>,
}

/// Load one asset; when it is a medicine, also load its referenced batches.
pub fn track_supply_chain<S: LedgerState>(state: &S, item_id: &str) -> Result<SupplyChainTrace> {
    let bytes = state
        .get(item_id)?
        .ok_or_else(|| Error::NotFound(format!("asset {item_id}")))?;
    let item: serde_json::Value = serde_json::from_slice(&bytes)?;

    let mut batches = Vec::new();
    if item.get("docType").and_then(|v| v.as_str()) == Some("medicine") {
        let medicine: Medicine = serde_json::from_value(item.clone())?;
        for batch_id in &medicine.batch_ids {
            batches.push(load_batch(state, batch_id)?);
        }
    }
    Ok(SupplyChainTrace { item, batches })
}

/// One committed version of an asset, decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetVersion {
    pub tx_id: String,
    pub timestamp: Timestamp,
    pub is_delete: bool,
    /// The document at this version; absent for deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<serde_json::Value>,
}

/// Every committed version of an asset, oldest first, from the platform's
/// per-key history log. The underlying iterator is forward-only; this is
/// its single pass.
pub fn asset_history<S: LedgerState>(state: &S, asset_id: &str) -> Result<Vec<AssetVersion>> {
    let mut versions = Vec::new();
    for entry in state.history(asset_id)? {
        let document = match (&entry.value, entry.is_delete) {
            (Some(bytes), false) => Some(serde_json::from_slice(bytes)?),
            _ => None,
        };
        versions.push(AssetVersion {
            tx_id: entry.tx_id,
            timestamp: entry.timestamp,
            is_delete: entry.is_delete,
            document,
        });
    }
    if versions.is_empty() {
        return Err(Error::NotFound(format!("asset {asset_id}")));
    }
    Ok(versions)
}

/// All batches created by a farmer. Full-keyspace scan, filtered here.
pub fn batches_by_farmer<S: LedgerState>(state: &S, farmer_id: &ParticipantId) -> Result<Vec<HerbBatch>> {
    let mut batches = Vec::new();
    for (_key, bytes) in state.range_scan("", "")? {
        // Non-batch documents simply do not decode as batches; skip them.
        if let Ok(batch) = serde_json::from_slice::<HerbBatch>(&bytes) {
            if batch.doc_type == "herbBatch" && &batch.farmer_id == farmer_id {
                batches.push(batch);
            }
        }
    }
    Ok(batches)
}

/// One entry of the full-ledger dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub key: String,
    pub document: serde_json::Value,
}

/// Dump every document on the ledger. Regulator only; the one read that is
/// authorization-gated.
pub fn fetch_ledger<S: LedgerState>(state: &S, context: &CallerContext) -> Result<Vec<LedgerEntry>> {
    authorize(context, "fetchLedger", &[(Role::Regulator, None)])?;
    let mut entries = Vec::new();
    for (key, bytes) in state.range_scan("", "")? {
        entries.push(LedgerEntry {
            key,
            document: serde_json::from_slice(&bytes)?,
        });
    }
    Ok(entries)
}
