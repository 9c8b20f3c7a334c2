//! # Herb Batch Lifecycle
//!
//! A batch is created by a farmer, tested by laboratories, processed and
//! transferred, and finally consumed by a medicine. The batch document is
//! rewritten whole on every mutation; the embedded arrays (`qualityTests`,
//! `processingSteps`, `transferHistory`, `provenance`) are append-only.
//!
//! Status is a denormalized label, not a strict state machine: `status`
//! (`harvested` → `processed_{type}` → `transferred`) and `qualityStatus`
//! (`pending` → `passed`/`failed`) are updated independently by different
//! operations, and a later harvest-side status does not invalidate an
//! earlier quality verdict.
//!
//! The pure `apply_*` transitions compute the next document from the
//! current one without touching storage; the operation wrappers handle
//! context resolution, authorization, validation and the single `put`.

use std::collections::BTreeMap;

use herbtrace_core::{BatchId, Error, ParticipantId, Result, Role, Timestamp, ValidationKind};
use herbtrace_ledger::{LedgerState, TransactionContext};
use herbtrace_rules::{
    geo, processing, quality, season, sustainability, GeoCheck, ProcessingCheck,
    ProcessingConditions, QualityCheck, QualityMetrics, SeasonCheck, SustainabilityCheck,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{authorize, resolve_context, ORG_LAB_COUNCIL, ORG_REGULATOR};
use crate::provenance::{self, ActivityCode, EntityRole, ProvenanceEntity, ProvenanceRecord, Reference};

/// WGS-84 coordinates of the harvest location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Aggregate quality verdict on a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    /// No test recorded yet.
    Pending,
    /// Latest test passed.
    Passed,
    /// Latest test failed.
    Failed,
}

/// Verdict of a single quality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
}

/// One recorded quality test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityTestRecord {
    pub test_type: String,
    /// The laboratory (or regulator) that ran the test.
    pub lab_id: ParticipantId,
    pub operator_id: String,
    pub test_date: Timestamp,
    pub results: QualityMetrics,
    pub validation: QualityCheck,
    /// Certification granted on PASS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    pub status: TestStatus,
    pub recorded_at: Timestamp,
}

/// One recorded processing step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStepRecord {
    pub processing_type: String,
    pub processor_id: String,
    pub date: Timestamp,
    pub conditions: ProcessingConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    /// Free-form measurements going in (e.g. `{"quantityKg": 120}`).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub input_metrics: serde_json::Value,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub output_metrics: serde_json::Value,
    pub validation: ProcessingCheck,
    /// `completed` — failed condition checks abort before the record exists.
    pub status: String,
    pub recorded_at: Timestamp,
}

/// One recorded custody transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub from_id: String,
    pub to_id: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub recorded_at: Timestamp,
}

/// Creation-time validator outcomes, embedded verbatim in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResults {
    pub geo: GeoCheck,
    pub seasonal: SeasonCheck,
    pub sustainability: SustainabilityCheck,
}

/// A herb collection batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HerbBatch {
    /// Always `"herbBatch"`.
    pub doc_type: String,
    pub id: BatchId,
    pub herb_name: String,
    pub scientific_name: String,
    pub harvest_date: Timestamp,
    pub farm_location: String,
    /// Harvested quantity in `unit`.
    pub quantity: f64,
    pub unit: String,
    pub gps_coordinates: GpsCoordinates,
    /// Free-form field observations (soil, rainfall, ...).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub environmental_data: serde_json::Value,
    pub farmer_id: ParticipantId,
    /// Current custodian; starts as the farmer.
    pub current_owner: String,
    /// Denormalized lifecycle label: `harvested`, `processed_{type}`,
    /// `transferred`.
    pub status: String,
    pub quality_status: QualityStatus,
    /// Baseline metrics from the first quality test; set exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_metrics: Option<QualityMetrics>,
    #[serde(default)]
    pub quality_tests: Vec<QualityTestRecord>,
    #[serde(default)]
    pub processing_steps: Vec<ProcessingStepRecord>,
    #[serde(default)]
    pub transfer_history: Vec<TransferRecord>,
    /// Certifications granted by passed tests, keyed by test type.
    #[serde(default)]
    pub certifications: BTreeMap<String, String>,
    pub validation_results: ValidationResults,
    pub provenance: Vec<ProvenanceRecord>,
}

impl HerbBatch {
    /// Reference to this batch for provenance targets.
    pub fn reference(&self) -> Reference {
        Reference::to("HerbBatch", self.id.as_str())
    }
}

// ─── createHerbBatch ─────────────────────────────────────────────────

/// Arguments for `createHerbBatch`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHerbBatchArgs {
    pub batch_id: BatchId,
    pub herb_name: String,
    pub scientific_name: String,
    /// RFC 3339 timestamp or bare `YYYY-MM-DD` date.
    pub harvest_date: String,
    pub farm_location: String,
    /// Numeric string; kilograms unless `unit` says otherwise.
    pub quantity: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub gps_coordinates: GpsCoordinates,
    #[serde(default)]
    pub environmental_data: serde_json::Value,
}

fn default_unit() -> String {
    "kg".to_string()
}

/// Create a herb batch. Farmer role, any organization.
///
/// Geo-fence, seasonal-window and sustainability validators all run here
/// and only here; the first failing one aborts the creation, so no partial
/// batch is ever persisted.
pub fn create_herb_batch<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: CreateHerbBatchArgs,
) -> Result<HerbBatch> {
    let context = resolve_context(&ctx.caller)?;
    authorize(&context, "createHerbBatch", &[(Role::Farmer, None)])?;

    if args.batch_id.is_empty() {
        return Err(Error::MalformedArgument("batchId must not be empty".into()));
    }
    if args.herb_name.is_empty() {
        return Err(Error::MalformedArgument("herbName must not be empty".into()));
    }
    if ctx.state.get(args.batch_id.as_str())?.is_some() {
        return Err(Error::AlreadyExists(format!("batch {}", args.batch_id)));
    }

    let harvest_date = Timestamp::parse(&args.harvest_date)?;
    let quantity: f64 = args.quantity.trim().parse().map_err(|_| {
        Error::MalformedArgument(format!("quantity {:?} is not numeric", args.quantity))
    })?;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::MalformedArgument(format!(
            "quantity must be positive, got {quantity}"
        )));
    }

    let geo = geo::check(args.gps_coordinates.latitude, args.gps_coordinates.longitude);
    if !geo.valid {
        warn!(batch = %args.batch_id, "geo-fence rejected harvest location");
        return Err(Error::ValidationFailed {
            kind: ValidationKind::GeoFence,
            details: format!(
                "coordinates ({}, {}) outside all approved zones",
                args.gps_coordinates.latitude, args.gps_coordinates.longitude
            ),
        });
    }
    let seasonal = season::check(&args.herb_name, harvest_date);
    if !seasonal.valid {
        warn!(batch = %args.batch_id, herb = %args.herb_name, "harvest outside seasonal window");
        return Err(Error::ValidationFailed {
            kind: ValidationKind::Seasonal,
            details: format!(
                "month {} outside window {:?} for {}",
                harvest_date.month(),
                seasonal.window,
                args.herb_name
            ),
        });
    }
    let sustainability = sustainability::check(&args.herb_name, quantity);
    if !sustainability.valid {
        warn!(batch = %args.batch_id, herb = %args.herb_name, "harvest over sustainability cap");
        return Err(Error::ValidationFailed {
            kind: ValidationKind::Sustainability,
            details: format!(
                "quantity {quantity} kg over seasonal cap {:?} kg for {} (score {})",
                sustainability.limit_kg, args.herb_name, sustainability.score
            ),
        });
    }

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::Harvest,
        vec![Reference::to("HerbBatch", args.batch_id.as_str())],
        "herb batch collected",
        harvest_date,
    );
    let batch = HerbBatch {
        doc_type: "herbBatch".to_string(),
        id: args.batch_id,
        herb_name: args.herb_name,
        scientific_name: args.scientific_name,
        harvest_date,
        farm_location: args.farm_location,
        quantity,
        unit: args.unit,
        gps_coordinates: args.gps_coordinates,
        environmental_data: args.environmental_data,
        farmer_id: ParticipantId::new(context.subject_id.clone()),
        current_owner: context.subject_id,
        status: "harvested".to_string(),
        quality_status: QualityStatus::Pending,
        quality_metrics: None,
        quality_tests: Vec::new(),
        processing_steps: Vec::new(),
        transfer_history: Vec::new(),
        certifications: BTreeMap::new(),
        validation_results: ValidationResults {
            geo,
            seasonal,
            sustainability,
        },
        provenance: vec![record],
    };
    ctx.state.put(batch.id.as_str(), serde_json::to_vec(&batch)?)?;
    info!(batch = %batch.id, herb = %batch.herb_name, "herb batch created");
    Ok(batch)
}

// ─── addQualityTest ──────────────────────────────────────────────────

/// Arguments for `addQualityTest`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQualityTestArgs {
    pub batch_id: BatchId,
    pub test_type: String,
    pub operator_id: String,
    pub test_date: String,
    pub metrics: QualityMetrics,
}

/// Pure transition: append a quality test to the batch document.
///
/// The `qualityMetrics` baseline is set from the first test only; later
/// tests append to `qualityTests` and update `qualityStatus` without
/// touching the baseline.
pub fn apply_quality_test(mut batch: HerbBatch, test: QualityTestRecord) -> HerbBatch {
    if batch.quality_metrics.is_none() {
        batch.quality_metrics = Some(test.results);
    }
    batch.quality_status = match test.status {
        TestStatus::Pass => QualityStatus::Passed,
        TestStatus::Fail => QualityStatus::Failed,
    };
    if let Some(cert) = &test.certification {
        batch.certifications.insert(test.test_type.clone(), cert.clone());
    }
    batch.quality_tests.push(test);
    batch
}

/// Record a quality test. Laboratory at the lab council, or regulator at
/// the regulatory authority.
///
/// A breached threshold does not abort: the test is persisted with status
/// FAIL and the batch's `qualityStatus` becomes `failed`. Only hard
/// validators at creation time abort a batch.
pub fn add_quality_test<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: AddQualityTestArgs,
) -> Result<HerbBatch> {
    let context = resolve_context(&ctx.caller)?;
    authorize(
        &context,
        "addQualityTest",
        &[
            (Role::Laboratory, Some(ORG_LAB_COUNCIL)),
            (Role::Regulator, Some(ORG_REGULATOR)),
        ],
    )?;

    let batch = load_batch(ctx.state, &args.batch_id)?;
    let test_date = Timestamp::parse(&args.test_date)?;
    let validation = quality::check(&batch.herb_name, &args.metrics);
    let status = if validation.valid { TestStatus::Pass } else { TestStatus::Fail };
    let certification = match status {
        TestStatus::Pass => Some(format!(
            "AYUSH-{}-{}",
            args.test_type.to_uppercase(),
            args.batch_id
        )),
        TestStatus::Fail => None,
    };

    let test = QualityTestRecord {
        test_type: args.test_type,
        lab_id: ParticipantId::new(context.subject_id.clone()),
        operator_id: args.operator_id,
        test_date,
        results: args.metrics,
        validation,
        certification,
        status,
        recorded_at: ctx.tx_timestamp,
    };

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::QualityTest,
        vec![Reference::to("HerbBatch", args.batch_id.as_str())],
        "quality test recorded",
        test_date,
    )
    .with_entities(vec![ProvenanceEntity {
        role: EntityRole::Revision,
        what: Reference::to("HerbBatch", args.batch_id.as_str()),
    }]);

    let mut next = apply_quality_test(batch, test);
    next.provenance.push(record);
    ctx.state.put(next.id.as_str(), serde_json::to_vec(&next)?)?;
    info!(batch = %next.id, status = ?next.quality_status, "quality test recorded");
    Ok(next)
}

// ─── addProcessingStep ───────────────────────────────────────────────

/// Arguments for `addProcessingStep`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProcessingStepArgs {
    pub batch_id: BatchId,
    pub processing_type: String,
    pub date: String,
    #[serde(default)]
    pub conditions: ProcessingConditions,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub input_metrics: serde_json::Value,
    #[serde(default)]
    pub output_metrics: serde_json::Value,
}

/// Pure transition: append a processing step and relabel the batch.
pub fn apply_processing_step(mut batch: HerbBatch, step: ProcessingStepRecord) -> HerbBatch {
    batch.status = format!("processed_{}", step.processing_type);
    batch.processing_steps.push(step);
    batch
}

/// Record a processing step. Manufacturer or processor, any organization.
///
/// Conditions outside the permitted envelope for (type, herb) abort the
/// operation; a step is only ever persisted with a passing check.
pub fn add_processing_step<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: AddProcessingStepArgs,
) -> Result<HerbBatch> {
    let context = resolve_context(&ctx.caller)?;
    authorize(
        &context,
        "addProcessingStep",
        &[(Role::Manufacturer, None), (Role::Processor, None)],
    )?;

    let batch = load_batch(ctx.state, &args.batch_id)?;
    let date = Timestamp::parse(&args.date)?;
    let validation = processing::check(&args.processing_type, &batch.herb_name, &args.conditions);
    if !validation.valid {
        warn!(batch = %args.batch_id, step = %args.processing_type, "processing conditions rejected");
        return Err(Error::ValidationFailed {
            kind: ValidationKind::ProcessingConditions,
            details: validation.violations.join("; "),
        });
    }

    let step = ProcessingStepRecord {
        processing_type: args.processing_type,
        processor_id: context.subject_id.clone(),
        date,
        conditions: args.conditions,
        equipment: args.equipment,
        input_metrics: args.input_metrics,
        output_metrics: args.output_metrics,
        validation,
        status: "completed".to_string(),
        recorded_at: ctx.tx_timestamp,
    };

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::Processing,
        vec![Reference::to("HerbBatch", args.batch_id.as_str())],
        "processing step recorded",
        date,
    )
    .with_entities(vec![ProvenanceEntity {
        role: EntityRole::Revision,
        what: Reference::to("HerbBatch", args.batch_id.as_str()),
    }]);

    let mut next = apply_processing_step(batch, step);
    next.provenance.push(record);
    ctx.state.put(next.id.as_str(), serde_json::to_vec(&next)?)?;
    info!(batch = %next.id, status = %next.status, "processing step recorded");
    Ok(next)
}

// ─── transferBatch ───────────────────────────────────────────────────

/// Arguments for `transferBatch`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBatchArgs {
    pub batch_id: BatchId,
    pub to_id: String,
    pub reason: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Pure transition: append a transfer and hand over custody.
pub fn apply_transfer(mut batch: HerbBatch, transfer: TransferRecord) -> HerbBatch {
    batch.current_owner = transfer.to_id.clone();
    batch.status = "transferred".to_string();
    batch.transfer_history.push(transfer);
    batch
}

/// Transfer custody of a batch. Any caller with a resolvable context.
///
/// Deliberately does not verify that the caller is the current owner —
/// custody is asserted, not enforced, and the transfer history records who
/// asserted it.
pub fn transfer_batch<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: TransferBatchArgs,
) -> Result<HerbBatch> {
    let context = resolve_context(&ctx.caller)?;
    if args.to_id.is_empty() {
        return Err(Error::MalformedArgument("toId must not be empty".into()));
    }

    let batch = load_batch(ctx.state, &args.batch_id)?;
    let transfer = TransferRecord {
        from_id: batch.current_owner.clone(),
        to_id: args.to_id,
        reason: args.reason,
        location: args.location,
        recorded_at: ctx.tx_timestamp,
    };

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::Transfer,
        vec![Reference::to("HerbBatch", args.batch_id.as_str())],
        "custody transferred",
        ctx.tx_timestamp,
    )
    .with_entities(vec![ProvenanceEntity {
        role: EntityRole::Revision,
        what: Reference::to("HerbBatch", args.batch_id.as_str()),
    }]);

    let mut next = apply_transfer(batch, transfer);
    next.provenance.push(record);
    ctx.state.put(next.id.as_str(), serde_json::to_vec(&next)?)?;
    info!(batch = %next.id, owner = %next.current_owner, "batch transferred");
    Ok(next)
}

// ─── shared plumbing ─────────────────────────────────────────────────

/// Load and decode a batch document, failing `NotFound` when absent.
pub fn load_batch<S: LedgerState>(state: &S, id: &BatchId) -> Result<HerbBatch> {
    let bytes = state
        .get(id.as_str())?
        .ok_or_else(|| Error::NotFound(format!("batch {id}")))?;
    let batch: HerbBatch = serde_json::from_slice(&bytes)?;
    if batch.doc_type != "herbBatch" {
        return Err(Error::NotFound(format!("{id} is not a herb batch")));
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(moisture: f64) -> QualityMetrics {
        QualityMetrics {
            moisture,
            pesticide: 0.1,
            purity: 98.0,
        }
    }

    fn test_record(moisture: f64, status: TestStatus) -> QualityTestRecord {
        QualityTestRecord {
            test_type: "moisture".into(),
            lab_id: ParticipantId::new("LAB-1"),
            operator_id: "op-1".into(),
            test_date: Timestamp::parse("2024-01-05").unwrap(),
            results: metrics(moisture),
            validation: QualityCheck {
                valid: status == TestStatus::Pass,
                issues: Vec::new(),
                warnings: Vec::new(),
            },
            certification: None,
            status,
            recorded_at: Timestamp::parse("2024-01-05").unwrap(),
        }
    }

    fn harvested_batch() -> HerbBatch {
        HerbBatch {
            doc_type: "herbBatch".into(),
            id: BatchId::new("BATCH-1"),
            herb_name: "ashwagandha".into(),
            scientific_name: "Withania somnifera".into(),
            harvest_date: Timestamp::parse("2024-01-01").unwrap(),
            farm_location: "Dehradun".into(),
            quantity: 100.0,
            unit: "kg".into(),
            gps_coordinates: GpsCoordinates {
                latitude: 30.0,
                longitude: 78.5,
            },
            environmental_data: serde_json::Value::Null,
            farmer_id: ParticipantId::new("FARM-1"),
            current_owner: "FARM-1".into(),
            status: "harvested".into(),
            quality_status: QualityStatus::Pending,
            quality_metrics: None,
            quality_tests: Vec::new(),
            processing_steps: Vec::new(),
            transfer_history: Vec::new(),
            certifications: BTreeMap::new(),
            validation_results: ValidationResults {
                geo: geo::check(30.0, 78.5),
                seasonal: season::check("ashwagandha", Timestamp::parse("2024-01-01").unwrap()),
                sustainability: sustainability::check("ashwagandha", 100.0),
            },
            provenance: Vec::new(),
        }
    }

    #[test]
    fn baseline_metrics_set_exactly_once() {
        let batch = harvested_batch();
        let after_first = apply_quality_test(batch, test_record(8.0, TestStatus::Pass));
        assert_eq!(after_first.quality_metrics, Some(metrics(8.0)));

        let after_second = apply_quality_test(after_first, test_record(11.0, TestStatus::Pass));
        // Baseline untouched, both tests recorded.
        assert_eq!(after_second.quality_metrics, Some(metrics(8.0)));
        assert_eq!(after_second.quality_tests.len(), 2);
    }

    #[test]
    fn latest_test_decides_quality_status() {
        let batch = apply_quality_test(harvested_batch(), test_record(8.0, TestStatus::Pass));
        assert_eq!(batch.quality_status, QualityStatus::Passed);
        let batch = apply_quality_test(batch, test_record(20.0, TestStatus::Fail));
        assert_eq!(batch.quality_status, QualityStatus::Failed);
    }

    #[test]
    fn processing_relabels_status() {
        let step = ProcessingStepRecord {
            processing_type: "drying".into(),
            processor_id: "MFG-1".into(),
            date: Timestamp::parse("2024-01-10").unwrap(),
            conditions: ProcessingConditions::default(),
            equipment: None,
            input_metrics: serde_json::Value::Null,
            output_metrics: serde_json::Value::Null,
            validation: ProcessingCheck {
                valid: true,
                violations: Vec::new(),
            },
            status: "completed".into(),
            recorded_at: Timestamp::parse("2024-01-10").unwrap(),
        };
        let batch = apply_processing_step(harvested_batch(), step);
        assert_eq!(batch.status, "processed_drying");
        assert_eq!(batch.processing_steps.len(), 1);
    }

    #[test]
    fn transfer_hands_over_custody() {
        let transfer = TransferRecord {
            from_id: "FARM-1".into(),
            to_id: "MFG-1".into(),
            reason: "sale".into(),
            location: None,
            recorded_at: Timestamp::parse("2024-01-12").unwrap(),
        };
        let batch = apply_transfer(harvested_batch(), transfer);
        assert_eq!(batch.current_owner, "MFG-1");
        assert_eq!(batch.status, "transferred");
        assert_eq!(batch.transfer_history[0].from_id, "FARM-1");
    }

    #[test]
    fn batch_document_uses_camel_case_fields() {
        let json = serde_json::to_value(harvested_batch()).unwrap();
        assert_eq!(json["docType"], "herbBatch");
        assert!(json["herbName"].is_string());
        assert!(json["qualityStatus"].is_string());
        assert!(json["validationResults"]["sustainability"]["score"].is_number());
        assert!(json["gpsCoordinates"]["latitude"].is_number());
    }
}
