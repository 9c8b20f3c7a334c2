//! # Participant Onboarding
//!
//! Farmers, laboratories and manufacturers are onboarded once by their
//! overseeing organization and never mutated afterwards. Each participant
//! document embeds its creation provenance.

use herbtrace_core::{Error, ParticipantId, Result, Role};
use herbtrace_ledger::{LedgerState, TransactionContext};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{authorize, resolve_context, ORG_LAB_COUNCIL, ORG_REGULATOR};
use crate::batch::GpsCoordinates;
use crate::provenance::{self, ActivityCode, ProvenanceRecord, Reference};

/// A herb collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    /// Always `"farmer"`.
    pub doc_type: String,
    pub id: ParticipantId,
    pub name: String,
    pub farm_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<GpsCoordinates>,
    pub contact: String,
    /// Organic/fair-trade style certifications held by the farm.
    #[serde(default)]
    pub certifications: Vec<String>,
    pub provenance: Vec<ProvenanceRecord>,
}

/// A testing laboratory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    /// Always `"laboratory"`.
    pub doc_type: String,
    pub id: ParticipantId,
    pub name: String,
    pub location: String,
    pub contact: String,
    /// Accreditation reference (e.g. NABL certificate number).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accreditation: Option<String>,
    pub provenance: Vec<ProvenanceRecord>,
}

/// A medicine manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    /// Always `"manufacturer"`.
    pub doc_type: String,
    pub id: ParticipantId,
    pub name: String,
    pub location: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    pub provenance: Vec<ProvenanceRecord>,
}

/// Arguments for `onboardFarmer`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardFarmerArgs {
    pub farmer_id: ParticipantId,
    pub name: String,
    pub farm_location: String,
    #[serde(default)]
    pub gps_coordinates: Option<GpsCoordinates>,
    pub contact: String,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Arguments for `onboardLaboratory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardLaboratoryArgs {
    pub lab_id: ParticipantId,
    pub name: String,
    pub location: String,
    pub contact: String,
    #[serde(default)]
    pub accreditation: Option<String>,
}

/// Arguments for `onboardManufacturer`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardManufacturerArgs {
    pub manufacturer_id: ParticipantId,
    pub name: String,
    pub location: String,
    pub contact: String,
    #[serde(default)]
    pub license_number: Option<String>,
}

fn probe_absent<S: LedgerState>(ctx: &TransactionContext<'_, S>, id: &ParticipantId) -> Result<()> {
    if id.is_empty() {
        return Err(Error::MalformedArgument("participant id must not be empty".into()));
    }
    if ctx.state.get(id.as_str())?.is_some() {
        return Err(Error::AlreadyExists(format!("participant {id}")));
    }
    Ok(())
}

/// Onboard a farmer. Regulator at the regulatory authority only.
pub fn onboard_farmer<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: OnboardFarmerArgs,
) -> Result<Farmer> {
    let context = resolve_context(&ctx.caller)?;
    authorize(&context, "onboardFarmer", &[(Role::Regulator, Some(ORG_REGULATOR))])?;
    probe_absent(ctx, &args.farmer_id)?;

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::OnboardFarmer,
        vec![Reference::to("Farmer", args.farmer_id.as_str())],
        "participant onboarding",
        ctx.tx_timestamp,
    );
    let farmer = Farmer {
        doc_type: "farmer".to_string(),
        id: args.farmer_id,
        name: args.name,
        farm_location: args.farm_location,
        gps_coordinates: args.gps_coordinates,
        contact: args.contact,
        certifications: args.certifications,
        provenance: vec![record],
    };
    ctx.state.put(farmer.id.as_str(), serde_json::to_vec(&farmer)?)?;
    info!(farmer = %farmer.id, "farmer onboarded");
    Ok(farmer)
}

/// Onboard a laboratory. Lab overseer at the laboratory council only.
pub fn onboard_laboratory<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: OnboardLaboratoryArgs,
) -> Result<Laboratory> {
    let context = resolve_context(&ctx.caller)?;
    authorize(
        &context,
        "onboardLaboratory",
        &[(Role::LabOverseer, Some(ORG_LAB_COUNCIL))],
    )?;
    probe_absent(ctx, &args.lab_id)?;

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::OnboardLaboratory,
        vec![Reference::to("Laboratory", args.lab_id.as_str())],
        "participant onboarding",
        ctx.tx_timestamp,
    );
    let lab = Laboratory {
        doc_type: "laboratory".to_string(),
        id: args.lab_id,
        name: args.name,
        location: args.location,
        contact: args.contact,
        accreditation: args.accreditation,
        provenance: vec![record],
    };
    ctx.state.put(lab.id.as_str(), serde_json::to_vec(&lab)?)?;
    info!(laboratory = %lab.id, "laboratory onboarded");
    Ok(lab)
}

/// Onboard a manufacturer. Regulator at the regulatory authority only.
pub fn onboard_manufacturer<S: LedgerState>(
    ctx: &mut TransactionContext<'_, S>,
    args: OnboardManufacturerArgs,
) -> Result<Manufacturer> {
    let context = resolve_context(&ctx.caller)?;
    authorize(
        &context,
        "onboardManufacturer",
        &[(Role::Regulator, Some(ORG_REGULATOR))],
    )?;
    probe_absent(ctx, &args.manufacturer_id)?;

    let record = provenance::build(
        ctx,
        &context,
        ActivityCode::OnboardManufacturer,
        vec![Reference::to("Manufacturer", args.manufacturer_id.as_str())],
        "participant onboarding",
        ctx.tx_timestamp,
    );
    let manufacturer = Manufacturer {
        doc_type: "manufacturer".to_string(),
        id: args.manufacturer_id,
        name: args.name,
        location: args.location,
        contact: args.contact,
        license_number: args.license_number,
        provenance: vec![record],
    };
    ctx.state
        .put(manufacturer.id.as_str(), serde_json::to_vec(&manufacturer)?)?;
    info!(manufacturer = %manufacturer.id, "manufacturer onboarded");
    Ok(manufacturer)
}
