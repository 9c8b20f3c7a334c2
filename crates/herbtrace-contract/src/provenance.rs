//! # Provenance Records
//!
//! Every mutation attaches one append-only audit record describing who did
//! what, when, to which asset, and why. The persisted field names
//! (`resourceType`, `target`, `occurredDateTime`, `recorded`, `why`,
//! `activity.coding`, `agent[].type`/`who`, `entity[].role`/`what`) are
//! load-bearing: existing stored documents use them, and any reimplementation
//! must keep them byte-compatible.
//!
//! Records are deterministic given the caller context, the activity, and the
//! platform transaction id and timestamp — no wall clock, no randomness —
//! so re-execution on another node produces identical documents.

use herbtrace_core::{CallerContext, Timestamp};
use herbtrace_ledger::{LedgerState, TransactionContext};
use serde::{Deserialize, Serialize};

/// The activity a provenance record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCode {
    OnboardFarmer,
    OnboardLaboratory,
    OnboardManufacturer,
    /// Herb batch collected in the field.
    Harvest,
    QualityTest,
    Processing,
    Transfer,
    /// Medicine assembled from batches.
    Manufacture,
}

impl ActivityCode {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OnboardFarmer => "onboard-farmer",
            Self::OnboardLaboratory => "onboard-laboratory",
            Self::OnboardManufacturer => "onboard-manufacturer",
            Self::Harvest => "harvest",
            Self::QualityTest => "quality-test",
            Self::Processing => "processing",
            Self::Transfer => "transfer",
            Self::Manufacture => "manufacture",
        }
    }

    /// Human-readable display label.
    pub fn display(&self) -> &'static str {
        match self {
            Self::OnboardFarmer => "Farmer Onboarding",
            Self::OnboardLaboratory => "Laboratory Onboarding",
            Self::OnboardManufacturer => "Manufacturer Onboarding",
            Self::Harvest => "Herb Collection",
            Self::QualityTest => "Quality Testing",
            Self::Processing => "Processing",
            Self::Transfer => "Custody Transfer",
            Self::Manufacture => "Medicine Manufacturing",
        }
    }
}

/// A reference to an asset or agent, e.g. `HerbBatch/BATCH-001`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    /// Build a `Kind/id` reference.
    pub fn to(kind: &str, id: &str) -> Self {
        Self {
            reference: format!("{kind}/{id}"),
        }
    }
}

/// Coded description of the recorded activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub coding: Vec<Coding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    pub code: String,
    pub display: String,
}

/// The principal that performed the activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// The role the agent acted under.
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Reference to the agent's identity (`organization/subject`).
    pub who: Reference,
}

/// How a referenced entity relates to the activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityRole {
    /// The entity was consumed as an input (e.g. batches of a medicine).
    Source,
    /// The entity is a prior version revised by this activity.
    Revision,
}

/// An input or revised entity of the activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEntity {
    pub role: EntityRole,
    pub what: Reference,
}

/// The append-only audit record embedded in every asset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceRecord {
    /// Always `"Provenance"`.
    pub resource_type: String,
    /// `prov-{transaction id}` — unique per mutation.
    pub id: String,
    /// The asset(s) this record describes.
    pub target: Vec<Reference>,
    /// When the recorded activity happened in the world.
    pub occurred_date_time: Timestamp,
    /// When the platform committed the record.
    pub recorded: Timestamp,
    /// Caller-supplied reason for the activity.
    pub why: String,
    pub activity: Activity,
    pub agent: Vec<Agent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity: Vec<ProvenanceEntity>,
}

/// Build the provenance record for one mutation.
///
/// `occurred` is the domain-time of the activity (harvest date, test date);
/// `recorded` comes from the platform transaction timestamp. Called exactly
/// once per target by every mutating transition.
pub fn build<S: LedgerState>(
    ctx: &TransactionContext<'_, S>,
    context: &CallerContext,
    activity: ActivityCode,
    targets: Vec<Reference>,
    why: &str,
    occurred: Timestamp,
) -> ProvenanceRecord {
    ProvenanceRecord {
        resource_type: "Provenance".to_string(),
        id: format!("prov-{}", ctx.tx_id),
        target: targets,
        occurred_date_time: occurred,
        recorded: ctx.tx_timestamp,
        why: why.to_string(),
        activity: Activity {
            coding: vec![Coding {
                code: activity.code().to_string(),
                display: activity.display().to_string(),
            }],
        },
        agent: vec![Agent {
            agent_type: context.role.as_str().to_string(),
            who: Reference::to(context.organization_id.as_str(), &context.subject_id),
        }],
        entity: Vec::new(),
    }
}

impl ProvenanceRecord {
    /// Attach source/revision entity references.
    pub fn with_entities(mut self, entities: Vec<ProvenanceEntity>) -> Self {
        self.entity = entities;
        self
    }
}
