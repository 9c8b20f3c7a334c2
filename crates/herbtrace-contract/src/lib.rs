//! # herbtrace-contract — Asset Lifecycle and Provenance Engine
//!
//! The mutating core of herbtrace. Every exposed operation follows the same
//! shape: resolve the caller's context from platform identity attributes,
//! authorize against the operation's role matrix, load the current document
//! (or probe for its absence), run the relevant domain validators, compute
//! the complete next document, and write it back as a single key update.
//! Each mutation attaches exactly one provenance record per target.
//!
//! ## Module Map
//!
//! - [`auth`] — caller-context resolver (with delegated-admin fallback) and
//!   the authorization matrix helpers.
//! - [`provenance`] — the append-only audit record and its builder.
//! - [`participant`] — farmer / laboratory / manufacturer onboarding.
//! - [`batch`] — herb-batch lifecycle: creation, quality tests, processing
//!   steps, transfers.
//! - [`medicine`] — medicine assembly from existing batches.
//! - [`query`] — read-side lineage reconstruction (consumer view, supply
//!   chain tracking, per-key history, scans).
//! - [`invoke`] — the JSON dispatch surface: one operation name plus one
//!   JSON argument object in, one JSON document out.
//!
//! ## Failure Semantics
//!
//! Any validator failure, missing referenced key, authorization mismatch,
//! or malformed argument aborts the entire invocation before the write. The
//! platform's single-key atomic `put` guarantees no partial document is
//! ever visible.

pub mod auth;
pub mod batch;
pub mod invoke;
pub mod medicine;
pub mod participant;
pub mod provenance;
pub mod query;

pub use auth::resolve_context;
pub use batch::{
    add_processing_step, add_quality_test, create_herb_batch, transfer_batch, HerbBatch,
};
pub use invoke::dispatch;
pub use medicine::{create_medicine, Medicine};
pub use participant::{onboard_farmer, onboard_laboratory, onboard_manufacturer};
pub use provenance::{ActivityCode, ProvenanceRecord};
pub use query::{asset_history, batches_by_farmer, consumer_info, fetch_ledger, track_supply_chain};
