//! # herbtrace-core — Foundational Types for herbtrace
//!
//! This crate is the bedrock of the herbtrace supply-chain ledger. It defines
//! the primitives every other crate builds on: identifier newtypes, caller
//! roles and resolved caller contexts, UTC-only timestamps, and the error
//! taxonomy shared by the rule engine and the asset state machine.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `BatchId`, `MedicineId`,
//!    `ParticipantId`, `OrgId` — you cannot pass a medicine key where a batch
//!    key is expected. No bare strings for identifiers at API boundaries.
//!
//! 2. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision, so the same instant always serializes to the same
//!    bytes inside a persisted document.
//!
//! 3. **One error taxonomy.** Every failure an operation can surface is a
//!    variant of [`Error`]; there is no second ad-hoc error channel.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `herbtrace-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize` where they appear in persisted documents.

pub mod context;
pub mod error;
pub mod identity;
pub mod temporal;

pub use context::{CallerContext, Role};
pub use error::{Error, Result, ValidationKind};
pub use identity::{BatchId, MedicineId, OrgId, ParticipantId};
pub use temporal::Timestamp;
