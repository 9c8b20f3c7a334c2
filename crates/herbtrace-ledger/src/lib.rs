//! # herbtrace-ledger — Ledger Platform Contract
//!
//! The asset state machine runs on top of a transactional, versioned
//! key-value store operated by an external ledger platform. This crate
//! defines the seam: the [`LedgerState`] trait (whole-document get/put,
//! ordered range scans, per-key history), the platform-supplied
//! [`CallerIdentity`], and the [`TransactionContext`] that bundles state
//! access with the transaction's id and timestamp.
//!
//! ## Concurrency Model
//!
//! Ordering across transactions belongs to the platform (total-order
//! broadcast plus per-key optimistic concurrency). Nothing in this crate —
//! or above it — retries, locks, or coordinates; every operation is a
//! synchronous read-compute-write against the state handed to it.
//!
//! [`MemoryLedger`] is a single-threaded stand-in used by tests and the CLI.
//! It makes no concurrency claims.

pub mod context;
pub mod memory;
pub mod store;

pub use context::{CallerIdentity, TransactionContext, ATTR_ROLE, ATTR_SUBJECT_ID};
pub use memory::MemoryLedger;
pub use store::{HistoryEntry, LedgerState};
