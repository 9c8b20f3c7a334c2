//! # herbtrace-cli — Supply Chain Command-Line Interface
//!
//! Runs lifecycle operations and lineage queries against a JSON snapshot of
//! the in-memory ledger. On a real deployment the ledger platform supplies
//! identity, transaction ids and storage; here the CLI plays that role so
//! the whole contract can be exercised from a shell.
//!
//! ## Subcommands
//!
//! - `invoke` — Apply one mutating operation and persist the snapshot
//! - `query` — Run one read-only operation; the snapshot is left untouched
//! - `status` — Summarize the snapshot (document count and keys)
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers delegate to the contract crate — no lifecycle logic here.

pub mod identity;
pub mod invoke;
pub mod query;
pub mod snapshot;
pub mod status;
