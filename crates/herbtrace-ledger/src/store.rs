//! # Keyed Document Store Trait
//!
//! The contract the ledger platform provides to the state machine: keyed
//! whole-document reads and writes, ordered range scans, and a per-key
//! history log of every committed version.

use herbtrace_core::{Error, Timestamp};
use serde::{Deserialize, Serialize};

/// One committed version of a key, as yielded by the platform's per-key
/// history log. The log is ordered, finite, and forward-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The transaction that committed this version.
    pub tx_id: String,
    /// The platform timestamp of that transaction.
    pub timestamp: Timestamp,
    /// True when this version deleted the key.
    pub is_delete: bool,
    /// The document bytes at this version; absent for deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<u8>>,
}

/// The keyed document store a ledger platform exposes to the state machine.
///
/// Documents are opaque byte strings (JSON in practice) keyed by business
/// identifier. There is no partial-field update: every mutation rewrites the
/// whole document through [`LedgerState::put`], which is the unit the
/// platform's per-key version check protects.
pub trait LedgerState {
    /// Fetch the current document at `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Write the whole document at `key` as a single atomic key update.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), Error>;

    /// Iterate `(key, document)` pairs in key order over `[start, end)`.
    /// An empty bound means unbounded on that side; two empty bounds scan
    /// the full keyspace.
    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + 'a>, Error>;

    /// Iterate every committed version of `key`, oldest first. The iterator
    /// is forward-only and non-restartable; callers get one pass.
    fn history<'a>(&'a self, key: &str) -> Result<Box<dyn Iterator<Item = HistoryEntry> + 'a>, Error>;
}
