//! # In-Memory Ledger
//!
//! A single-threaded [`LedgerState`] used by tests and the CLI, where no
//! ledger platform exists to play that role. Documents live in a `BTreeMap`
//! (giving ordered range scans for free) and every `put` appends to a
//! per-key history vector, mimicking the platform's version log.
//!
//! The whole ledger serializes to JSON so the CLI can persist it as a
//! snapshot file between invocations.

use std::collections::BTreeMap;

use herbtrace_core::{Error, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::{CallerIdentity, TransactionContext};
use crate::store::{HistoryEntry, LedgerState};

/// In-memory keyed document store with per-key history.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    docs: BTreeMap<String, Vec<u8>>,
    history: BTreeMap<String, Vec<HistoryEntry>>,
    #[serde(skip)]
    current_tx: Option<(String, Timestamp)>,
}

impl MemoryLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transaction for `caller`, generating a fresh transaction id
    /// and stamping it with the current time — the two things a real
    /// platform would supply.
    pub fn begin(&mut self, caller: CallerIdentity) -> TransactionContext<'_, Self> {
        let tx_id = Uuid::new_v4().to_string();
        let ts = Timestamp::now();
        self.current_tx = Some((tx_id.clone(), ts));
        TransactionContext::new(self, caller, tx_id, ts)
    }

    /// Begin a transaction with a caller-chosen id and timestamp. Tests use
    /// this to make document contents fully deterministic.
    pub fn begin_at(
        &mut self,
        caller: CallerIdentity,
        tx_id: impl Into<String>,
        tx_timestamp: Timestamp,
    ) -> TransactionContext<'_, Self> {
        let tx_id = tx_id.into();
        self.current_tx = Some((tx_id.clone(), tx_timestamp));
        TransactionContext::new(self, caller, tx_id, tx_timestamp)
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the ledger holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn tx_parts(&self) -> (String, Timestamp) {
        match &self.current_tx {
            Some((id, ts)) => (id.clone(), *ts),
            // Writes outside a transaction only happen in test fixtures.
            None => ("genesis".to_string(), Timestamp::now()),
        }
    }
}

impl LedgerState for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.docs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), Error> {
        let (tx_id, timestamp) = self.tx_parts();
        self.docs.insert(key.to_string(), value.clone());
        self.history.entry(key.to_string()).or_default().push(HistoryEntry {
            tx_id,
            timestamp,
            is_delete: false,
            value: Some(value),
        });
        Ok(())
    }

    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + 'a>, Error> {
        use std::ops::Bound;
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };
        Ok(Box::new(
            self.docs
                .range((lower, upper))
                .map(|(k, v)| (k.clone(), v.clone())),
        ))
    }

    fn history<'a>(&'a self, key: &str) -> Result<Box<dyn Iterator<Item = HistoryEntry> + 'a>, Error> {
        match self.history.get(key) {
            Some(entries) => Ok(Box::new(entries.iter().cloned())),
            None => Ok(Box::new(std::iter::empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_absent_key_is_none() {
        let ledger = MemoryLedger::new();
        assert!(ledger.get("nope").unwrap().is_none());
    }

    #[test]
    fn put_then_get_roundtrips() {
        let mut ledger = MemoryLedger::new();
        ledger.put("k", b"v".to_vec()).unwrap();
        assert_eq!(ledger.get("k").unwrap().unwrap(), b"v");
    }

    #[test]
    fn range_scan_is_ordered_and_bounded() {
        let mut ledger = MemoryLedger::new();
        for key in ["c", "a", "b", "d"] {
            ledger.put(key, key.as_bytes().to_vec()).unwrap();
        }
        let keys: Vec<String> = ledger
            .range_scan("b", "d")
            .unwrap()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["b", "c"]);

        let all: Vec<String> = ledger.range_scan("", "").unwrap().map(|(k, _)| k).collect();
        assert_eq!(all, ["a", "b", "c", "d"]);
    }

    #[test]
    fn history_records_every_version_oldest_first() {
        let mut ledger = MemoryLedger::new();
        let caller = CallerIdentity::bare("org", "tester");
        {
            let ctx = ledger.begin_at(caller.clone(), "tx-1", Timestamp::parse("2024-01-01").unwrap());
            ctx.state.put("k", b"v1".to_vec()).unwrap();
        }
        {
            let ctx = ledger.begin_at(caller, "tx-2", Timestamp::parse("2024-01-02").unwrap());
            ctx.state.put("k", b"v2".to_vec()).unwrap();
        }
        let entries: Vec<HistoryEntry> = ledger.history("k").unwrap().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tx_id, "tx-1");
        assert_eq!(entries[1].tx_id, "tx-2");
        assert_eq!(entries[1].value.as_deref(), Some(b"v2".as_slice()));
        assert!(!entries[0].is_delete);
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let mut ledger = MemoryLedger::new();
        ledger.put("k", b"{\"a\":1}".to_vec()).unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let restored: MemoryLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get("k").unwrap().unwrap(), b"{\"a\":1}");
        assert_eq!(restored.history("k").unwrap().count(), 1);
    }
}
