//! # Ledger Snapshot Persistence
//!
//! The CLI keeps the whole ledger in one JSON file between invocations. A
//! missing file is an empty ledger; writes go through a temp file in the
//! same directory so a crash never leaves a half-written snapshot.

use std::fs;
use std::path::Path;

use anyhow::Context;
use herbtrace_ledger::MemoryLedger;

/// Load a snapshot, treating a missing file as an empty ledger.
pub fn load(path: &Path) -> anyhow::Result<MemoryLedger> {
    if !path.exists() {
        return Ok(MemoryLedger::new());
    }
    let bytes = fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("decoding snapshot {}", path.display()))
}

/// Persist a snapshot atomically (write temp file, then rename).
pub fn save(path: &Path, ledger: &MemoryLedger) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(ledger).context("encoding snapshot")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing snapshot {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing snapshot {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbtrace_ledger::LedgerState;

    #[test]
    fn missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = load(&dir.path().join("absent.json")).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut ledger = MemoryLedger::new();
        ledger.put("k", b"{\"a\":1}".to_vec()).unwrap();
        save(&path, &ledger).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.get("k").unwrap().unwrap(), b"{\"a\":1}");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, b"not json").unwrap();
        assert!(load(&path).is_err());
    }
}
