//! # Status Subcommand
//!
//! One-line-per-document summary of a snapshot, for eyeballing state
//! between invocations.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use herbtrace_ledger::LedgerState;

use crate::snapshot;

/// Arguments for the status subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Ledger snapshot file.
    #[arg(long, default_value = "ledger.json")]
    pub ledger: PathBuf,
}

/// Summarize the snapshot: document count, then one `key  docType` line per
/// document in key order.
pub fn run(args: &StatusArgs) -> anyhow::Result<String> {
    let ledger = snapshot::load(&args.ledger)?;
    let mut out = format!("{} document(s)\n", ledger.len());
    for (key, bytes) in ledger.range_scan("", "")? {
        let doc_type = serde_json::from_slice::<serde_json::Value>(&bytes)
            .ok()
            .and_then(|v| v.get("docType").and_then(|t| t.as_str()).map(String::from))
            .unwrap_or_else(|| "?".to_string());
        writeln!(out, "{key}  {doc_type}")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbtrace_ledger::MemoryLedger;

    #[test]
    fn lists_documents_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut ledger = MemoryLedger::new();
        ledger.put("b", br#"{"docType":"medicine"}"#.to_vec()).unwrap();
        ledger.put("a", br#"{"docType":"herbBatch"}"#.to_vec()).unwrap();
        snapshot::save(&path, &ledger).unwrap();

        let out = run(&StatusArgs { ledger: path }).unwrap();
        assert_eq!(out, "2 document(s)\na  herbBatch\nb  medicine\n");
    }

    #[test]
    fn empty_snapshot_reports_zero() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(&StatusArgs {
            ledger: dir.path().join("none.json"),
        })
        .unwrap();
        assert_eq!(out, "0 document(s)\n");
    }
}
