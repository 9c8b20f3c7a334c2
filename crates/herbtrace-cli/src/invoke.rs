//! # Invoke Subcommand
//!
//! Applies one mutating operation to the snapshot. The CLI mints the
//! transaction id and timestamp the platform would otherwise supply; the
//! snapshot is only rewritten when the operation succeeds.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::identity::CallerFlags;
use crate::snapshot;

/// Arguments for the invoke subcommand.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Ledger snapshot file.
    #[arg(long, default_value = "ledger.json")]
    pub ledger: PathBuf,

    #[command(flatten)]
    pub caller: CallerFlags,

    /// Operation name (e.g. `createHerbBatch`, `transferBatch`).
    pub operation: String,

    /// JSON argument object for the operation.
    #[arg(default_value = "{}")]
    pub payload: String,
}

/// Run the operation and persist the updated snapshot. Returns the
/// operation's JSON result, pretty-printed.
pub fn run(args: &InvokeArgs) -> anyhow::Result<String> {
    let mut ledger = snapshot::load(&args.ledger)?;
    let mut ctx = ledger.begin(args.caller.identity());
    debug!(operation = %args.operation, tx = %ctx.tx_id, "invoking");
    let out = herbtrace_contract::dispatch(&mut ctx, &args.operation, &args.payload)?;
    snapshot::save(&args.ledger, &ledger)?;
    pretty(&out)
}

pub(crate) fn pretty(json: &str) -> anyhow::Result<String> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regulator_flags(ledger: PathBuf) -> InvokeArgs {
        InvokeArgs {
            ledger,
            caller: CallerFlags {
                org: "herbal-authority".into(),
                name: "admin".into(),
                role: None,
                subject: None,
            },
            operation: "onboardFarmer".into(),
            payload: r#"{"farmerId":"FARM-1","name":"Ravi","farmLocation":"Dehradun","contact":"r@x"}"#
                .into(),
        }
    }

    #[test]
    fn successful_invoke_persists_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let out = run(&regulator_flags(path.clone())).unwrap();
        assert!(out.contains("\"docType\": \"farmer\""));

        let ledger = snapshot::load(&path).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn failed_invoke_leaves_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut args = regulator_flags(path.clone());
        args.caller.org = "somewhere-else".into(); // no delegated admin there
        assert!(run(&args).is_err());
        assert!(!path.exists());
    }
}
