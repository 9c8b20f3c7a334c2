//! # Query Subcommand
//!
//! Runs one read-only operation against the snapshot. Queries go through
//! the same dispatch surface as mutations but the snapshot is never written
//! back, so a query can always be re-run against unchanged state.

use std::path::PathBuf;

use clap::Args;

use crate::identity::CallerFlags;
use crate::invoke::pretty;
use crate::snapshot;

/// Arguments for the query subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Ledger snapshot file.
    #[arg(long, default_value = "ledger.json")]
    pub ledger: PathBuf,

    #[command(flatten)]
    pub caller: CallerFlags,

    /// Operation name (e.g. `getConsumerInfo`, `trackSupplyChain`).
    pub operation: String,

    /// JSON argument object for the operation.
    #[arg(default_value = "{}")]
    pub payload: String,
}

/// Run the query. The snapshot file is left untouched.
pub fn run(args: &QueryArgs) -> anyhow::Result<String> {
    let mut ledger = snapshot::load(&args.ledger)?;
    let mut ctx = ledger.begin(args.caller.identity());
    let out = herbtrace_contract::dispatch(&mut ctx, &args.operation, &args.payload)?;
    pretty(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::{self, InvokeArgs};

    #[test]
    fn query_reads_what_invoke_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        invoke::run(&InvokeArgs {
            ledger: path.clone(),
            caller: CallerFlags {
                org: "herbal-authority".into(),
                name: "admin".into(),
                role: None,
                subject: None,
            },
            operation: "onboardFarmer".into(),
            payload: r#"{"farmerId":"FARM-1","name":"Ravi","farmLocation":"Dehradun","contact":"r@x"}"#
                .into(),
        })
        .unwrap();

        let out = run(&QueryArgs {
            ledger: path,
            caller: CallerFlags {
                org: "herbal-authority".into(),
                name: "admin".into(),
                role: None,
                subject: None,
            },
            operation: "getAssetHistory".into(),
            payload: r#"{"assetId":"FARM-1"}"#.into(),
        })
        .unwrap();
        assert!(out.contains("\"isDelete\": false"));
    }
}
