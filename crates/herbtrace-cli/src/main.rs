//! # herbtrace CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// herbtrace CLI — herbal supply chain provenance toolchain.
///
/// Applies lifecycle operations (onboarding, batch creation, quality tests,
/// processing, transfers, medicine assembly) and lineage queries against a
/// JSON ledger snapshot.
#[derive(Parser, Debug)]
#[command(name = "herbtrace", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Apply one mutating operation and persist the snapshot.
    Invoke(herbtrace_cli::invoke::InvokeArgs),
    /// Run one read-only operation; the snapshot stays untouched.
    Query(herbtrace_cli::query::QueryArgs),
    /// Summarize the snapshot.
    Status(herbtrace_cli::status::StatusArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Invoke(args) => herbtrace_cli::invoke::run(&args)?,
        Commands::Query(args) => herbtrace_cli::query::run(&args)?,
        Commands::Status(args) => herbtrace_cli::status::run(&args)?,
    };
    println!("{output}");

    Ok(())
}
