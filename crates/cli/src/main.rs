//! Catalog migration CLI - one-shot fetch/normalize/submit runs.
//!
//! # Usage
//!
//! ```bash
//! # Run the migration once
//! catalog-migrate run
//!
//! # Verify configuration without touching the network
//! catalog-migrate check-config
//! ```
//!
//! Configuration comes from the environment (see `MigrateConfig`); logging
//! is controlled via `RUST_LOG`.
//!
//! Exit codes: 0 on success, 1 on a run failure, 2 when the import API
//! rejected the batch.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI reports to stdout by design.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalog_migrate::{MigrateConfig, MigrateError, MigrationReport, run_migration};

#[derive(Parser)]
#[command(name = "catalog-migrate")]
#[command(author, version, about = "Catalog migration pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, normalize, and submit the catalog once
    Run,
    /// Load and print the (redacted) configuration
    CheckConfig,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32, MigrateError> {
    match cli.command {
        Commands::Run => {
            let config = MigrateConfig::from_env()?;
            let report = run_migration(&config).await?;
            print_report(&report);
            Ok(if report.submission.is_rejected() { 2 } else { 0 })
        }
        Commands::CheckConfig => {
            let config = MigrateConfig::from_env()?;
            println!("{config:#?}");
            Ok(0)
        }
    }
}

fn print_report(report: &MigrationReport) {
    println!("fetched:         {}", report.fetched);
    println!("normalized:      {}", report.normalized);
    println!("skipped:         {}", report.skipped.len());
    println!("detail failures: {}", report.detail_failures);
    for skip in &report.skipped {
        println!(
            "  - {}: {}",
            skip.product_id.as_deref().unwrap_or("<no id>"),
            skip.reason
        );
    }
    if report.submission.is_noop() {
        println!("submission:      skipped (no products to submit)");
    } else {
        println!(
            "submission:      HTTP {} ({} products)",
            report.submission.status.unwrap_or_default(),
            report.submission.submitted
        );
        println!("{}", serde_json::to_string_pretty(&report.submission.body).unwrap_or_default());
    }
}
