//! CLI entry point for the SLCSP resolver.
//!
//! Reads the ZIP-to-rate-area table, the plans table, and the target ZIP
//! list, then writes the second lowest cost silver plan rate for each target.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use slcsp::output::{print_records, write_records};
use slcsp::pipeline;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slcsp")]
#[command(about = "Determine the second lowest cost silver plan for a set of ZIP codes", long_about = None)]
struct Cli {
    /// CSV mapping ZIP codes to rate areas
    #[arg(long, default_value = "zips.csv")]
    zips: PathBuf,

    /// CSV of health plans with metal level and rate
    #[arg(long, default_value = "plans.csv")]
    plans: PathBuf,

    /// CSV of target ZIP codes to resolve
    #[arg(long, default_value = "slcsp.csv")]
    targets: PathBuf,

    /// CSV file to write resolved rates to. Pass the targets path here to
    /// overwrite the target list in place, as the legacy tooling did.
    #[arg(short, long, default_value = "slcsp_rates.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the resolved CSV rows.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let records = pipeline::run(&cli.zips, &cli.plans, &cli.targets)?;
    write_records(&cli.output, &records)?;
    print_records(&records);

    Ok(())
}
