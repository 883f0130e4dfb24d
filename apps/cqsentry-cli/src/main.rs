//! cqsentry CLI
//!
//! Runs a battery of security checks against a CMS deployment's author,
//! publish and dispatcher endpoints.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// cqsentry - a security scanner for author/publish/dispatcher deployments
#[derive(Parser)]
#[command(name = "cqsentry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the security check battery
    Scan(commands::scan::ScanArgs),

    /// List registered checks and their required connectivity
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    match cli.command {
        Commands::Scan(args) => commands::scan::run(args, &cli.format),
        Commands::List => commands::list::run(),
    }
}
