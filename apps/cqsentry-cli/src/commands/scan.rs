//! Scan command

use clap::Args;
use cqsentry_checks::registry;
use cqsentry_engine::{format_json, format_text, ScanRunner};
use std::path::PathBuf;

#[derive(Args)]
pub struct ScanArgs {
    /// Author instance URL
    #[arg(long, default_value = "http://localhost:4502")]
    author_url: String,

    /// Publish instance URL
    #[arg(long, default_value = "")]
    publish_url: String,

    /// Dispatcher instance URL
    #[arg(long, default_value = "")]
    dispatcher_url: String,

    /// Checks to run (default: all registered checks, in registration order)
    #[arg(long, value_delimiter = ',')]
    checks: Vec<String>,

    /// Directory with per-check YAML configuration overrides
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

pub fn run(args: ScanArgs, format: &str) -> anyhow::Result<()> {
    let names: Vec<String> = if args.checks.is_empty() {
        registry::all_names().iter().map(|s| s.to_string()).collect()
    } else {
        args.checks
    };

    let mut runner = ScanRunner::new(&args.author_url, &args.publish_url, &args.dispatcher_url);
    if let Some(dir) = args.config_dir {
        runner = runner.with_config_dir(dir);
    }

    let report = match runner.run(&names) {
        Ok(report) => report,
        Err(e) => {
            // the scan could not be carried out at all - not a verdict
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    match format {
        "json" => {
            let json = format_json(&report, true)?;
            println!("{json}");
        }
        _ => {
            let text = format_text(&report);
            println!("{text}");
        }
    }

    // Exit non-zero when checks found vulnerabilities
    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
