//! ccrecap - Claude Code usage recap CLI
//!
//! Reads the local Claude Code data directory and prints one
//! normalized JSON statistics report to stdout. The report is raw,
//! uninterpreted data meant for downstream analysis.

use anyhow::{Context, Result};
use ccrecap_core::analytics::{Report, ReportOptions};
use ccrecap_core::{Config, Loader};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ccrecap")]
#[command(about = "Claude Code usage recap - raw statistics report")]
#[command(version)]
struct Args {
    /// Data directory to read (default: ~/.claude, or config override)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of sample prompts to include
    #[arg(long)]
    samples: Option<usize>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = ccrecap_core::logging::init(&config.logging).ok();

    let data_dir = args
        .data_dir
        .unwrap_or_else(|| config.resolved_data_dir());
    tracing::info!(data_dir = %data_dir.display(), "Generating recap");

    let data = Loader::with_root(data_dir).load();

    if data.is_unusable() {
        let error = serde_json::json!({
            "error": "No Claude Code data found.",
            "hint": "Make sure you've used Claude Code (v2.0.64+) and run /stats at least once.",
        });
        println!("{}", serde_json::to_string_pretty(&error)?);
        return Ok(ExitCode::from(1));
    }

    let options = ReportOptions {
        sample_prompts: args.samples.unwrap_or(config.report.sample_prompts),
    };
    let report = Report::build(&data, &options, Local::now());

    let rendered = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", rendered);

    Ok(ExitCode::SUCCESS)
}
