//! Memcheck CLI
//!
//! Runs the full check battery over a memory store and prints a per-check
//! report. Exit code 0 if every check passed (or skipped), 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use memcheck::checks;
use memcheck::config::{resolve_paths, DEFAULT_MEMORY_DIR};
use memcheck::report::print_report;
use memcheck::store::StoreSnapshot;

const VERSION: &str = "0.1.0";

/// Memcheck -- Memory Store Integrity Validator
#[derive(Parser, Debug)]
#[command(
    name = "memcheck",
    version = VERSION,
    about = "Validates a Markdown memory store (index, dossiers, observation logs)"
)]
struct Cli {
    /// Store base directory (default: from config, else ~/.claude/memory)
    #[arg(long)]
    memory_path: Option<String>,

    /// Config file path (default: <memory-path>/memory-config.json)
    #[arg(long)]
    config: Option<String>,

    /// Enable debug diagnostics
    #[arg(long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<bool> {
    let (paths, config) = resolve_paths(cli.memory_path.as_deref(), cli.config.as_deref());

    let now = chrono::Utc::now().to_rfc3339();
    println!(
        "[{}] memcheck v{} checking {}",
        now,
        VERSION,
        paths.memory_dir.display()
    );
    println!();

    let snapshot = StoreSnapshot::load(&paths).context("Failed to load memory store")?;
    let reports = checks::run_all(&snapshot, config.as_ref());
    let summary = print_report(&reports);

    if !summary.ok() {
        println!();
        println!(
            "{}",
            format!(
                "  {} check(s) failed. The validator does not repair; fix the files and re-run.",
                summary.failed
            )
            .red()
        );
    }

    Ok(summary.ok())
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if cli.memory_path.is_none() && cli.config.is_none() {
        tracing::debug!(default = DEFAULT_MEMORY_DIR, "no overrides given");
    }

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Fatal: {:#}", e);
            std::process::exit(1);
        }
    }
}
