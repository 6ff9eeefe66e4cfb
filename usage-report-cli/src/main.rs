//! Usage Report CLI Application
//!
//! This is the batch driver around the usage-report library. It enumerates
//! the CSV sources in the input directory and generates one PDF report (plus
//! its chart image) per source. One source failing does not abort the rest
//! of the batch; failures are collected and summarized at the end, and the
//! process exits non-zero if any occurred.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

mod config;

use config::AppConfig;

/// Usage Report - Generate PDF summaries from host resource-usage logs
#[derive(Parser, Debug)]
#[command(name = "usage-report-cli")]
#[command(about = "Generate PDF reports from CPU/memory/disk usage logs", long_about = None)]
#[command(version)]
struct Args {
    /// Directory containing the CSV log files (default: logs)
    #[arg(short, long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Directory the reports are written into (default: reports)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Usage Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using report library v{}", usage_report::VERSION);

    // Resolve configuration: flags > config file > built-in defaults
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &args.input {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = &args.output {
        config.output_dir = dir.clone();
    }

    run_batch(&config)
}

/// Process every qualifying source in the input directory
fn run_batch(config: &AppConfig) -> Result<()> {
    // Create the output directory once, up front; the composer relies on it
    // existing and performs no directory initialization of its own
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", config.output_dir))?;

    let sources = enumerate_sources(&config.input_dir)?;
    if sources.is_empty() {
        println!("No CSV sources found in {:?}", config.input_dir);
        return Ok(());
    }

    log::info!("Processing {} source file(s)", sources.len());

    let mut failures: Vec<(PathBuf, usage_report::ReportError)> = Vec::new();
    for source in &sources {
        match usage_report::generate_report(source, &config.output_dir) {
            Ok(report) => println!("✓ Report generated: {}", report.display()),
            Err(e) => {
                log::error!("Failed to generate report for {:?}: {}", source, e);
                failures.push((source.clone(), e));
            }
        }
    }

    println!(
        "\nBatch complete: {} succeeded, {} failed",
        sources.len() - failures.len(),
        failures.len()
    );

    if !failures.is_empty() {
        for (source, err) in &failures {
            eprintln!("✗ {:?}: {}", source, err);
        }
        anyhow::bail!("{} of {} sources failed", failures.len(), sources.len());
    }

    Ok(())
}

/// All CSV sources in the input directory, in sorted order for a
/// deterministic batch
fn enumerate_sources(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read input directory: {:?}", input_dir))?;

    let mut sources: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && usage_report::is_tabular_source(path))
        .collect();
    sources.sort();
    Ok(sources)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
