//! Standalone single-file report generator
//!
//! Runs the full pipeline for one CSV log file and prints the path of the
//! generated document. Set RUST_LOG=debug to watch each stage.
//!
//! Usage:
//!   cargo run --example generate_report -- <log_file.csv> [output_dir]
//!
//! Example:
//!   cargo run --example generate_report -- logs/host1.csv reports

use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let source = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: generate_report <log_file.csv> [output_dir]");
            process::exit(1);
        }
    };
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "reports".to_string()));

    if let Err(e) = run(&source, &output_dir) {
        eprintln!("✗ {}: {}", source.display(), e);
        process::exit(1);
    }
}

fn run(source: &std::path::Path, output_dir: &std::path::Path) -> usage_report::Result<()> {
    std::fs::create_dir_all(output_dir)?;
    let report = usage_report::generate_report(source, output_dir)?;
    println!("✓ Report generated: {}", report.display());
    Ok(())
}
