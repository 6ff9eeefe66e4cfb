//! Usage Report Library
//!
//! A small, synchronous library that turns per-host resource-usage logs
//! (timestamped CPU/memory/disk CSV samples) into PDF summary reports.
//!
//! # Architecture
//!
//! The pipeline for one source file is strictly sequential:
//! - Loader: CSV source → ordered, typed [`SampleTable`]
//! - Aggregator: table → six [`SummaryMetrics`] (mean and max per resource)
//! - Chart renderer: table → line-plot PNG artifact
//! - Composer: metrics + chart → paginated PDF artifact
//!
//! The library does NOT:
//! - Discover input files on disk (the application layer enumerates sources)
//! - Aggregate across multiple files or runs
//! - Keep any state between invocations beyond the generated artifacts
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = usage_report::generate_report(
//!     Path::new("logs/host1.csv"),
//!     Path::new("reports"),
//! ).unwrap();
//! println!("Generated {:?}", report);
//! ```

// Public modules
pub mod chart;
pub mod compose;
pub mod loader;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use compose::{chart_artifact_path, generate_report, report_artifact_path};
pub use loader::{is_tabular_source, load_samples};
pub use stats::summarize;
pub use types::{ReportError, Result, Sample, SampleTable, SummaryMetrics};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty table is rejected by the aggregator
        let table = SampleTable::default();
        assert!(table.is_empty());
        assert!(matches!(summarize(&table), Err(ReportError::EmptyData)));
    }
}
