//! Core types for the usage-report library
//!
//! This module defines the data model shared by the whole pipeline: the typed
//! sample row, the ordered sample table, the summary metrics, and the error
//! type every stage reports through.

use serde::{Deserialize, Serialize};

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Name of the ordinal timestamp column
pub const COL_TIMESTAMP: &str = "timestamp";
/// Name of the CPU utilization column
pub const COL_CPU: &str = "cpu";
/// Name of the memory utilization column
pub const COL_MEMORY: &str = "memory";
/// Name of the disk utilization column
pub const COL_DISK: &str = "disk";

/// The four columns every input source must provide
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_TIMESTAMP, COL_CPU, COL_MEMORY, COL_DISK];

/// Normalize a column name for lookup.
///
/// Source headers (and requested chart axes) may carry incidental
/// leading/trailing whitespace; every lookup goes through this single trim.
pub fn normalize_column(name: &str) -> &str {
    name.trim()
}

/// One timestamped measurement of host resource utilization
///
/// The timestamp is ordinal: it is kept as the source text and used as a
/// plotting-axis value, never parsed as a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Ordinal timestamp as it appeared in the source
    pub timestamp: String,
    /// CPU utilization
    pub cpu: f64,
    /// Memory utilization
    pub memory: f64,
    /// Disk utilization
    pub disk: f64,
}

impl Sample {
    /// Numeric value of a metric column, if `column` names one
    pub fn metric(&self, column: &str) -> Option<f64> {
        match column {
            COL_CPU => Some(self.cpu),
            COL_MEMORY => Some(self.memory),
            COL_DISK => Some(self.disk),
            _ => None,
        }
    }

    /// Display text of any required column (used for axis tick labels)
    pub fn display(&self, column: &str) -> Option<String> {
        match column {
            COL_TIMESTAMP => Some(self.timestamp.clone()),
            COL_CPU => Some(format!("{}", self.cpu)),
            COL_MEMORY => Some(format!("{}", self.memory)),
            COL_DISK => Some(format!("{}", self.disk)),
            _ => None,
        }
    }
}

/// Ordered table of samples loaded from one source file
///
/// Row order is source order and is preserved through the whole pipeline;
/// charts never re-sort by x-value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    /// Wrap an already-validated row sequence
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over rows in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// All values of one metric column, in row order
    ///
    /// Fails with [`ReportError::Schema`] if `column` (after normalization)
    /// does not name a metric column.
    pub fn metric_values(&self, column: &str) -> Result<Vec<f64>> {
        let column = normalize_column(column);
        // Validate the name even for empty tables so the caller sees a
        // schema problem, not an empty result
        if ![COL_CPU, COL_MEMORY, COL_DISK].contains(&column) {
            return Err(ReportError::Schema(column.to_string()));
        }
        Ok(self
            .samples
            .iter()
            .filter_map(|s| s.metric(column))
            .collect())
    }

    /// Display labels of any required column, in row order
    ///
    /// Fails with [`ReportError::Schema`] if `column` (after normalization)
    /// is not one of the four required columns.
    pub fn axis_labels(&self, column: &str) -> Result<Vec<String>> {
        let column = normalize_column(column);
        if !REQUIRED_COLUMNS.contains(&column) {
            return Err(ReportError::Schema(column.to_string()));
        }
        Ok(self
            .samples
            .iter()
            .map(|s| s.display(column).unwrap_or_default())
            .collect())
    }
}

/// The six aggregate values representing one input file
///
/// Derived solely from a [`SampleTable`]; immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub cpu_mean: f64,
    pub cpu_max: f64,
    pub memory_mean: f64,
    pub memory_max: f64,
    pub disk_mean: f64,
    pub disk_max: f64,
}

impl SummaryMetrics {
    /// Label/value pairs in document order
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("CPU Mean", self.cpu_mean),
            ("CPU Max", self.cpu_max),
            ("Memory Mean", self.memory_mean),
            ("Memory Max", self.memory_max),
            ("Disk Mean", self.disk_mean),
            ("Disk Max", self.disk_max),
        ]
    }
}

/// Errors that can occur while generating a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to parse source as tabular data: {0}")]
    Format(String),

    #[error("Required column missing: {0}")]
    Schema(String),

    #[error("Cannot aggregate an empty table")]
    EmptyData,

    #[error("Failed to render artifact: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        // Surface missing-file and similar failures as IO, everything else
        // as a format problem in the source text
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => ReportError::Io(io_err),
            _ => ReportError::Format(message),
        }
    }
}
