//! Sample table loader
//!
//! Parses a delimited text source (CSV) into an ordered [`SampleTable`].
//! Header names are trimmed on ingest; this is the only place column-name
//! normalization happens for loaded data, so the statistics and charting
//! paths always see clean names.

use crate::types::{
    normalize_column, ReportError, Result, Sample, SampleTable, COL_CPU, COL_DISK, COL_MEMORY,
    COL_TIMESTAMP,
};
use std::path::Path;

/// Column indices resolved from a trimmed header row
struct ColumnIndex {
    timestamp: usize,
    cpu: usize,
    memory: usize,
    disk: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| normalize_column(h) == name)
                .ok_or_else(|| ReportError::Schema(name.to_string()))
        };
        Ok(Self {
            timestamp: find(COL_TIMESTAMP)?,
            cpu: find(COL_CPU)?,
            memory: find(COL_MEMORY)?,
            disk: find(COL_DISK)?,
        })
    }
}

/// Load a sample table from a CSV file
///
/// # Arguments
/// * `path` - Path to the CSV source
///
/// # Returns
/// * `Result<SampleTable>` - The parsed table, in source row order
///
/// # Errors
/// * [`ReportError::Io`] if the source cannot be read
/// * [`ReportError::Format`] if the text is not parseable as a table or a
///   metric cell is not numeric
/// * [`ReportError::Schema`] if any of `timestamp`, `cpu`, `memory`, `disk`
///   is missing after header trimming
pub fn load_samples(path: &Path) -> Result<SampleTable> {
    log::debug!("Loading samples from: {:?}", path);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::resolve(&headers)?;

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        samples.push(Sample {
            timestamp: field(&record, index.timestamp, row)?.to_string(),
            cpu: numeric_field(&record, index.cpu, COL_CPU, row)?,
            memory: numeric_field(&record, index.memory, COL_MEMORY, row)?,
            disk: numeric_field(&record, index.disk, COL_DISK, row)?,
        });
    }

    log::debug!("Loaded {} samples from {:?}", samples.len(), path);
    Ok(SampleTable::new(samples))
}

/// Raw text of one cell, with row context on failure
fn field<'r>(record: &'r csv::StringRecord, idx: usize, row: usize) -> Result<&'r str> {
    record
        .get(idx)
        .ok_or_else(|| ReportError::Format(format!("row {}: missing field {}", row + 1, idx)))
}

/// Numeric value of one metric cell
fn numeric_field(record: &csv::StringRecord, idx: usize, column: &str, row: usize) -> Result<f64> {
    let text = field(record, idx, row)?;
    text.parse::<f64>().map_err(|_| {
        ReportError::Format(format!(
            "row {}: column {:?} is not numeric: {:?}",
            row + 1,
            column,
            text
        ))
    })
}

/// True if a directory entry looks like a tabular text source
pub fn is_tabular_source(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
