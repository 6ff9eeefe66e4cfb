//! Statistics aggregator
//!
//! Reduces a sample table to its six summary metrics: arithmetic mean and
//! maximum of each metric column.

use crate::types::{
    ReportError, Result, SampleTable, SummaryMetrics, COL_CPU, COL_DISK, COL_MEMORY,
};

/// Mean and maximum of one value sequence
///
/// Precondition: `values` is non-empty. The caller checks table emptiness
/// once up front so all six aggregates share one `EmptyData` decision.
fn mean_and_max(values: &[f64]) -> (f64, f64) {
    let sum: f64 = values.iter().sum();
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (sum / values.len() as f64, max)
}

/// Compute summary metrics for a sample table
///
/// # Errors
/// * [`ReportError::EmptyData`] if the table has zero rows; aggregating
///   nothing is a precondition violation, never a sentinel value
pub fn summarize(table: &SampleTable) -> Result<SummaryMetrics> {
    if table.is_empty() {
        return Err(ReportError::EmptyData);
    }

    let (cpu_mean, cpu_max) = mean_and_max(&table.metric_values(COL_CPU)?);
    let (memory_mean, memory_max) = mean_and_max(&table.metric_values(COL_MEMORY)?);
    let (disk_mean, disk_max) = mean_and_max(&table.metric_values(COL_DISK)?);

    log::debug!(
        "Summarized {} rows: cpu mean {:.2}, max {:.2}",
        table.len(),
        cpu_mean,
        cpu_max
    );

    Ok(SummaryMetrics {
        cpu_mean,
        cpu_max,
        memory_mean,
        memory_max,
        disk_mean,
        disk_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    fn table(rows: &[(f64, f64, f64)]) -> SampleTable {
        SampleTable::new(
            rows.iter()
                .enumerate()
                .map(|(i, &(cpu, memory, disk))| Sample {
                    timestamp: format!("{}", i + 1),
                    cpu,
                    memory,
                    disk,
                })
                .collect(),
        )
    }

    #[test]
    fn test_two_row_scenario() {
        let metrics = summarize(&table(&[(10.0, 20.0, 30.0), (30.0, 40.0, 50.0)])).unwrap();
        assert_eq!(metrics.cpu_mean, 20.0);
        assert_eq!(metrics.cpu_max, 30.0);
        assert_eq!(metrics.memory_mean, 30.0);
        assert_eq!(metrics.memory_max, 40.0);
        assert_eq!(metrics.disk_mean, 40.0);
        assert_eq!(metrics.disk_max, 50.0);
    }

    #[test]
    fn test_mean_never_exceeds_max() {
        let metrics = summarize(&table(&[
            (12.5, 80.0, 3.0),
            (99.0, 10.0, 3.5),
            (40.2, 55.5, 2.25),
        ]))
        .unwrap();
        for (mean, max) in [
            (metrics.cpu_mean, metrics.cpu_max),
            (metrics.memory_mean, metrics.memory_max),
            (metrics.disk_mean, metrics.disk_max),
        ] {
            assert!(mean <= max, "mean {} exceeds max {}", mean, max);
        }
    }

    #[test]
    fn test_constant_column_mean_equals_max() {
        let metrics = summarize(&table(&[(7.0, 7.0, 7.0), (7.0, 7.0, 7.0), (7.0, 7.0, 7.0)]))
            .unwrap();
        for (_, value) in metrics.entries() {
            assert_eq!(value, 7.0);
        }
    }

    #[test]
    fn test_single_row() {
        let metrics = summarize(&table(&[(42.0, 1.0, 2.0)])).unwrap();
        assert_eq!(metrics.cpu_mean, 42.0);
        assert_eq!(metrics.cpu_max, 42.0);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            summarize(&table(&[])),
            Err(ReportError::EmptyData)
        ));
    }
}
