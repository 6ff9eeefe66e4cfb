//! Chart renderer
//!
//! Projects two columns of a sample table into a line-plot PNG. Points are
//! drawn in row order at row-index x positions, with tick labels taken from
//! the x column, so the temporal order of the source is preserved exactly
//! (the series is never re-sorted by x-value).

use crate::types::{normalize_column, ReportError, Result, SampleTable};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Rendered image size in pixels
const CHART_SIZE: (u32, u32) = (1000, 600);
/// Maximum number of x tick labels before thinning
const MAX_X_LABELS: usize = 10;

fn render_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Render(err.to_string())
}

/// Vertical plot range with a little headroom around the data
fn y_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

/// Render a line chart of `y_col` against `x_col` into `dest`
///
/// Column names are trimmed before lookup; `y_col` must name a metric
/// column and `x_col` any of the four required columns. The destination is
/// created or overwritten.
///
/// # Errors
/// * [`ReportError::Schema`] if either requested column is unknown after
///   normalization
/// * [`ReportError::Render`] if the plotting backend fails to draw or write
pub fn render_line_chart(
    table: &SampleTable,
    x_col: &str,
    y_col: &str,
    dest: &Path,
) -> Result<PathBuf> {
    let x_col = normalize_column(x_col).to_string();
    let y_col = normalize_column(y_col).to_string();

    // Resolve both columns before touching the destination so a schema
    // failure never leaves a partial artifact behind
    let labels = table.axis_labels(&x_col)?;
    let values = table.metric_values(&y_col)?;

    log::debug!(
        "Rendering chart {:?} ({} points, {} vs {})",
        dest,
        values.len(),
        y_col,
        x_col
    );

    let root = BitMapBackend::new(dest, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let x_max = values.len().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = y_bounds(&values);

    let title = format!("Report: {} vs {}", y_col, x_col);
    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..x_max + 0.5, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(&x_col)
        .y_desc(&y_col)
        .x_labels(labels.len().clamp(2, MAX_X_LABELS))
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().cloned(), &BLUE))
        .map_err(render_err)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    log::debug!("Chart written: {:?}", dest);
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    fn table() -> SampleTable {
        SampleTable::new(vec![
            Sample {
                timestamp: "1".into(),
                cpu: 10.0,
                memory: 20.0,
                disk: 30.0,
            },
            Sample {
                timestamp: "2".into(),
                cpu: 30.0,
                memory: 40.0,
                disk: 50.0,
            },
        ])
    }

    #[test]
    fn test_renders_png_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("host1_grafica.png");
        let out = render_line_chart(&table(), "timestamp", "cpu", &dest).unwrap();
        assert_eq!(out, dest);
        assert!(dest.exists());
        assert!(dest.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_requested_columns_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("chart.png");
        render_line_chart(&table(), " timestamp ", " cpu", &dest).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn test_unknown_column_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("chart.png");
        let result = render_line_chart(&table(), "timestamp", "swap", &dest);
        assert!(matches!(result, Err(ReportError::Schema(_))));
        assert!(!dest.exists());
    }

    #[test]
    fn test_constant_series_renders() {
        let rows = SampleTable::new(vec![
            Sample {
                timestamp: "1".into(),
                cpu: 5.0,
                memory: 5.0,
                disk: 5.0,
            },
            Sample {
                timestamp: "2".into(),
                cpu: 5.0,
                memory: 5.0,
                disk: 5.0,
            },
        ]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("flat.png");
        render_line_chart(&rows, "timestamp", "cpu", &dest).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn test_y_bounds_padding() {
        let (lo, hi) = y_bounds(&[10.0, 30.0]);
        assert!(lo < 10.0 && hi > 30.0);
        let (lo, hi) = y_bounds(&[7.0, 7.0]);
        assert_eq!((lo, hi), (6.0, 8.0));
    }
}
