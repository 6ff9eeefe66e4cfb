//! Report composer
//!
//! Orchestrates the whole pipeline for one source file: load the table,
//! aggregate it, render the chart, then assemble the paginated PDF document.
//! Artifact locations are derived deterministically from the source name so
//! re-runs overwrite in place instead of accumulating stale files.

use crate::types::{ReportError, Result, SummaryMetrics, COL_CPU, COL_TIMESTAMP};
use crate::{chart, loader, stats};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// A4 page size in millimeters
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
/// Left/bottom page margin in millimeters
const MARGIN_MM: f32 = 10.0;
/// Embedded chart width; fixed proportion of the page
const CHART_WIDTH_MM: f32 = 180.0;
/// Body line advance in millimeters
const LINE_HEIGHT_MM: f32 = 8.0;
/// printpdf places images at 300 dpi when no dpi override is given
const IMAGE_DPI: f32 = 300.0;

const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 9.0;

fn render_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Render(err.to_string())
}

/// Deterministic chart-image location for a source file
///
/// `host1.csv` maps to `<output_dir>/host1_grafica.png`.
pub fn chart_artifact_path(output_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    output_dir.join(format!("{}_grafica.png", stem))
}

/// Deterministic document location for a source file
///
/// `host1.csv` maps to `<output_dir>/host1.pdf`.
pub fn report_artifact_path(output_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    output_dir.join(format!("{}.pdf", stem))
}

/// Generate the full report for one source file
///
/// Pipeline: load → summarize → render chart (`cpu` over `timestamp`) →
/// compose document. The output directory must already exist; creating it is
/// the driver's one-time initialization step, not an ambient effect here.
///
/// # Arguments
/// * `source` - Path to the delimited-text input
/// * `output_dir` - Resolved directory both artifacts are written into
///
/// # Returns
/// * `Result<PathBuf>` - Path of the generated document, as confirmation
///
/// # Errors
/// Propagates loader, aggregator and renderer errors unchanged; document
/// write failures surface as [`ReportError::Io`] or [`ReportError::Render`].
pub fn generate_report(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    log::info!("Generating report for: {:?}", source);

    let table = loader::load_samples(source)?;
    let metrics = stats::summarize(&table)?;

    let chart_dest = chart_artifact_path(output_dir, source);
    let chart_file = chart::render_line_chart(&table, COL_TIMESTAMP, COL_CPU, &chart_dest)?;

    let report_dest = report_artifact_path(output_dir, source);
    compose_document(source, &metrics, &chart_file, &report_dest)?;

    log::info!("Report written: {:?}", report_dest);
    Ok(report_dest)
}

/// Assemble the PDF: title, statistics section, embedded chart, footer
fn compose_document(
    source: &Path,
    metrics: &SummaryMetrics,
    chart_file: &Path,
    dest: &Path,
) -> Result<()> {
    let source_name = source
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("source");
    let title = format!("Metrics Report: {}", source_name);

    let (doc, page, layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_err)?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_err)?;

    // Vertical cursor, walking down from the top of the page
    let mut cursor = PAGE_HEIGHT_MM - MARGIN_MM - TITLE_SIZE;
    layer.use_text(&title, TITLE_SIZE, Mm(MARGIN_MM), Mm(cursor), &font_bold);
    cursor -= LINE_HEIGHT_MM + 4.0;

    layer.use_text(
        "General Statistics",
        BODY_SIZE,
        Mm(MARGIN_MM),
        Mm(cursor),
        &font_bold,
    );
    cursor -= LINE_HEIGHT_MM;

    for (label, value) in metrics.entries() {
        layer.use_text(
            format!("{}: {:.2}", label, value),
            BODY_SIZE,
            Mm(MARGIN_MM),
            Mm(cursor),
            &font,
        );
        cursor -= LINE_HEIGHT_MM;
    }

    // Spacer before the chart
    cursor -= LINE_HEIGHT_MM;

    let mut chart_reader = BufReader::new(File::open(chart_file)?);
    let decoder = printpdf::image_crate::codecs::png::PngDecoder::new(&mut chart_reader)
        .map_err(render_err)?;
    let image = Image::try_from(decoder).map_err(render_err)?;

    // Scale the image to the fixed chart width and anchor its top edge at
    // the current cursor (printpdf positions by bottom-left corner)
    let natural_width_mm = image.image.width.0 as f32 * 25.4 / IMAGE_DPI;
    let natural_height_mm = image.image.height.0 as f32 * 25.4 / IMAGE_DPI;
    let scale = CHART_WIDTH_MM / natural_width_mm;
    let chart_height_mm = natural_height_mm * scale;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(Mm(cursor - chart_height_mm)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            ..Default::default()
        },
    );

    let stamp = format!(
        "Generated: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    layer.use_text(stamp, FOOTER_SIZE, Mm(MARGIN_MM), Mm(MARGIN_MM), &font);

    let file = File::create(dest)?;
    doc.save(&mut BufWriter::new(file)).map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_artifact_naming() {
        let out = Path::new("reports");
        let source = Path::new("logs/host1.csv");
        assert_eq!(
            chart_artifact_path(out, source),
            Path::new("reports/host1_grafica.png")
        );
        assert_eq!(
            report_artifact_path(out, source),
            Path::new("reports/host1.pdf")
        );
    }

    #[test]
    fn test_naming_ignores_source_directory() {
        let out = Path::new("/var/reports");
        assert_eq!(
            report_artifact_path(out, Path::new("/some/deep/dir/web2.csv")),
            Path::new("/var/reports/web2.pdf")
        );
    }
}
