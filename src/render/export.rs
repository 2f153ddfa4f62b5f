//! Export rasterizer: source image + grid burned into a paper-sized PNG.
//!
//! The canvas and grid come from the same real-size layout the preview uses;
//! only the raster buffer is rounded to whole pixels. Labels are preview-only.
use super::raster::{composite_strokes, grayscale_average, Stroke};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{line_counts, ExportReport, TimingBreakdown};
use crate::error::{Error, Result};
use crate::grid::{generate_grid, GridGeometry, Line};
use crate::image::io::{encode_png, write_bytes};
use crate::image::SourceImage;
use crate::layout::{resolve_layout, DisplayMode, Layout};
use crate::paper::PaperSize;
use crate::types::{GridSpec, DIAGONAL_COLOR};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Download name for an export on `paper`.
pub fn export_file_name(paper: PaperSize) -> String {
    format!("gridded-{}.png", paper.label())
}

/// Layout of the real-size view of `paper`, shared with the preview.
pub fn export_layout(paper: PaperSize, dpi: u32) -> Layout {
    resolve_layout(&DisplayMode::RealSize { paper, dpi }, dpi)
}

/// Stroke list for `geometry`: grid lines in `GridSpec::color`, diagonals in
/// the fixed diagonal color, both at the configured stroke width.
pub fn strokes_for(geometry: &GridGeometry, spec: &GridSpec) -> Vec<Stroke> {
    geometry
        .lines
        .iter()
        .map(|line: &Line| {
            let color = if line.kind.is_structural() {
                spec.color
            } else {
                DIAGONAL_COLOR
            };
            Stroke::new(*line, color, spec.stroke_width_px)
        })
        .collect()
}

/// Rasterized export before encoding.
#[derive(Clone, Debug)]
pub struct Rasterized {
    pub image: RgbaImage,
    pub geometry: GridGeometry,
    pub timing: TimingBreakdown,
}

/// Draw `source` stretched to `paper` at `dpi`, apply grayscale if asked,
/// then stroke every grid and diagonal line.
pub fn rasterize(
    source: &SourceImage,
    spec: &GridSpec,
    paper: PaperSize,
    dpi: u32,
) -> Result<Rasterized> {
    let start = Instant::now();
    let layout = export_layout(paper, dpi);
    let (w, h) = layout.canvas.raster_size();
    if w == 0 || h == 0 {
        return Err(Error::NotReady("export canvas is empty"));
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(Error::NotReady("source image has no pixels"));
    }

    let mut timing = TimingBreakdown::default();
    let mut image = timing.time("resize", || {
        imageops::resize(source.pixels(), w, h, FilterType::Triangle)
    });
    if spec.grayscale {
        timing.time("grayscale", || grayscale_average(&mut image));
    }

    let geometry = generate_grid(layout.canvas, spec, layout.scale);
    let strokes = strokes_for(&geometry, spec);
    timing.time("strokes", || composite_strokes(&mut image, &strokes));
    timing.total_ms = elapsed_ms(start);

    debug!(
        "rasterize {} paper={} {}x{} strokes={}",
        source.id(),
        paper,
        w,
        h,
        strokes.len()
    );
    Ok(Rasterized {
        image,
        geometry,
        timing,
    })
}

/// Encoded export ready to be handed to the user.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub report: ExportReport,
}

impl ExportArtifact {
    /// Write the file into `dir` under its deterministic name.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        write_bytes(&path, &self.bytes).map_err(Error::Io)?;
        Ok(path)
    }
}

/// Rasterize and PNG-encode an export of `source`.
pub fn export_png(
    source: &SourceImage,
    spec: &GridSpec,
    paper: PaperSize,
    dpi: u32,
) -> Result<ExportArtifact> {
    let start = Instant::now();
    let Rasterized {
        image,
        geometry,
        mut timing,
    } = rasterize(source, spec, paper, dpi)?;
    let bytes = timing.time("encode", || encode_png(&image)).map_err(Error::Encode)?;
    timing.total_ms = elapsed_ms(start);

    let (vertical, horizontal, diagonal) = line_counts(&geometry);
    let file_name = export_file_name(paper);
    let report = ExportReport {
        image_id: source.id(),
        paper,
        dpi,
        width: image.width(),
        height: image.height(),
        num_cols: geometry.num_cols,
        num_rows: geometry.num_rows,
        cell_width_px: geometry.cell_width_px,
        cell_height_px: geometry.cell_height_px,
        vertical_lines: vertical,
        horizontal_lines: horizontal,
        diagonal_lines: diagonal,
        grayscale: spec.grayscale,
        file_name: file_name.clone(),
        timing,
    };
    info!(
        "export {} -> {} ({}x{}, {} bytes, {:.1} ms)",
        source.id(),
        file_name,
        report.width,
        report.height,
        bytes.len(),
        report.timing.total_ms
    );
    Ok(ExportArtifact {
        file_name,
        bytes,
        report,
    })
}
