//! Structured reports written next to exports.
pub mod timing;

pub use self::timing::{StageTiming, TimingBreakdown};

use crate::grid::{GridGeometry, LineKind};
use crate::image::ImageId;
use crate::paper::PaperSize;
use serde::Serialize;

/// Summary of one export: what was drawn and how long each stage took.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub image_id: ImageId,
    pub paper: PaperSize,
    pub dpi: u32,
    pub width: u32,
    pub height: u32,
    pub num_cols: usize,
    pub num_rows: usize,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub vertical_lines: usize,
    pub horizontal_lines: usize,
    pub diagonal_lines: usize,
    pub grayscale: bool,
    pub file_name: String,
    pub timing: TimingBreakdown,
}

/// Line counts of `geometry` by kind: `(vertical, horizontal, diagonal)`.
pub fn line_counts(geometry: &GridGeometry) -> (usize, usize, usize) {
    geometry
        .lines
        .iter()
        .fold((0, 0, 0), |(v, h, d), line| match line.kind {
            LineKind::Vertical => (v + 1, h, d),
            LineKind::Horizontal => (v, h + 1, d),
            LineKind::Diagonal(_) => (v, h, d + 1),
        })
}
