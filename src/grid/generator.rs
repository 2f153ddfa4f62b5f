//! Grid generation: physical spec + displayed canvas → line and label geometry.
//!
//! This is the only place pitch is turned into pixels. The preview overlay and
//! the exporter both call [`generate_grid`] with the layout they resolved, so
//! identical inputs give bit-identical geometry on both paths.
use super::geometry::{Diagonal, Edge, GridGeometry, Label, Line, LineKind};
use crate::layout::{DisplayedCanvas, ReferenceScale};
use crate::types::GridSpec;
use log::{debug, warn};

/// Horizontal inset of column labels from their grid line.
pub const LABEL_INSET_X: f64 = 2.0;
/// Baseline of the top labels.
pub const LABEL_TOP_BASELINE: f64 = 12.0;
/// Distance of the bottom labels' baseline from the bottom edge.
pub const LABEL_BOTTOM_INSET: f64 = 2.0;
/// Baseline offset of row labels below their grid line.
pub const LABEL_ROW_BASELINE: f64 = 10.0;
/// Distance of the right-hand labels from the right edge.
pub const LABEL_RIGHT_INSET: f64 = 20.0;
/// Label font size in pixels.
pub const LABEL_FONT_SIZE: f64 = 10.0;

/// Cells narrower than this many displayed pixels are degenerate on their
/// axis: the lines would overlap and cannot be told apart.
pub const MIN_CELL_PX: f64 = 1.0;

/// Upper bound on lines (structural plus diagonal) in one grid. A grid that
/// would exceed it is degenerate as a whole and yields no geometry.
pub const MAX_LINES: usize = 4_000_000;

/// Generate the grid for `canvas` at `scale` displayed pixels per millimetre.
///
/// Never fails: a hidden grid, an empty canvas, or a pitch that is
/// non-positive or larger than the canvas yields no lines for that axis.
///
/// Counts follow `floor(extent / cell)` for every cell of at least
/// [`MIN_CELL_PX`]; a smaller cell gives 0 for that axis. If the resulting
/// line count would still exceed [`MAX_LINES`] the grid is empty.
pub fn generate_grid(canvas: DisplayedCanvas, spec: &GridSpec, scale: ReferenceScale) -> GridGeometry {
    if !spec.show_grid || canvas.is_empty() {
        return GridGeometry::default();
    }
    let (w, h) = (canvas.width_px, canvas.height_px);

    let cell_w = (spec.col_pitch_mm + spec.gap_mm) * scale.x;
    let cell_h = (spec.row_pitch_mm + spec.gap_mm) * scale.y;
    let num_cols = cell_count(w, cell_w);
    let num_rows = cell_count(h, cell_h);

    let Some(capacity) = line_count(num_cols, num_rows, spec).filter(|&n| n <= MAX_LINES) else {
        warn!(
            "generate_grid cell={:.4}x{:.4} px gives {}x{} cells, over the {} line limit; drawing no grid",
            cell_w, cell_h, num_cols, num_rows, MAX_LINES
        );
        return GridGeometry::default();
    };
    let mut lines = Vec::with_capacity(capacity);
    let mut labels = Vec::with_capacity(2 * (num_cols + 1) + 2 * (num_rows + 1));

    if num_cols > 0 {
        for c in 0..=num_cols {
            let x = c as f64 * cell_w;
            lines.push(Line::new(LineKind::Vertical, x, 0.0, x, h));
        }
    }
    if num_rows > 0 {
        for r in 0..=num_rows {
            let y = r as f64 * cell_h;
            lines.push(Line::new(LineKind::Horizontal, 0.0, y, w, y));
        }
    }

    let style = spec.effective_diagonals();
    if num_cols > 0 && num_rows > 0 && (style.draws_tl_br() || style.draws_tr_bl()) {
        for r in 0..num_rows {
            for c in 0..num_cols {
                let x1 = c as f64 * cell_w;
                let y1 = r as f64 * cell_h;
                let x2 = x1 + cell_w;
                let y2 = y1 + cell_h;
                if style.draws_tl_br() {
                    lines.push(Line::new(
                        LineKind::Diagonal(Diagonal::TopLeftToBottomRight),
                        x1,
                        y1,
                        x2,
                        y2,
                    ));
                }
                if style.draws_tr_bl() {
                    lines.push(Line::new(
                        LineKind::Diagonal(Diagonal::TopRightToBottomLeft),
                        x2,
                        y1,
                        x1,
                        y2,
                    ));
                }
            }
        }
    }

    if num_cols > 0 {
        for c in 0..=num_cols {
            let x = c as f64 * cell_w + LABEL_INSET_X;
            let text = (c + 1).to_string();
            labels.push(Label {
                edge: Edge::Top,
                x,
                y: LABEL_TOP_BASELINE,
                text: text.clone(),
            });
            labels.push(Label {
                edge: Edge::Bottom,
                x,
                y: h - LABEL_BOTTOM_INSET,
                text,
            });
        }
    }
    if num_rows > 0 {
        for r in 0..=num_rows {
            let y = r as f64 * cell_h + LABEL_ROW_BASELINE;
            let text = (r + 1).to_string();
            labels.push(Label {
                edge: Edge::Left,
                x: LABEL_INSET_X,
                y,
                text: text.clone(),
            });
            labels.push(Label {
                edge: Edge::Right,
                x: w - LABEL_RIGHT_INSET,
                y,
                text,
            });
        }
    }

    debug!(
        "generate_grid canvas={:.2}x{:.2} cell={:.3}x{:.3} cols={} rows={} lines={}",
        w,
        h,
        cell_w,
        cell_h,
        num_cols,
        num_rows,
        lines.len()
    );

    GridGeometry {
        num_cols,
        num_rows,
        cell_width_px: cell_w,
        cell_height_px: cell_h,
        lines,
        labels,
    }
}

/// `floor(extent / cell)`, or 0 when the cell is below [`MIN_CELL_PX`] or
/// does not fit.
fn cell_count(extent: f64, cell: f64) -> usize {
    if !cell.is_finite() || cell < MIN_CELL_PX || !extent.is_finite() {
        return 0;
    }
    let n = (extent / cell).floor();
    if n < 1.0 {
        return 0;
    }
    n as usize
}

/// Lines the grid will hold, or `None` on overflow.
fn line_count(num_cols: usize, num_rows: usize, spec: &GridSpec) -> Option<usize> {
    let axis = |n: usize| if n > 0 { n.checked_add(1) } else { Some(0) };
    let style = spec.effective_diagonals();
    let per_cell = style.draws_tl_br() as usize + style.draws_tr_bl() as usize;
    let diagonals = num_cols.checked_mul(num_rows)?.checked_mul(per_cell)?;
    axis(num_cols)?.checked_add(axis(num_rows)?)?.checked_add(diagonals)
}
