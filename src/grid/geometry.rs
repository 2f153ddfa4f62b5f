//! Pure grid geometry shared by the preview overlay and the exporter.
use serde::Serialize;

/// Diagonal direction within a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagonal {
    TopLeftToBottomRight,
    TopRightToBottomLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Vertical,
    Horizontal,
    Diagonal(Diagonal),
}

impl LineKind {
    /// Structural lines use the grid color; diagonals use the fixed one.
    pub fn is_structural(self) -> bool {
        !matches!(self, LineKind::Diagonal(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub fn new(kind: LineKind, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            kind,
            x1,
            y1,
            x2,
            y2,
        }
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// Which edge of the canvas a label sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// 1-based row/column index drawn along the canvas border. `(x, y)` is the
/// text baseline origin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Label {
    pub edge: Edge,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Ordered output of the generator: vertical lines, horizontal lines,
/// diagonals, then labels.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    pub num_cols: usize,
    pub num_rows: usize,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub lines: Vec<Line>,
    pub labels: Vec<Label>,
}

impl GridGeometry {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty()
    }

    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(move |l| l.kind == kind)
    }

    pub fn structural_lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|l| l.kind.is_structural())
    }

    pub fn diagonal_lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|l| !l.kind.is_structural())
    }

    /// 1-based `(row, column)` of the cell containing a canvas point.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if self.num_cols == 0 || self.num_rows == 0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_width_px).floor() as usize;
        let row = (y / self.cell_height_px).floor() as usize;
        (col < self.num_cols && row < self.num_rows).then_some((row + 1, col + 1))
    }
}
