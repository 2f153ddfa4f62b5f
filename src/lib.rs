//! Millimetre grid overlays for cropped images.
//!
//! A physical grid spec (pitch, gap, stroke, diagonals) is turned into pixel
//! geometry once, by [`grid::generate_grid`], and consumed by two renderers:
//! an SVG preview positioned under the current pan offset, and a PNG export
//! at the paper's real size. Both resolve their canvas through
//! [`layout::resolve_layout`], so the real-size preview and the download
//! carry identical grid coordinates.

// Core geometry
pub mod grid;
pub mod layout;
pub mod paper;
pub mod transform;
pub mod types;
pub mod units;

// Rendering and I/O
pub mod diagnostics;
pub mod image;
pub mod render;

// Application shell
pub mod app;
pub mod config;
pub mod error;
pub mod session;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::grid::{generate_grid, GridGeometry};
pub use crate::layout::{resolve_layout, DisplayMode, DisplayedCanvas, Layout, Viewport};
pub use crate::paper::PaperSize;
pub use crate::session::{ExportJob, Session};
pub use crate::types::{DiagonalStyle, GridSpec, Rgb};
pub use crate::units::{mm_to_px, DEFAULT_DPI};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use grid_overlay::prelude::*;
///
/// # fn main() {
/// let layout = resolve_layout(
///     &DisplayMode::RealSize { paper: PaperSize::A4, dpi: DEFAULT_DPI },
///     DEFAULT_DPI,
/// );
/// let grid = generate_grid(layout.canvas, &GridSpec::default(), layout.scale);
/// println!("{} x {} cells", grid.num_cols, grid.num_rows);
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        generate_grid, resolve_layout, DisplayMode, GridSpec, PaperSize, Session, DEFAULT_DPI,
    };
}
