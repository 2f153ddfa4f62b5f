//! Display-mode → canvas size and reference scale.
use super::mode::{DisplayMode, DisplayedCanvas, Layout, ReferenceScale};
use crate::transform::{invert_point, scaling};
use crate::units::{mm_to_px, px_to_mm};
use log::debug;

/// Resolve the displayed canvas for `mode`.
///
/// `dpi` is the session density used to express the natural image in
/// millimetres for fit mode; real-size mode uses the density it carries.
/// A missing image or unmeasured container yields [`Layout::EMPTY`].
pub fn resolve_layout(mode: &DisplayMode, dpi: u32) -> Layout {
    let layout = match *mode {
        DisplayMode::RealSize { paper, dpi } => {
            let (w_mm, h_mm) = paper.dimensions_mm();
            let canvas = DisplayedCanvas::new(mm_to_px(w_mm, dpi), mm_to_px(h_mm, dpi));
            if canvas.is_empty() {
                Layout::EMPTY
            } else {
                Layout {
                    canvas,
                    scale: ReferenceScale::new(canvas.width_px / w_mm, canvas.height_px / h_mm),
                    zoom: 1.0,
                }
            }
        }
        DisplayMode::FitToContainer {
            natural_width_px,
            natural_height_px,
            container_width_px,
            container_height_px,
        } => resolve_fit(
            natural_width_px,
            natural_height_px,
            container_width_px,
            container_height_px,
            dpi,
        ),
    };
    debug!(
        "Layout::resolve real_size={} canvas={:.2}x{:.2} scale=({:.4}, {:.4})",
        mode.is_real_size(),
        layout.canvas.width_px,
        layout.canvas.height_px,
        layout.scale.x,
        layout.scale.y
    );
    layout
}

fn resolve_fit(
    natural_w: u32,
    natural_h: u32,
    container_w: f64,
    container_h: f64,
    dpi: u32,
) -> Layout {
    if natural_w == 0 || natural_h == 0 || dpi == 0 {
        return Layout::EMPTY;
    }
    let (nw, nh) = (natural_w as f64, natural_h as f64);
    let zoom = (container_w.max(0.0) / nw)
        .min(container_h.max(0.0) / nh)
        .min(1.0);
    if !zoom.is_finite() || zoom <= 0.0 {
        return Layout::EMPTY;
    }
    let canvas = DisplayedCanvas::new(nw * zoom, nh * zoom);
    let ref_w_mm = px_to_mm(nw, dpi);
    let ref_h_mm = px_to_mm(nh, dpi);
    Layout {
        canvas,
        scale: ReferenceScale::new(canvas.width_px / ref_w_mm, canvas.height_px / ref_h_mm),
        zoom,
    }
}

impl Layout {
    /// Millimetre position of a canvas point, or `None` for an empty layout.
    pub fn canvas_to_mm(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        invert_point(&scaling(self.scale.x, self.scale.y), point)
    }
}
