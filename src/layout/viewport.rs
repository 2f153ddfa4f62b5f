//! View state: display mode toggle, container size and pan offset.
//!
//! Fit and real-size views are independent viewports, so switching mode (or
//! paper, or image) drops the pan offset back to the origin. Resizing the
//! container only changes the fit zoom.
use super::mode::{DisplayMode, Layout};
use super::resolver::resolve_layout;
use crate::grid::GridGeometry;
use crate::paper::PaperSize;
use crate::transform::{invert_point, translation};
use log::debug;
use nalgebra::{Matrix3, Vector2};

#[derive(Clone, Debug)]
pub struct Viewport {
    real_size: bool,
    paper: PaperSize,
    dpi: u32,
    image_size: (u32, u32),
    container: (f64, f64),
    offset: Vector2<f64>,
    drag_anchor: Option<Vector2<f64>>,
}

impl Viewport {
    pub fn new(paper: PaperSize, dpi: u32) -> Self {
        Self {
            real_size: false,
            paper,
            dpi,
            image_size: (0, 0),
            container: (0.0, 0.0),
            offset: Vector2::zeros(),
            drag_anchor: None,
        }
    }

    pub fn is_real_size(&self) -> bool {
        self.real_size
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn offset(&self) -> Vector2<f64> {
        self.offset
    }

    pub fn set_real_size(&mut self, real_size: bool) {
        if self.real_size != real_size {
            self.real_size = real_size;
            self.reset_pan();
        }
    }

    pub fn toggle_real_size(&mut self) {
        self.set_real_size(!self.real_size);
    }

    pub fn set_paper(&mut self, paper: PaperSize) {
        if self.paper != paper {
            self.paper = paper;
            self.reset_pan();
        }
    }

    /// Natural size of the current image; `(0, 0)` while it is decoding.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        if self.image_size != (width, height) {
            self.image_size = (width, height);
            self.reset_pan();
        }
    }

    pub fn set_container(&mut self, width_px: f64, height_px: f64) {
        self.container = (width_px, height_px);
    }

    pub fn pan_to(&mut self, offset: Vector2<f64>) {
        self.offset = offset;
    }

    pub fn pan_by(&mut self, delta: Vector2<f64>) {
        self.offset += delta;
    }

    /// Start a drag at screen `point`; later moves keep the grab point fixed.
    pub fn begin_drag(&mut self, point: Vector2<f64>) {
        self.drag_anchor = Some(point - self.offset);
    }

    pub fn drag_to(&mut self, point: Vector2<f64>) {
        if let Some(anchor) = self.drag_anchor {
            self.offset = point - anchor;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.real_size {
            DisplayMode::RealSize {
                paper: self.paper,
                dpi: self.dpi,
            }
        } else {
            DisplayMode::FitToContainer {
                natural_width_px: self.image_size.0,
                natural_height_px: self.image_size.1,
                container_width_px: self.container.0,
                container_height_px: self.container.1,
            }
        }
    }

    /// Layout for the current state. Empty until an image size is known.
    pub fn layout(&self) -> Layout {
        if self.image_size.0 == 0 || self.image_size.1 == 0 {
            return Layout::EMPTY;
        }
        resolve_layout(&self.display_mode(), self.dpi)
    }

    /// Screen-from-canvas transform of the overlay (the pan offset).
    pub fn overlay_transform(&self) -> Matrix3<f64> {
        translation(self.offset.x, self.offset.y)
    }

    pub fn screen_to_canvas(&self, point: Vector2<f64>) -> Option<Vector2<f64>> {
        invert_point(&self.overlay_transform(), [point.x, point.y]).map(|p| Vector2::new(p[0], p[1]))
    }

    /// 1-based `(row, column)` of the grid cell under a screen point.
    pub fn cell_at(&self, point: Vector2<f64>, geometry: &GridGeometry) -> Option<(usize, usize)> {
        let p = self.screen_to_canvas(point)?;
        geometry.cell_at(p.x, p.y)
    }

    fn reset_pan(&mut self) {
        debug!(
            "Viewport::reset_pan real_size={} paper={} image={}x{}",
            self.real_size, self.paper, self.image_size.0, self.image_size.1
        );
        self.offset = Vector2::zeros();
        self.drag_anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::generate_grid;
    use crate::types::GridSpec;

    fn loaded() -> Viewport {
        let mut vp = Viewport::new(PaperSize::A4, 113);
        vp.set_image_size(800, 1131);
        vp.set_container(1200.0, 900.0);
        vp
    }

    #[test]
    fn mode_switch_round_trip_resets_pan() {
        let mut vp = loaded();
        vp.pan_to(Vector2::new(40.0, -25.0));
        vp.toggle_real_size();
        assert_eq!(vp.offset(), Vector2::zeros());
        vp.pan_by(Vector2::new(10.0, 10.0));
        vp.toggle_real_size();
        assert!(!vp.is_real_size());
        assert_eq!(vp.offset(), Vector2::zeros());
    }

    #[test]
    fn paper_change_resets_pan_but_container_resize_does_not() {
        let mut vp = loaded();
        vp.pan_to(Vector2::new(5.0, 6.0));
        vp.set_container(600.0, 400.0);
        assert_eq!(vp.offset(), Vector2::new(5.0, 6.0));
        vp.set_paper(PaperSize::A3);
        assert_eq!(vp.offset(), Vector2::zeros());
    }

    #[test]
    fn drag_keeps_grab_point() {
        let mut vp = loaded();
        vp.pan_to(Vector2::new(10.0, 0.0));
        vp.begin_drag(Vector2::new(100.0, 100.0));
        vp.drag_to(Vector2::new(130.0, 80.0));
        assert_eq!(vp.offset(), Vector2::new(40.0, -20.0));
        vp.end_drag();
        vp.drag_to(Vector2::new(0.0, 0.0));
        assert_eq!(vp.offset(), Vector2::new(40.0, -20.0));
    }

    #[test]
    fn no_image_means_empty_layout() {
        let mut vp = Viewport::new(PaperSize::A4, 113);
        vp.set_real_size(true);
        assert!(vp.layout().canvas.is_empty());
    }

    #[test]
    fn cell_hit_test_accounts_for_pan() {
        let mut vp = loaded();
        vp.set_real_size(true);
        let layout = vp.layout();
        let geometry = generate_grid(layout.canvas, &GridSpec::default(), layout.scale);
        vp.pan_to(Vector2::new(100.0, 50.0));
        let cell_w = geometry.cell_width_px;
        let cell_h = geometry.cell_height_px;
        let hit = vp.cell_at(
            Vector2::new(100.0 + 2.5 * cell_w, 50.0 + 0.5 * cell_h),
            &geometry,
        );
        assert_eq!(hit, Some((1, 3)));
        assert_eq!(vp.cell_at(Vector2::new(0.0, 0.0), &geometry), None);
    }
}
