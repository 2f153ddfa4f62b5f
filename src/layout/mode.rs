use crate::paper::PaperSize;
use serde::Serialize;

/// How the image is sized on screen. Recomputed whenever the image, paper or
/// container changes; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayMode {
    /// Fit the natural image into the container, never upscaling past 1:1.
    FitToContainer {
        natural_width_px: u32,
        natural_height_px: u32,
        container_width_px: f64,
        container_height_px: f64,
    },
    /// Stretch the image to the physical paper size at `dpi`.
    RealSize { paper: PaperSize, dpi: u32 },
}

impl DisplayMode {
    pub fn is_real_size(&self) -> bool {
        matches!(self, DisplayMode::RealSize { .. })
    }
}

/// Size, in pixels, every renderer must honour for the current state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedCanvas {
    pub width_px: f64,
    pub height_px: f64,
}

impl DisplayedCanvas {
    pub const EMPTY: DisplayedCanvas = DisplayedCanvas {
        width_px: 0.0,
        height_px: 0.0,
    };

    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// True when there is nothing to draw (image or container not ready).
    pub fn is_empty(&self) -> bool {
        !(self.width_px > 0.0 && self.height_px > 0.0)
    }

    /// Pixel buffer dimensions, rounded to the nearest pixel.
    pub fn raster_size(&self) -> (u32, u32) {
        if self.is_empty() {
            return (0, 0);
        }
        (self.width_px.round() as u32, self.height_px.round() as u32)
    }
}

/// Displayed pixels per millimetre along each axis.
///
/// Equals `displayed width / reference width in mm`, where the reference is
/// the paper in real-size mode and the natural image measured at the session
/// DPI in fit mode. Only real-size mode gives physically correct spans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ReferenceScale {
    pub x: f64,
    pub y: f64,
}

impl ReferenceScale {
    pub const ZERO: ReferenceScale = ReferenceScale { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Resolved layout: canvas size plus the scale the grid generator needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Layout {
    pub canvas: DisplayedCanvas,
    pub scale: ReferenceScale,
    /// Displayed size over natural size in fit mode; 1 in real-size mode.
    pub zoom: f64,
}

impl Layout {
    pub const EMPTY: Layout = Layout {
        canvas: DisplayedCanvas::EMPTY,
        scale: ReferenceScale::ZERO,
        zoom: 0.0,
    };
}
