//! ISO A-series paper sizes (portrait).
use crate::units::mm_to_px;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
}

impl PaperSize {
    pub const ALL: [PaperSize; 3] = [PaperSize::A3, PaperSize::A4, PaperSize::A5];

    /// `(width, height)` in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
        }
    }

    /// Width over height; the aspect the crop step targets.
    pub fn aspect_ratio(self) -> f64 {
        let (w, h) = self.dimensions_mm();
        w / h
    }

    /// Unrounded size in pixels at `dpi`.
    pub fn size_px(self, dpi: u32) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        (mm_to_px(w, dpi), mm_to_px(h, dpi))
    }

    /// Raster size at `dpi`, rounded to the nearest pixel.
    pub fn raster_size(self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.size_px(dpi);
        (w.round() as u32, h.round() as u32)
    }

    pub fn label(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_raster_at_113_dpi() {
        assert_eq!(PaperSize::A4.raster_size(113), (934, 1321));
    }

    #[test]
    fn all_sizes_are_portrait() {
        for paper in PaperSize::ALL {
            let (w, h) = paper.dimensions_mm();
            assert!(h > w, "{paper} should be portrait");
            assert!(paper.aspect_ratio() < 1.0);
        }
    }

    #[test]
    fn serde_uses_label() {
        let json = serde_json::to_string(&PaperSize::A5).unwrap();
        assert_eq!(json, "\"A5\"");
        let parsed: PaperSize = serde_json::from_str("\"A3\"").unwrap();
        assert_eq!(parsed, PaperSize::A3);
    }
}
