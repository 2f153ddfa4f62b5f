//! Crop collaborator seam.
//!
//! The interactive crop widget lives outside the crate; whatever it is, it
//! takes the uploaded raster and a target aspect and either hands back a
//! cropped raster or cancels.
use image::{imageops, RgbaImage};

pub trait Cropper {
    /// Crop `image` to `aspect` (width / height). `None` means cancelled.
    fn crop(&self, image: &RgbaImage, aspect: f64) -> Option<RgbaImage>;
}

/// Largest centred rectangle with the requested aspect.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenterCrop;

impl Cropper for CenterCrop {
    fn crop(&self, image: &RgbaImage, aspect: f64) -> Option<RgbaImage> {
        let (x, y, w, h) = center_rect(image.width(), image.height(), aspect)?;
        Some(imageops::crop_imm(image, x, y, w, h).to_image())
    }
}

/// An explicit pixel rectangle, as chosen in an interactive widget. The
/// rectangle is clamped to the image; the aspect is assumed to be enforced
/// by whoever picked it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Cropper for RectCrop {
    fn crop(&self, image: &RgbaImage, _aspect: f64) -> Option<RgbaImage> {
        let (iw, ih) = image.dimensions();
        if self.x >= iw || self.y >= ih {
            return None;
        }
        let w = self.width.min(iw - self.x);
        let h = self.height.min(ih - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(imageops::crop_imm(image, self.x, self.y, w, h).to_image())
    }
}

/// `(x, y, w, h)` of the largest centred `aspect` rectangle inside `w × h`.
pub fn center_rect(width: u32, height: u32, aspect: f64) -> Option<(u32, u32, u32, u32)> {
    if width == 0 || height == 0 || !aspect.is_finite() || aspect <= 0.0 {
        return None;
    }
    let (fw, fh) = (width as f64, height as f64);
    let (cw, ch) = if fw / fh > aspect {
        ((fh * aspect).round().max(1.0), fh)
    } else {
        (fw, (fw / aspect).round().max(1.0))
    };
    let (cw, ch) = ((cw as u32).min(width), (ch as u32).min(height));
    Some(((width - cw) / 2, (height - ch) / 2, cw, ch))
}
