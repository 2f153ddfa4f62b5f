use image::RgbaImage;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one decoded image instance. A fresh upload or crop always gets
/// a new id, so work bound to an old image can tell it apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImageId(u64);

impl ImageId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ImageId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img#{}", self.0)
    }
}

/// Cropped RGBA raster. Read-only once constructed.
#[derive(Clone, Debug)]
pub struct SourceImage {
    id: ImageId,
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self::with_id(ImageId::next(), pixels)
    }

    pub fn with_id(id: ImageId, pixels: RgbaImage) -> Self {
        Self { id, pixels }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Natural width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn natural_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
