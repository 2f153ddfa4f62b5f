use grid_overlay::image::io::encode_png;
use image::{Rgba, RgbaImage};

/// Generates a two-color RGBA checkerboard.
pub fn checkerboard_rgba(width: u32, height: u32, cell: u32, a: [u8; 3], b: [u8; 3]) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, bl] = if ((x / cell) + (y / cell)) & 1 == 0 { a } else { b };
        Rgba([r, g, bl, 255])
    })
}

/// PNG bytes of a single-color image.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]));
    encode_png(&img).expect("encode synthetic png")
}
