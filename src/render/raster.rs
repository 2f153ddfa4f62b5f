//! Pixel-buffer operations used by the exporter.
//!
//! Strokes are composited row by row; within a row every stroke is applied in
//! input order, so the `parallel` feature produces the same bytes as the
//! serial path.
use crate::grid::Line;
use crate::types::Rgb;
use image::RgbaImage;

/// Replace every pixel's RGB with the unweighted mean of its channels,
/// rounded to nearest. Alpha is left as is.
pub fn grayscale_average(image: &mut RgbaImage) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        image.par_chunks_exact_mut(4).for_each(average_pixel);
    }
    #[cfg(not(feature = "parallel"))]
    {
        image.chunks_exact_mut(4).for_each(average_pixel);
    }
}

#[inline]
fn average_pixel(px: &mut [u8]) {
    let sum = px[0] as u16 + px[1] as u16 + px[2] as u16;
    let avg = ((sum + 1) / 3) as u8;
    px[0] = avg;
    px[1] = avg;
    px[2] = avg;
}

/// A line segment with its paint, ready for compositing.
#[derive(Clone, Copy, Debug)]
pub struct Stroke {
    pub line: Line,
    pub color: Rgb,
    pub width: f64,
}

impl Stroke {
    pub fn new(line: Line, color: Rgb, width: f64) -> Self {
        Self { line, color, width }
    }
}

/// Precomputed per-stroke terms: unit direction, length and pixel bounds.
struct Prepared {
    ax: f64,
    ay: f64,
    dx: f64,
    dy: f64,
    len: f64,
    half_width: f64,
    color: [f64; 3],
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Prepared {
    fn new(stroke: &Stroke, width: u32, height: u32) -> Option<Self> {
        let l = &stroke.line;
        let len = l.length();
        let half_width = 0.5 * stroke.width;
        if !len.is_finite() || len <= 0.0 || !(half_width > 0.0) || width == 0 || height == 0 {
            return None;
        }
        let pad = half_width + 1.0;
        let min_x = (l.x1.min(l.x2) - pad).floor().max(0.0);
        let max_x = (l.x1.max(l.x2) + pad).ceil().min(width as f64 - 1.0);
        let min_y = (l.y1.min(l.y2) - pad).floor().max(0.0);
        let max_y = (l.y1.max(l.y2) + pad).ceil().min(height as f64 - 1.0);
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some(Self {
            ax: l.x1,
            ay: l.y1,
            dx: (l.x2 - l.x1) / len,
            dy: (l.y2 - l.y1) / len,
            len,
            half_width,
            color: [
                stroke.color.r as f64,
                stroke.color.g as f64,
                stroke.color.b as f64,
            ],
            x0: min_x as usize,
            x1: max_x as usize,
            y0: min_y as usize,
            y1: max_y as usize,
        })
    }

    /// Butt-capped, box-filtered coverage of the pixel whose centre is
    /// `(px, py)`.
    #[inline]
    fn coverage(&self, px: f64, py: f64) -> f64 {
        let rx = px - self.ax;
        let ry = py - self.ay;
        let along = rx * self.dx + ry * self.dy;
        let across = (rx * self.dy - ry * self.dx).abs();
        let c_across = (self.half_width - across + 0.5).clamp(0.0, 1.0);
        let c_along = (along.min(self.len - along) + 0.5).clamp(0.0, 1.0);
        c_across * c_along
    }

    fn paint_row(&self, y: usize, row: &mut [u8]) {
        if y < self.y0 || y > self.y1 {
            return;
        }
        let py = y as f64 + 0.5;
        for x in self.x0..=self.x1 {
            let a = self.coverage(x as f64 + 0.5, py);
            if a <= 0.0 {
                continue;
            }
            let px = &mut row[4 * x..4 * x + 4];
            for c in 0..3 {
                let v = self.color[c] * a + px[c] as f64 * (1.0 - a);
                px[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            let alpha = 255.0 * a + px[3] as f64 * (1.0 - a);
            px[3] = alpha.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Composite `strokes` onto `image` in order (source-over, anti-aliased).
pub fn composite_strokes(image: &mut RgbaImage, strokes: &[Stroke]) {
    let (w, h) = image.dimensions();
    let prepared: Vec<Prepared> = strokes
        .iter()
        .filter_map(|s| Prepared::new(s, w, h))
        .collect();
    if prepared.is_empty() {
        return;
    }
    let row_len = 4 * w as usize;
    let paint = |(y, row): (usize, &mut [u8])| {
        for p in &prepared {
            p.paint_row(y, row);
        }
    };
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        image.par_chunks_exact_mut(row_len).enumerate().for_each(paint);
    }
    #[cfg(not(feature = "parallel"))]
    {
        image.chunks_exact_mut(row_len).enumerate().for_each(paint);
    }
}
