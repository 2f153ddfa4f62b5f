//! Millimetre ↔ pixel conversion.
//!
//! Every mm→px conversion in the crate goes through [`mm_to_px`]; the preview
//! and export paths are only consistent as long as nothing does its own
//! arithmetic.

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Screen density assumed when nothing else is configured.
pub const DEFAULT_DPI: u32 = 113;

/// Convert millimetres to pixels at `dpi`.
#[inline]
pub fn mm_to_px(mm: f64, dpi: u32) -> f64 {
    mm * dpi as f64 / MM_PER_INCH
}

/// Convert pixels back to millimetres at `dpi`. Returns 0 for `dpi == 0`.
#[inline]
pub fn px_to_mm(px: f64, dpi: u32) -> f64 {
    if dpi == 0 {
        return 0.0;
    }
    px * MM_PER_INCH / dpi as f64
}

/// Pixels covered by one millimetre at `dpi`.
#[inline]
pub fn px_per_mm(dpi: u32) -> f64 {
    mm_to_px(1.0, dpi)
}
