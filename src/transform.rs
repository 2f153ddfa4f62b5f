//! Planar affine helpers on homogeneous 3×3 matrices.
//!
//! The preview overlay is placed with a translation (pan offset) and the
//! mm↔canvas mapping is a pure scaling; both are expressed here so hit-tests
//! and the SVG `transform` attribute come from the same matrix.
use nalgebra::{Matrix3, Vector3};

const EPS: f64 = 1e-12;

pub fn translation(dx: f64, dy: f64) -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0)
}

pub fn scaling(sx: f64, sy: f64) -> Matrix3<f64> {
    Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
}

/// Map points through `m`. Returns `None` if any point lands at infinity.
pub fn apply_points(m: &Matrix3<f64>, pts: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
    let mut out = Vec::with_capacity(pts.len());
    for &p in pts {
        let v = m * Vector3::new(p[0], p[1], 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        out.push([v[0] / w, v[1] / w]);
    }
    Some(out)
}

/// Map a single point through the inverse of `m`.
pub fn invert_point(m: &Matrix3<f64>, p: [f64; 2]) -> Option<[f64; 2]> {
    let inv = m.try_inverse()?;
    apply_points(&inv, &[p]).map(|v| v[0])
}

/// SVG `matrix(a b c d e f)` form of an affine matrix.
pub fn svg_matrix(m: &Matrix3<f64>) -> String {
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_num(m[(0, 0)]),
        fmt_num(m[(1, 0)]),
        fmt_num(m[(0, 1)]),
        fmt_num(m[(1, 1)]),
        fmt_num(m[(0, 2)]),
        fmt_num(m[(1, 2)])
    )
}

/// Shortest decimal that parses back to exactly `v`; integral values print
/// without a fraction and negative zero prints as `0`.
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
