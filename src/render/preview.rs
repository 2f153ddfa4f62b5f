//! Preview renderer: the displayed image plus an SVG vector overlay.
//!
//! The scene is sized to the resolved canvas and translated by the pan
//! offset. Grayscale here is a non-destructive SVG filter; the pixel data is
//! never touched.
use crate::grid::generator::LABEL_FONT_SIZE;
use crate::grid::{generate_grid, GridGeometry, Line};
use crate::layout::{DisplayedCanvas, Layout};
use crate::transform::{fmt_num, svg_matrix, translation};
use crate::types::{GridSpec, Rgb, DIAGONAL_COLOR};
use nalgebra::Vector2;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewScene {
    pub canvas: DisplayedCanvas,
    pub offset: Vector2<f64>,
    /// Real-size stretches the image to the box; fit keeps its aspect.
    pub real_size: bool,
    pub grayscale: bool,
    pub grid_color: Rgb,
    pub stroke_width_px: f64,
    pub image_href: String,
    pub geometry: GridGeometry,
}

/// Build the preview for a resolved layout. `None` while there is nothing to
/// show (image or container not ready).
pub fn build_preview(
    layout: &Layout,
    spec: &GridSpec,
    offset: Vector2<f64>,
    real_size: bool,
    image_href: &str,
) -> Option<PreviewScene> {
    if layout.canvas.is_empty() {
        return None;
    }
    Some(PreviewScene {
        canvas: layout.canvas,
        offset,
        real_size,
        grayscale: spec.grayscale,
        grid_color: spec.color,
        stroke_width_px: spec.stroke_width_px,
        image_href: image_href.to_string(),
        geometry: generate_grid(layout.canvas, spec, layout.scale),
    })
}

impl PreviewScene {
    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    fn write_line(f: &mut fmt::Formatter<'_>, l: &Line) -> fmt::Result {
        writeln!(
            f,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            fmt_num(l.x1),
            fmt_num(l.y1),
            fmt_num(l.x2),
            fmt_num(l.y2)
        )
    }
}

impl fmt::Display for PreviewScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = fmt_num(self.canvas.width_px);
        let h = fmt_num(self.canvas.height_px);
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" overflow="visible">"#
        )?;
        if self.grayscale {
            writeln!(
                f,
                r#"  <defs><filter id="grayscale"><feColorMatrix type="saturate" values="0"/></filter></defs>"#
            )?;
        }
        let m = translation(self.offset.x, self.offset.y);
        writeln!(f, r#"  <g transform="{}">"#, svg_matrix(&m))?;

        let aspect = if self.real_size { "none" } else { "xMidYMid meet" };
        let filter = if self.grayscale {
            r#" filter="url(#grayscale)""#
        } else {
            ""
        };
        writeln!(
            f,
            r#"  <image href="{}" x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="{aspect}"{filter}/>"#,
            escape_attr(&self.image_href)
        )?;

        let stroke = fmt_num(self.stroke_width_px);
        if self.geometry.structural_lines().next().is_some() {
            writeln!(
                f,
                r#"   <g stroke="{}" stroke-width="{stroke}">"#,
                self.grid_color
            )?;
            for l in self.geometry.structural_lines() {
                Self::write_line(f, l)?;
            }
            writeln!(f, "   </g>")?;
        }
        if self.geometry.diagonal_lines().next().is_some() {
            writeln!(
                f,
                r#"   <g stroke="{}" stroke-width="{stroke}">"#,
                DIAGONAL_COLOR
            )?;
            for l in self.geometry.diagonal_lines() {
                Self::write_line(f, l)?;
            }
            writeln!(f, "   </g>")?;
        }
        if !self.geometry.labels.is_empty() {
            writeln!(
                f,
                r#"   <g fill="{}" font-size="{}" font-family="sans-serif">"#,
                self.grid_color,
                fmt_num(LABEL_FONT_SIZE)
            )?;
            for label in &self.geometry.labels {
                writeln!(
                    f,
                    r#"    <text x="{}" y="{}">{}</text>"#,
                    fmt_num(label.x),
                    fmt_num(label.y),
                    escape_text(&label.text)
                )?;
            }
            writeln!(f, "   </g>")?;
        }
        writeln!(f, "  </g>")?;
        f.write_str("</svg>\n")
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = escape_text(s);
    if out.contains('"') {
        out = out.replace('"', "&quot;");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ReferenceScale;

    fn layout(w: f64, h: f64, s: f64) -> Layout {
        Layout {
            canvas: DisplayedCanvas::new(w, h),
            scale: ReferenceScale::new(s, s),
            zoom: 1.0,
        }
    }

    #[test]
    fn empty_layout_renders_nothing() {
        let scene = build_preview(&Layout::EMPTY, &GridSpec::default(), Vector2::zeros(), false, "x.png");
        assert!(scene.is_none());
    }

    #[test]
    fn svg_contains_every_line_and_label() {
        let spec = GridSpec {
            show_diagonal: true,
            ..Default::default()
        };
        let scene = build_preview(&layout(40.0, 30.0, 1.0), &spec, Vector2::new(7.0, -3.0), true, "a&b.png")
            .unwrap();
        let svg = scene.to_svg();
        assert_eq!(svg.matches("<line ").count(), scene.geometry.lines.len());
        assert_eq!(svg.matches("<text ").count(), scene.geometry.labels.len());
        assert!(svg.contains(r#"transform="matrix(1 0 0 1 7 -3)""#));
        assert!(svg.contains(r#"href="a&amp;b.png""#));
        assert!(svg.contains(r#"preserveAspectRatio="none""#));
        assert!(svg.contains(r##"stroke="#ff6b6b""##));
        assert!(!svg.contains("grayscale"));
    }

    #[test]
    fn grayscale_is_a_filter_only() {
        let spec = GridSpec {
            grayscale: true,
            ..Default::default()
        };
        let svg = build_preview(&layout(20.0, 20.0, 1.0), &spec, Vector2::zeros(), false, "i.png")
            .unwrap()
            .to_svg();
        assert!(svg.contains(r#"filter="url(#grayscale)""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
    }

    #[test]
    fn svg_coordinates_match_geometry_exactly() {
        let s = crate::units::px_per_mm(113);
        let spec = GridSpec {
            gap_mm: 1.5,
            show_diagonal: true,
            ..Default::default()
        };
        let scene = build_preview(&layout(210.0 * s, 297.0 * s, s), &spec, Vector2::zeros(), true, "i.png")
            .unwrap();
        let svg = scene.to_svg();
        let xs: Vec<f64> = svg
            .split(r#"<line x1=""#)
            .skip(1)
            .map(|rest| rest.split('"').next().unwrap().parse().unwrap())
            .collect();
        let expected: Vec<f64> = scene
            .geometry
            .structural_lines()
            .chain(scene.geometry.diagonal_lines())
            .map(|l| l.x1)
            .collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn hidden_grid_keeps_image_only() {
        let spec = GridSpec {
            show_grid: false,
            ..Default::default()
        };
        let scene = build_preview(&layout(50.0, 50.0, 1.0), &spec, Vector2::zeros(), false, "i.png").unwrap();
        let svg = scene.to_svg();
        assert!(svg.contains("<image "));
        assert!(!svg.contains("<line "));
        assert!(!svg.contains("<text "));
    }
}
