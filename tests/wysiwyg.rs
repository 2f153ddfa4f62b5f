mod common;

use common::synthetic_image::checkerboard_rgba;
use grid_overlay::grid::LineKind;
use grid_overlay::image::{DecodeHandle, SourceImage};
use grid_overlay::render::export::export_layout;
use grid_overlay::render::rasterize;
use grid_overlay::types::DIAGONAL_COLOR;
use grid_overlay::{generate_grid, DiagonalStyle, GridSpec, PaperSize, Rgb, Session};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn white_source(w: u32, h: u32) -> SourceImage {
    SourceImage::new(RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])))
}

#[test]
fn real_size_preview_and_export_share_geometry() {
    init_logging();
    let spec = GridSpec {
        col_pitch_mm: 7.5,
        row_pitch_mm: 12.0,
        gap_mm: 0.5,
        show_diagonal: true,
        ..Default::default()
    };
    let mut session = Session::new(PaperSize::A4, 113);
    session.set_spec(spec.clone());
    session.set_image(DecodeHandle::ready(white_source(300, 424)));
    session.set_container(640.0, 480.0);
    session.toggle_real_size();

    let scene = session.preview("img.png").expect("real-size preview");
    let exported = rasterize(&white_source(300, 424), &spec, PaperSize::A4, 113).unwrap();

    assert_eq!(scene.canvas, export_layout(PaperSize::A4, 113).canvas);
    assert_eq!(scene.geometry.lines, exported.geometry.lines);
    assert_eq!(exported.image.dimensions(), (934, 1321));
}

#[test]
fn fit_preview_keeps_cell_fraction_of_image() {
    init_logging();
    let spec = GridSpec::default();
    let mut session = Session::new(PaperSize::A4, 113);
    session.set_spec(spec.clone());
    session.set_image(DecodeHandle::ready(white_source(934, 1321)));

    session.set_container(2000.0, 2000.0);
    let full = session.preview("img.png").unwrap();
    session.set_container(467.0, 2000.0);
    let half = session.preview("img.png").unwrap();

    assert_eq!(full.geometry.num_cols, half.geometry.num_cols);
    assert_eq!(full.geometry.num_rows, half.geometry.num_rows);
    let full_frac = full.geometry.cell_width_px / full.canvas.width_px;
    let half_frac = half.geometry.cell_width_px / half.canvas.width_px;
    assert!((full_frac - half_frac).abs() < 1e-12);
}

#[test]
fn grayscale_export_is_unweighted_average() {
    init_logging();
    let pixels = checkerboard_rgba(37, 52, 5, [200, 30, 90], [12, 250, 7]);
    let source = SourceImage::new(pixels.clone());
    let spec = GridSpec {
        grayscale: true,
        show_grid: false,
        ..Default::default()
    };
    let out = rasterize(&source, &spec, PaperSize::A5, 40).unwrap();

    let (w, h) = out.image.dimensions();
    let reference = imageops::resize(&pixels, w, h, FilterType::Triangle);
    for (got, orig) in out.image.pixels().zip(reference.pixels()) {
        let [r, g, b, a] = got.0;
        assert_eq!(r, g);
        assert_eq!(g, b);
        let sum = orig.0[0] as u16 + orig.0[1] as u16 + orig.0[2] as u16;
        assert_eq!(r as u16, (sum + 1) / 3, "orig={:?}", orig.0);
        assert_eq!(a, orig.0[3]);
    }
}

#[test]
fn grid_and_diagonal_pixels_use_their_colors() {
    init_logging();
    // 254 dpi gives exactly 10 px/mm, so a 10 mm cell is 100 px.
    let spec = GridSpec {
        stroke_width_px: 2.0,
        color: Rgb::new(0, 0, 255),
        show_diagonal: true,
        diagonal_style: DiagonalStyle::TopLeftToBottomRight,
        ..Default::default()
    };
    let out = rasterize(&white_source(10, 14), &spec, PaperSize::A5, 254).unwrap();
    assert_eq!(out.image.dimensions(), (1480, 2100));
    assert_eq!(out.geometry.cell_width_px, 100.0);

    let blue = [0, 0, 255, 255];
    let pink = [DIAGONAL_COLOR.r, DIAGONAL_COLOR.g, DIAGONAL_COLOR.b, 255];
    assert_eq!(out.image.get_pixel(100, 50).0, blue);
    assert_eq!(out.image.get_pixel(99, 50).0, blue);
    assert_eq!(out.image.get_pixel(50, 200).0, blue);
    assert_eq!(out.image.get_pixel(50, 50).0, pink);
    assert_eq!(out.image.get_pixel(150, 130).0, [255, 255, 255, 255]);
}

#[test]
fn export_has_no_labels() {
    let spec = GridSpec::default();
    let layout = export_layout(PaperSize::A3, 113);
    let geometry = generate_grid(layout.canvas, &spec, layout.scale);
    assert!(!geometry.labels.is_empty());
    let out = rasterize(&white_source(8, 8), &spec, PaperSize::A3, 113).unwrap();
    let painted = out.geometry.lines.len();
    assert_eq!(
        painted,
        geometry.lines_of(LineKind::Vertical).count() + geometry.lines_of(LineKind::Horizontal).count()
    );
}
