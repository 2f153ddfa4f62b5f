mod common;

use common::synthetic_image::solid_png;
use grid_overlay::image::{CenterCrop, RectCrop};
use grid_overlay::{Error, GridSpec, PaperSize, Session};
use image::ImageFormat;
use nalgebra::Vector2;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn hidden_grid() -> GridSpec {
    GridSpec {
        show_grid: false,
        ..Default::default()
    }
}

#[test]
fn export_stays_bound_to_requested_image() {
    init_logging();
    let mut session = Session::new(PaperSize::A5, 30);
    session.set_spec(hidden_grid());

    let red = session.load_image(solid_png(64, 90, [255, 0, 0]));
    let job = session.export_job().expect("image requested");
    let blue = session.load_image(solid_png(64, 90, [0, 0, 255]));
    assert_ne!(red, blue);
    assert_eq!(job.image_id(), red);

    let artifact = job.run().unwrap();
    assert_eq!(artifact.report.image_id, red);
    let decoded = image::load_from_memory_with_format(&artifact.bytes, ImageFormat::Png)
        .unwrap()
        .into_rgba8();
    assert!(decoded.pixels().all(|p| p.0 == [255, 0, 0, 255]));

    let newer = session.export_job().unwrap();
    assert_eq!(newer.image_id(), blue);
}

#[test]
fn upload_crop_preview_export_flow() {
    init_logging();
    let mut session = Session::new(PaperSize::A4, 113);
    session.upload(solid_png(500, 500, [10, 20, 30]));
    assert!(session.has_upload());
    session.confirm_crop(&CenterCrop).unwrap();
    let image = session.wait_for_image().unwrap();
    assert_eq!(image.natural_size(), (354, 500));

    session.set_container(800.0, 400.0);
    let fit = session.preview("crop.png").unwrap();
    assert!((fit.canvas.height_px - 400.0).abs() < 1e-9);

    session.viewport_mut().pan_to(Vector2::new(30.0, 12.0));
    session.toggle_real_size();
    let real = session.preview("crop.png").unwrap();
    assert_eq!(real.offset, Vector2::zeros());
    assert_eq!(real.canvas.raster_size(), (934, 1321));

    let artifact = session.export_job().unwrap().run().unwrap();
    assert_eq!(artifact.file_name, "gridded-A4.png");
    assert_eq!((artifact.report.width, artifact.report.height), (934, 1321));
    assert_eq!(artifact.report.num_cols, real.geometry.num_cols);
    assert_eq!(artifact.report.num_rows, real.geometry.num_rows);
}

#[test]
fn new_upload_releases_the_previous_one() {
    init_logging();
    let mut session = Session::default();
    session.upload(solid_png(40, 40, [0, 0, 0]));
    session.upload(solid_png(80, 20, [0, 0, 0]));
    let id = session
        .confirm_crop(&RectCrop {
            x: 0,
            y: 0,
            width: 14,
            height: 20,
        })
        .unwrap();
    let image = session.image().unwrap();
    assert_eq!(image.id(), id);
    assert_eq!(image.natural_size(), (14, 20));
}

#[test]
fn abandoned_crop_leaves_nothing_to_export() {
    init_logging();
    let mut session = Session::default();
    session.upload(solid_png(40, 40, [0, 0, 0]));
    session.cancel_crop();
    assert!(!session.has_upload());
    assert!(session.export_job().is_none());
    assert!(session.preview("x.png").is_none());
    assert_eq!(session.wait_for_image().unwrap_err(), Error::NotReady("no image loaded"));
}

#[test]
fn export_writes_deterministic_file_name() {
    init_logging();
    let mut session = Session::new(PaperSize::A3, 20);
    session.load_image(solid_png(8, 8, [1, 1, 1]));
    let artifact = session.export_job().unwrap().run().unwrap();
    let dir = std::env::temp_dir().join(format!("grid-overlay-test-{}", std::process::id()));
    let path = artifact.save_to(&dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "gridded-A3.png");
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    let _ = std::fs::remove_dir_all(&dir);
}
