//! Glue between a [`RuntimeConfig`] and a [`Session`] for the binaries.
use crate::config::RuntimeConfig;
use crate::image::io::{encode_png, read_image_bytes, write_bytes, write_text};
use crate::image::CenterCrop;
use crate::session::Session;
use log::info;
use nalgebra::Vector2;
use std::path::{Path, PathBuf};

/// Load the configured image into a fresh session and apply the view
/// settings. Blocks until the image has decoded.
pub fn open_session(config: &RuntimeConfig) -> Result<Session, String> {
    let bytes = read_image_bytes(&config.input)?;
    let mut session = Session::new(config.paper, config.dpi);
    session.set_spec(config.grid.clone());
    if config.crop {
        session.upload(bytes);
        session
            .confirm_crop(&CenterCrop)
            .map_err(|e| format!("Failed to crop {}: {e}", config.input.display()))?;
    } else {
        session.load_image(bytes);
    }
    session
        .wait_for_image()
        .map_err(|e| format!("Failed to load {}: {e}", config.input.display()))?;

    let viewport = session.viewport_mut();
    viewport.set_real_size(config.view.real_size);
    viewport.set_container(config.view.container[0], config.view.container[1]);
    viewport.pan_to(Vector2::new(config.view.pan[0], config.view.pan[1]));
    Ok(session)
}

/// Write the SVG preview to `path`. When the input was cropped, the cropped
/// raster is saved next to it so the overlay references what it was laid
/// out for.
pub fn write_preview(session: &mut Session, config: &RuntimeConfig, path: &Path) -> Result<PathBuf, String> {
    let href = if config.crop {
        let image = session.image().ok_or("No image loaded")?;
        let cropped = path.with_file_name(format!("cropped-{}.png", session.paper()));
        write_bytes(&cropped, &encode_png(image.pixels())?)?;
        cropped
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        config.input.display().to_string()
    };
    let scene = session
        .preview(&href)
        .ok_or("Nothing to preview: image or container not ready")?;
    write_text(path, &scene.to_svg())?;
    info!(
        "preview {:.1}x{:.1} px, {} lines -> {}",
        scene.canvas.width_px,
        scene.canvas.height_px,
        scene.geometry.lines.len(),
        path.display()
    );
    Ok(path.to_path_buf())
}
