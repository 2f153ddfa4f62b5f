use grid_overlay::app::{open_session, write_preview};
use grid_overlay::config::load_config;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let mut session = open_session(&config)?;

    let svg_path = config
        .output
        .preview_svg
        .clone()
        .unwrap_or_else(|| config.output.dir.join("preview.svg"));
    write_preview(&mut session, &config, &svg_path)?;

    let layout = session.layout();
    println!(
        "{} view: canvas {:.1}x{:.1} px, zoom {:.3}, {:.4} px/mm",
        if session.viewport().is_real_size() {
            "Real-size"
        } else {
            "Fit"
        },
        layout.canvas.width_px,
        layout.canvas.height_px,
        layout.zoom,
        layout.scale.x
    );
    println!("Saved preview to {}", svg_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: grid_preview <config.json>".to_string()
}
