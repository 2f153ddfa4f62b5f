use grid_overlay::app::{open_session, write_preview};
use grid_overlay::config::load_config;
use grid_overlay::image::io::write_json_file;
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

    if let Some(svg_path) = &config.output.preview_svg {
        write_preview(&mut session, &config, svg_path)?;
        println!("Saved preview to {}", svg_path.display());
    }

    let job = session.export_job().ok_or("No image loaded")?;
    let artifact = job.run().map_err(|e| e.to_string())?;
    let path = artifact.save_to(&config.output.dir).map_err(|e| e.to_string())?;
    println!(
        "Saved {}x{} export to {} ({} x {} cells)",
        artifact.report.width,
        artifact.report.height,
        path.display(),
        artifact.report.num_cols,
        artifact.report.num_rows
    );

    if let Some(report_path) = &config.output.report_json {
        write_json_file(report_path, &artifact.report)?;
        println!("Saved export report to {}", report_path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: grid_overlay <config.json>".to_string()
}
