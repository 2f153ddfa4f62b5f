//! I/O helpers for images, SVG text and JSON.
//!
//! - `read_image_bytes`: read an encoded image file into memory for decoding.
//! - `encode_png`: encode an RGBA raster to PNG bytes.
//! - `write_bytes` / `write_text`: write a file, creating parent directories.
//! - `write_json_file`: pretty-print a serializable value to disk.
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Read an encoded image from disk without decoding it.
pub fn read_image_bytes(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))
}

/// Encode an RGBA raster as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| format!("Failed to encode PNG: {e}"))?;
    Ok(bytes)
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

pub fn write_text(path: &Path, text: &str) -> Result<(), String> {
    write_bytes(path, text.as_bytes())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
