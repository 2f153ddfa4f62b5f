use crate::paper::PaperSize;
use crate::types::GridSpec;
use crate::units::DEFAULT_DPI;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub paper: PaperSize,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default)]
    pub grid: GridSpec,
    /// Centre-crop the input to the paper aspect before use.
    #[serde(default = "default_crop")]
    pub crop: bool,
    #[serde(default)]
    pub view: ViewConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub real_size: bool,
    /// Container size `[width, height]` in pixels for fit mode.
    pub container: [f64; 2],
    /// Pan offset `[x, y]` in pixels.
    pub pan: [f64; 2],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            real_size: false,
            container: [1280.0, 800.0],
            pan: [0.0, 0.0],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory the PNG export is written into.
    pub dir: PathBuf,
    #[serde(default)]
    pub preview_svg: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_crop() -> bool {
    true
}

/// Read and validate a runtime config.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Invalid config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<RuntimeConfig, String> {
    let config: RuntimeConfig = serde_json::from_str(data).map_err(|e| e.to_string())?;
    if config.dpi == 0 {
        return Err("dpi must be > 0".to_string());
    }
    config.grid.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
