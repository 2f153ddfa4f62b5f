//! The two consumers of grid geometry: the SVG preview and the PNG export.
pub mod export;
pub mod preview;
pub mod raster;

pub use self::export::{export_file_name, export_png, rasterize, ExportArtifact, Rasterized};
pub use self::preview::{build_preview, PreviewScene};
