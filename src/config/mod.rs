//! JSON runtime configuration for the command-line tools.
pub mod runtime;

pub use self::runtime::{load_config, OutputConfig, RuntimeConfig, ViewConfig};
