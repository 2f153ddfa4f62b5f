use thiserror::Error;

/// Errors surfaced by the overlay pipeline.
///
/// Degenerate grid parameters are not errors; they render as an empty grid.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("invalid grid spec: {0}")]
    InvalidSpec(String),
    #[error("not ready: {0}")]
    NotReady(&'static str),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("crop cancelled")]
    CropCancelled,
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("{0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;
