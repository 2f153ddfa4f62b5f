pub mod crop;
pub mod decode;
pub mod io;
pub mod source;

pub use self::crop::{CenterCrop, Cropper, RectCrop};
pub use self::decode::DecodeHandle;
pub use self::source::{ImageId, SourceImage};
