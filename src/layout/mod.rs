//! Layout resolution: how large the image is drawn and how many displayed
//! pixels a millimetre spans.
pub mod mode;
pub mod resolver;
pub mod viewport;

pub use self::mode::{DisplayMode, DisplayedCanvas, Layout, ReferenceScale};
pub use self::resolver::resolve_layout;
pub use self::viewport::Viewport;
