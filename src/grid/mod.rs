pub mod generator;
pub mod geometry;

pub use self::generator::generate_grid;
pub use self::geometry::{Diagonal, Edge, GridGeometry, Label, Line, LineKind};
