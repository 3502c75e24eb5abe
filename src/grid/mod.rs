pub mod cell;
pub mod grid2d;
pub mod traits;

pub use cell::Cell;
pub use grid2d::{Grid2d, WallGrid};
pub use traits::Grid;
