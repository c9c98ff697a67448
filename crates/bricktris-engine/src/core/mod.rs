pub use self::{grid::*, tetromino::*};

pub(crate) mod grid;
pub(crate) mod tetromino;

/// Number of rows in the playfield.
pub const HEIGHT: usize = 20;
/// Number of columns in the playfield.
pub const WIDTH: usize = 10;

/// Number of cells every tetromino occupies.
pub const CELLS_IN_TETROMINO: usize = 4;
/// Rows of the bounding box a canonical tetromino layout is drawn in.
pub const TETROMINO_HEIGHT: usize = 2;
/// Columns of the bounding box a canonical tetromino layout is drawn in.
pub const TETROMINO_WIDTH: usize = 4;
