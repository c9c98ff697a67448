use std::fmt::Write as _;

use serde::{Serialize, Serializer};

use super::{
    HEIGHT, WIDTH,
    tetromino::{Position, Tetromino, TetrominoKind},
};

/// A single cell of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell left behind by an attached piece of the given kind.
    Filled(TetrominoKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn is_filled(self) -> bool {
        !self.is_empty()
    }

    /// Color tag of the cell; 0 for an empty cell.
    #[must_use]
    pub const fn color(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Filled(kind) => kind.color(),
        }
    }

    const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Filled(kind) => kind.as_char(),
        }
    }
}

/// One row of the playfield.
pub type Row = [Block; WIDTH];

const EMPTY_ROW: Row = [Block::Empty; WIDTH];

/// The fixed-size playfield: `HEIGHT` rows of `WIDTH` cells stored inline in
/// row-major order.
///
/// Every accessor is bounds-checked and takes signed [`Position`]s, so an
/// out-of-field coordinate is simply reported as "not inside" rather than
/// causing a panic. The grid is only written by [`Grid::fill_piece`] (attach)
/// and by the compaction in [`Grid::clear_lines`].
///
/// # Example
///
/// ```
/// use bricktris_engine::{Grid, Position, Tetromino, TetrominoKind};
///
/// let mut grid = Grid::EMPTY;
/// let piece = Tetromino::spawn(TetrominoKind::T);
/// assert!(!grid.is_colliding(&piece));
///
/// grid.fill_piece(&piece);
/// assert_eq!(grid.occupied_count(), 4);
/// assert!(grid.is_colliding(&piece));
/// assert!(grid.is_occupied(Position::new(4, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = WIDTH;
    pub const HEIGHT: usize = HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; HEIGHT],
    };

    fn index(pos: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok().filter(|&x| x < WIDTH)?;
        let y = usize::try_from(pos.y).ok().filter(|&y| y < HEIGHT)?;
        Some((x, y))
    }

    /// Returns `true` if `pos` lies inside `[0, HEIGHT) × [0, WIDTH)`.
    #[must_use]
    pub fn contains(pos: Position) -> bool {
        Self::index(pos).is_some()
    }

    /// Returns the block at `pos`, or `None` when `pos` is outside the field.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Block> {
        Self::index(pos).map(|(x, y)| self.rows[y][x])
    }

    /// Returns `true` if `pos` is inside the field and filled.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Block::is_filled)
    }

    /// The collision test shared by spawn, movement and rotation.
    ///
    /// A piece collides iff any of its cells is outside the field or lands on
    /// a filled cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Tetromino) -> bool {
        piece
            .cells()
            .into_iter()
            .any(|pos| self.get(pos).is_none_or(Block::is_filled))
    }

    /// Copies the piece's cells into the grid, tagged with its kind.
    ///
    /// Cells outside the field are ignored; callers only attach pieces that
    /// passed [`Grid::is_colliding`].
    pub fn fill_piece(&mut self, piece: &Tetromino) {
        for pos in piece.cells() {
            if let Some((x, y)) = Self::index(pos) {
                self.rows[y][x] = Block::Filled(piece.kind());
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, pos: Position, block: Block) {
        let (x, y) = Self::index(pos).expect("position inside grid");
        self.rows[y][x] = block;
    }

    /// Returns row `y`, or `None` when `y` is outside the field.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Returns `true` if every cell of row `y` is filled.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|b| b.is_filled()))
    }

    /// Number of filled cells in the whole field.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|b| b.is_filled())
            .count()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned from top to bottom. Each full row is dropped, every
    /// row above it moves down by one with its contents unchanged, and an
    /// empty row is inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in 0..HEIGHT {
            if self.is_row_full(y) {
                self.rows.copy_within(0..y, 1);
                self.rows[0] = EMPTY_ROW;
                count += 1;
            }
        }
        count
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; HEIGHT];
    }
}

// Rows serialize as strings such as "...IIII..." (one char per cell).
impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows.iter().map(|row| {
            let mut s = String::with_capacity(WIDTH);
            for block in row {
                s.push(block.as_char());
            }
            s
        }))
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            for block in row {
                f.write_char(block.as_char())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
