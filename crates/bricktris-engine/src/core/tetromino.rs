use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{CELLS_IN_TETROMINO, TETROMINO_HEIGHT, TETROMINO_WIDTH, WIDTH};

/// Grid coordinate of a single cell.
///
/// `x` is the column (growing rightward) and `y` is the row (growing downward),
/// both measured from the top-left corner of the playfield. Coordinates are
/// signed so that a translated or rotated piece can be expressed even when it
/// pokes outside the field; such positions are rejected by the collision test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn coord(n: usize) -> i32 {
    n as i32
}

/// Enum representing the kind of tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum TetrominoKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<TetrominoKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TetrominoKind {
        TetrominoKind::ALL[rng.random_range(0..TetrominoKind::LEN)]
    }
}

impl TetrominoKind {
    /// Number of tetromino kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Returns the canonical layout of this kind inside its 2×4 bounding box.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self as usize]
    }

    /// Color tag stored in the grid for cells of this kind.
    ///
    /// Tags run from 1 to 7; 0 is reserved for an empty cell.
    #[must_use]
    pub const fn color(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the single character representation of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use bricktris_engine::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::I.as_char(), 'I');
    /// assert_eq!(TetrominoKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            TetrominoKind::I => 'I',
            TetrominoKind::J => 'J',
            TetrominoKind::L => 'L',
            TetrominoKind::O => 'O',
            TetrominoKind::S => 'S',
            TetrominoKind::T => 'T',
            TetrominoKind::Z => 'Z',
        }
    }

    /// Parses a kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use bricktris_engine::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::from_char('O'), Some(TetrominoKind::O));
    /// assert_eq!(TetrominoKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(TetrominoKind::I),
            'J' => Some(TetrominoKind::J),
            'L' => Some(TetrominoKind::L),
            'O' => Some(TetrominoKind::O),
            'S' => Some(TetrominoKind::S),
            'T' => Some(TetrominoKind::T),
            'Z' => Some(TetrominoKind::Z),
            _ => None,
        }
    }
}

/// Relative layout of a tetromino: four cells measured from the top-left
/// corner of the 2×4 bounding box.
///
/// Rotation is computed geometrically every time instead of being looked up
/// from a per-orientation table, so a `Shape` carries no orientation state.
/// After rotation some cells may lie outside the original box (row `-1` or
/// row `2`); that is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: TetrominoKind,
    cells: [Position; CELLS_IN_TETROMINO],
}

// Doubled coordinates of the bounding box centre, (1.5, 0.5) in cell units.
const PIVOT_X2: i32 = coord(TETROMINO_WIDTH) - 1;
const PIVOT_Y2: i32 = coord(TETROMINO_HEIGHT) - 1;
const _: () = assert!((PIVOT_X2 + PIVOT_Y2) % 2 == 0);

impl Shape {
    #[must_use]
    pub const fn kind(&self) -> TetrominoKind {
        self.kind
    }

    #[must_use]
    pub const fn cells(&self) -> &[Position; CELLS_IN_TETROMINO] {
        &self.cells
    }

    /// Returns the layout rotated 90° clockwise about the bounding box centre.
    ///
    /// The `O` piece is symmetric under rotation and is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use bricktris_engine::TetrominoKind;
    ///
    /// let t = TetrominoKind::T.shape();
    /// assert_eq!(t.rotated().rotated().rotated().rotated(), t);
    /// assert_eq!(TetrominoKind::O.shape().rotated(), TetrominoKind::O.shape());
    /// ```
    #[must_use]
    pub const fn rotated(self) -> Self {
        if matches!(self.kind, TetrominoKind::O) {
            return self;
        }
        let mut cells = self.cells;
        let mut i = 0;
        while i < CELLS_IN_TETROMINO {
            let Position { x, y } = self.cells[i];
            // (x, y) -> (c_x + c_y - y, c_y - c_x + x), halved back to cell units
            cells[i] = Position::new(
                (PIVOT_X2 + PIVOT_Y2) / 2 - y,
                (PIVOT_Y2 - PIVOT_X2) / 2 + x,
            );
            i += 1;
        }
        Self {
            kind: self.kind,
            cells,
        }
    }

    const fn from_mask(
        kind: TetrominoKind,
        mask: [[bool; TETROMINO_WIDTH]; TETROMINO_HEIGHT],
    ) -> Self {
        let mut cells = [Position::new(0, 0); CELLS_IN_TETROMINO];
        let mut n = 0;
        let mut y = 0;
        while y < TETROMINO_HEIGHT {
            let mut x = 0;
            while x < TETROMINO_WIDTH {
                if mask[y][x] {
                    cells[n] = Position::new(coord(x), coord(y));
                    n += 1;
                }
                x += 1;
            }
            y += 1;
        }
        assert!(n == CELLS_IN_TETROMINO);
        Self { kind, cells }
    }
}

const SHAPES: [Shape; TetrominoKind::LEN] = {
    use TetrominoKind as K;
    const C: bool = true;
    const E: bool = false;
    [
        Shape::from_mask(K::I, [[C, C, C, C], [E, E, E, E]]),
        Shape::from_mask(K::J, [[C, E, E, E], [C, C, C, E]]),
        Shape::from_mask(K::L, [[E, E, C, E], [C, C, C, E]]),
        Shape::from_mask(K::O, [[E, C, C, E], [E, C, C, E]]),
        Shape::from_mask(K::S, [[E, C, C, E], [C, C, E, E]]),
        Shape::from_mask(K::T, [[E, C, E, E], [C, C, C, E]]),
        Shape::from_mask(K::Z, [[C, C, E, E], [E, C, C, E]]),
    ]
};

/// The falling tetromino: a relative [`Shape`] anchored at the top-left
/// corner of its bounding box.
///
/// Pieces are immutable. Movement and rotation return new `Tetromino` values
/// which the caller checks against the grid before adopting.
///
/// # Example
///
/// ```
/// use bricktris_engine::{Position, Tetromino, TetrominoKind};
///
/// let piece = Tetromino::spawn(TetrominoKind::O);
/// assert_eq!(piece.origin(), Position::new(3, 0));
/// assert!(piece.cells().contains(&Position::new(4, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    origin: Position,
    shape: Shape,
}

impl Tetromino {
    /// Bounding box origin for a freshly spawned piece: top row, horizontally
    /// centred.
    pub const SPAWN_ORIGIN: Position = Position::new(coord((WIDTH - TETROMINO_WIDTH) / 2), 0);

    #[must_use]
    pub const fn spawn(kind: TetrominoKind) -> Self {
        Self {
            origin: Self::SPAWN_ORIGIN,
            shape: kind.shape(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TetrominoKind {
        self.shape.kind
    }

    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Absolute grid positions of the four cells.
    #[must_use]
    pub fn cells(&self) -> [Position; CELLS_IN_TETROMINO] {
        self.shape
            .cells
            .map(|cell| cell.translated(self.origin.x, self.origin.y))
    }

    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.translated(dx, dy),
            shape: self.shape,
        }
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Rotates 90° clockwise keeping the bounding box (and so the pivot) in
    /// place.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self {
            origin: self.origin,
            shape: self.shape.rotated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(cells: &[Position]) -> Vec<(i32, i32)> {
        let mut v: Vec<_> = cells.iter().map(|p| (p.y, p.x)).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_every_shape_has_four_cells_inside_box() {
        for kind in TetrominoKind::ALL {
            let shape = kind.shape();
            assert_eq!(shape.kind(), kind);
            for cell in shape.cells() {
                assert!((0..coord(TETROMINO_WIDTH)).contains(&cell.x), "{kind:?}");
                assert!((0..coord(TETROMINO_HEIGHT)).contains(&cell.y), "{kind:?}");
            }
            let mut unique = sorted(shape.cells());
            unique.dedup();
            assert_eq!(unique.len(), CELLS_IN_TETROMINO, "{kind:?}");
        }
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in TetrominoKind::ALL {
            let shape = kind.shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated();
            }
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_o_is_invariant_under_rotation() {
        let o = TetrominoKind::O.shape();
        let mut rotated = o;
        for _ in 0..7 {
            rotated = rotated.rotated();
            assert_eq!(rotated, o);
        }
    }

    #[test]
    fn test_rotation_is_clockwise_about_box_centre() {
        // I: horizontal on row 0 becomes vertical on column 2 spanning rows -1..=2
        let i = TetrominoKind::I.shape().rotated();
        assert_eq!(sorted(i.cells()), vec![(-1, 2), (0, 2), (1, 2), (2, 2)]);

        // T pointing up becomes T pointing right
        let t = TetrominoKind::T.shape().rotated();
        assert_eq!(sorted(t.cells()), vec![(-1, 1), (0, 1), (0, 2), (1, 1)]);
    }

    #[test]
    fn test_two_rotations_differ_for_asymmetric_pieces() {
        for kind in [TetrominoKind::J, TetrominoKind::L, TetrominoKind::T] {
            let shape = kind.shape();
            assert_ne!(
                sorted(shape.rotated().rotated().cells()),
                sorted(shape.cells()),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_spawn_is_top_centre() {
        let piece = Tetromino::spawn(TetrominoKind::I);
        assert_eq!(
            sorted(&piece.cells()),
            vec![(0, 3), (0, 4), (0, 5), (0, 6)]
        );
    }

    #[test]
    fn test_piece_rotation_keeps_pivot() {
        let piece = Tetromino::spawn(TetrominoKind::L).translated(2, 5);
        let rotated = piece.rotated();
        assert_eq!(rotated.origin(), piece.origin());
        assert_eq!(rotated.rotated().rotated().rotated(), piece);
    }

    #[test]
    fn test_translation() {
        let piece = Tetromino::spawn(TetrominoKind::S);
        assert_eq!(piece.left().right(), piece);
        assert_eq!(piece.down().origin(), Position::new(3, 1));
    }

    #[test]
    fn test_color_tags_are_distinct_and_nonzero() {
        let mut colors: Vec<u8> = TetrominoKind::ALL.iter().map(|k| k.color()).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), TetrominoKind::LEN);
        assert!(!colors.contains(&0));
    }

    #[test]
    fn test_kind_char_conversion() {
        for kind in TetrominoKind::ALL {
            assert_eq!(TetrominoKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(TetrominoKind::from_char('x'), None);
    }
}
