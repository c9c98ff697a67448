use serde::Serialize;

use crate::core::{CELLS_IN_TETROMINO, Grid, Position, Tetromino, TetrominoKind};

use super::{GameState, GameStats};

/// The falling piece as seen by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: TetrominoKind,
    /// Absolute grid positions of the four cells.
    pub cells: [Position; CELLS_IN_TETROMINO],
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind(),
            cells: value.cells(),
        }
    }
}

/// Read-only copy of a session, produced after every transition.
///
/// It owns its data, so the session can keep changing while a presentation
/// still holds an older snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: TetrominoKind,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub speed: u32,
    /// Attaches that cleared 1, 2, 3 and 4 lines.
    pub line_clears: [u64; 4],
    pub paused: bool,
    pub state: GameState,
}

impl Snapshot {
    #[must_use]
    pub fn new(
        grid: &Grid,
        active: Option<&Tetromino>,
        next: TetrominoKind,
        stats: &GameStats,
        paused: bool,
        state: GameState,
    ) -> Self {
        let [_, line_clears @ ..] = *stats.line_cleared_counter();
        Self {
            grid: grid.clone(),
            active: active.map(ActiveSnapshot::from),
            next,
            score: stats.score(),
            high_score: stats.high_score(),
            level: stats.level(),
            speed: stats.speed(),
            line_clears,
            paused,
            state,
        }
    }

    /// Cells of the next piece in its canonical layout, relative to the
    /// bounding box.
    #[must_use]
    pub fn next_cells(&self) -> [Position; CELLS_IN_TETROMINO] {
        *self.next.shape().cells()
    }

    /// Kind of the falling piece if it covers `pos`.
    #[must_use]
    pub fn active_kind_at(&self, pos: Position) -> Option<TetrominoKind> {
        self.active
            .filter(|active| active.cells.contains(&pos))
            .map(|active| active.kind)
    }

    /// Whether gameplay is running: a game is in progress and not paused.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.paused && !matches!(self.state, GameState::Start | GameState::GameOver)
    }
}
