use tracing::{debug, info, warn};

use crate::{
    PieceCollisionError, SpawnBlockedError,
    core::{Grid, Tetromino, TetrominoKind},
};

use super::{
    GameState, GameStats, PieceGenerator, PieceSeed, Snapshot,
    high_score::{HighScoreStore, MemoryHighScoreStore},
};

/// One running game: the field, the falling piece, the next kind, score and
/// progression, the pause flag and the controller state.
///
/// The session owns its [`HighScoreStore`]. The high score is loaded once at
/// creation and written back whenever the score passes it.
///
/// State changes in response to input go through the controller methods
/// [`GameSession::user_input`] and [`GameSession::tick`]; the movement
/// primitives below are the building blocks those transitions are made of.
#[derive(Debug, Clone)]
pub struct GameSession<S = MemoryHighScoreStore> {
    pub(super) grid: Grid,
    pub(super) tetromino: Option<Tetromino>,
    pub(super) next: TetrominoKind,
    pub(super) generator: PieceGenerator,
    pub(super) stats: GameStats,
    pub(super) paused: bool,
    pub(super) state: GameState,
    pub(super) store: S,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(MemoryHighScoreStore::default())
    }
}

impl<S> GameSession<S>
where
    S: HighScoreStore,
{
    /// Creates a session in the `Start` state with a randomly seeded piece
    /// sequence.
    pub fn new(store: S) -> Self {
        Self::with_generator(store, PieceGenerator::new())
    }

    /// Creates a session whose piece sequence is determined by `seed`.
    pub fn with_seed(store: S, seed: PieceSeed) -> Self {
        Self::with_generator(store, PieceGenerator::with_seed(seed))
    }

    fn with_generator(mut store: S, mut generator: PieceGenerator) -> Self {
        let high_score = match store.load_high_score() {
            Ok(high_score) => high_score,
            Err(error) => {
                warn!(%error, "Failed to load high score, starting from 0");
                0
            }
        };
        info!(high_score, "Creating game session");
        let next = generator.next_kind();
        Self {
            grid: Grid::EMPTY,
            tetromino: None,
            next,
            generator,
            stats: GameStats::new(high_score),
            paused: false,
            state: GameState::Start,
            store,
        }
    }

    pub(super) fn save_high_score(&mut self) {
        let high_score = self.stats.high_score();
        match self.store.save_high_score(high_score) {
            Ok(()) => debug!(high_score, "Saved high score"),
            Err(error) => warn!(%error, high_score, "Failed to save high score"),
        }
    }
}

impl<S> GameSession<S> {
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The falling piece, if one exists (only in `Moving`, `Shifting` and
    /// `Attaching`).
    #[must_use]
    pub fn tetromino(&self) -> Option<&Tetromino> {
        self.tetromino.as_ref()
    }

    /// Kind the next spawn will use.
    #[must_use]
    pub fn next_kind(&self) -> TetrominoKind {
        self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            &self.grid,
            self.tetromino.as_ref(),
            self.next,
            &self.stats,
            self.paused,
            self.state,
        )
    }

    /// Whether the next spawn would fit.
    #[must_use]
    pub fn can_spawn(&self) -> bool {
        !self.grid.is_colliding(&Tetromino::spawn(self.next))
    }

    /// Whether moving the falling piece down one row would collide.
    ///
    /// Without a falling piece there is nothing to land, so this is `false`.
    #[must_use]
    pub fn is_attach(&self) -> bool {
        self.tetromino
            .is_some_and(|piece| self.grid.is_colliding(&piece.down()))
    }

    /// Places the next kind at the top of the field and draws a new next kind.
    ///
    /// Nothing changes when the spawn position is blocked.
    pub(super) fn try_spawn(&mut self) -> Result<(), SpawnBlockedError> {
        let piece = Tetromino::spawn(self.next);
        if self.grid.is_colliding(&piece) {
            return Err(SpawnBlockedError { kind: self.next });
        }
        self.tetromino = Some(piece);
        self.next = self.generator.next_kind();
        debug!(kind = ?piece.kind(), next = ?self.next, "Spawned piece");
        Ok(())
    }

    fn try_replace(
        &mut self,
        f: impl FnOnce(&Tetromino) -> Tetromino,
    ) -> Result<(), PieceCollisionError> {
        let piece = self.tetromino.as_ref().ok_or(PieceCollisionError)?;
        let moved = f(piece);
        if self.grid.is_colliding(&moved) {
            return Err(PieceCollisionError);
        }
        self.tetromino = Some(moved);
        Ok(())
    }

    pub(super) fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_replace(Tetromino::left)
    }

    pub(super) fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_replace(Tetromino::right)
    }

    /// Moves the piece one row down (the shift of a gravity step).
    pub(super) fn try_move_down(&mut self) -> Result<(), PieceCollisionError> {
        self.try_replace(Tetromino::down)
    }

    pub(super) fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.try_replace(Tetromino::rotated)
    }

    /// Copies the falling piece into the grid and retires it.
    ///
    /// Returns `false` if there was no piece.
    pub(super) fn attach(&mut self) -> bool {
        let Some(piece) = self.tetromino.take() else {
            return false;
        };
        self.grid.fill_piece(&piece);
        debug!(kind = ?piece.kind(), origin = ?piece.origin(), "Attached piece");
        true
    }

    /// Puts the session back into a fresh game, keeping the high score.
    pub(super) fn reset(&mut self) {
        self.grid.clear();
        self.tetromino = None;
        self.stats.reset();
        self.paused = false;
    }

    /// Releases the field and the falling piece.
    pub(super) fn release(&mut self) {
        self.grid.clear();
        self.tetromino = None;
        self.paused = false;
    }
}

#[cfg(test)]
impl<S> GameSession<S> {
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(crate) fn set_next_kind(&mut self, kind: TetrominoKind) {
        self.next = kind;
    }
}
