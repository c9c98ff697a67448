use tracing::{debug, info, instrument, trace};

use crate::PieceCollisionError;

use super::{
    Effect, GameSession, GameState, Signal, Snapshot, UserAction, high_score::HighScoreStore,
    transition,
};

impl<S> GameSession<S>
where
    S: HighScoreStore,
{
    /// Feeds one player action into the state machine.
    ///
    /// `hold` marks an auto-repeated key press. Held actions are dropped
    /// unless [`UserAction::repeats_when_held`] allows them, so one physical
    /// press of e.g. rotate is processed once.
    #[instrument(level = "trace", skip(self))]
    pub fn user_input(&mut self, action: UserAction, hold: bool) -> Snapshot {
        if hold && !action.repeats_when_held() {
            trace!("Ignored held key");
        } else {
            self.dispatch(action.into());
        }
        self.snapshot()
    }

    /// Feeds one gravity tick into the state machine.
    pub fn tick(&mut self) -> Snapshot {
        self.dispatch(Signal::Tick);
        self.snapshot()
    }

    fn dispatch(&mut self, signal: Signal) {
        let from = self.state;
        let effect = transition(from, signal);
        if effect == Effect::None {
            return;
        }
        if self.paused && !effect.runs_while_paused() {
            trace!(?signal, ?effect, "Suppressed while paused");
            return;
        }
        self.apply(effect);
        debug!(?from, ?signal, ?effect, to = ?self.state, "Transition");
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::StartGame => self.start_game(),
            Effect::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "Toggled pause");
            }
            Effect::Terminate => {
                self.release();
                self.state = GameState::GameOver;
                info!(score = self.stats.score(), "Game terminated");
            }
            Effect::Spawn => match self.try_spawn() {
                Ok(()) => self.state = GameState::Moving,
                Err(error) => {
                    self.state = GameState::GameOver;
                    info!(%error, score = self.stats.score(), "Game over");
                }
            },
            Effect::MoveLeft => log_rejected(self.try_move_left()),
            Effect::MoveRight => log_rejected(self.try_move_right()),
            Effect::Rotate => log_rejected(self.try_rotate()),
            Effect::PushDown => {
                log_rejected(self.try_move_down());
                self.state = GameState::Shifting;
            }
            Effect::HardDrop => {
                while self.try_move_down().is_ok() {}
                self.state = GameState::Attaching;
            }
            Effect::Gravity => {
                if self.is_attach() {
                    self.state = GameState::Attaching;
                } else {
                    log_rejected(self.try_move_down());
                }
            }
            Effect::Shift => {
                log_rejected(self.try_move_down());
                self.state = if self.is_attach() {
                    GameState::Attaching
                } else {
                    GameState::Moving
                };
            }
            Effect::Attach => self.complete_attach(),
        }
    }

    fn start_game(&mut self) {
        self.reset();
        self.state = if self.can_spawn() {
            GameState::Spawn
        } else {
            GameState::GameOver
        };
        info!(high_score = self.stats.high_score(), "Started new game");
    }

    fn complete_attach(&mut self) {
        if self.attach() {
            let cleared = self.grid.clear_lines();
            if cleared > 0 {
                info!(cleared, score = self.stats.score(), "Cleared lines");
            }
            if self.stats.complete_attach(cleared) {
                info!(high_score = self.stats.high_score(), "New high score");
                self.save_high_score();
            }
        }
        self.state = GameState::Spawn;
    }
}

fn log_rejected(result: Result<(), PieceCollisionError>) {
    if let Err(error) = result {
        trace!(%error, "Rejected move");
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        MAX_LEVEL, MAX_SPEED, MemoryHighScoreStore, Position, SCORE_TABLE,
        core::{Block, Grid, HEIGHT, TetrominoKind, WIDTH, tetromino::coord},
    };

    const BOTTOM: i32 = coord(HEIGHT) - 1;

    fn started(store: MemoryHighScoreStore, kind: TetrominoKind) -> GameSession {
        let mut session = GameSession::new(store);
        session.set_next_kind(kind);
        session.user_input(UserAction::Start, false);
        assert_eq!(session.state(), GameState::Spawn);
        let snapshot = session.tick();
        assert_eq!(snapshot.state, GameState::Moving);
        assert_eq!(snapshot.active.map(|a| a.kind), Some(kind));
        session
    }

    // Bottom row filled except column 0, plus a marker cell above it.
    fn prepare_single_gap(session: &mut GameSession) {
        for x in 1..coord(WIDTH) {
            session
                .grid_mut()
                .set(Position::new(x, BOTTOM), Block::Filled(TetrominoKind::Z));
        }
        session
            .grid_mut()
            .set(Position::new(9, BOTTOM - 1), Block::Filled(TetrominoKind::L));
    }

    // Turns the freshly spawned I upright, moves it to column 0 and hard drops.
    fn drop_vertical_i_into_column_0(session: &mut GameSession) {
        // the upright I would poke above the field at spawn
        session.tick();
        session.user_input(UserAction::Up, false);
        let cells = session.tetromino().unwrap().cells();
        assert!(cells.iter().all(|c| c.x == 5));
        for _ in 0..5 {
            session.user_input(UserAction::Left, false);
        }
        let snapshot = session.user_input(UserAction::Action, false);
        assert_eq!(snapshot.state, GameState::Attaching);
        let cells = session.tetromino().unwrap().cells();
        assert!(cells.iter().all(|c| c.x == 0));
        assert!(cells.contains(&Position::new(0, BOTTOM)));
    }

    #[test]
    fn test_o_piece_lands_on_empty_field() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::O);
        let mut ticks = 0;
        while !session.is_attach() {
            assert_eq!(session.tick().state, GameState::Moving);
            ticks += 1;
        }
        assert_eq!(ticks, HEIGHT - 2);
        assert_eq!(session.tick().state, GameState::Attaching);

        let snapshot = session.tick();
        assert_eq!(snapshot.state, GameState::Spawn);
        assert!(snapshot.active.is_none());
        assert_eq!(snapshot.grid.occupied_count(), 4);
        for pos in [(4, BOTTOM - 1), (5, BOTTOM - 1), (4, BOTTOM), (5, BOTTOM)] {
            assert!(snapshot.grid.is_occupied(Position::new(pos.0, pos.1)));
        }
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_vertical_i_clears_single_line() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::I);
        prepare_single_gap(&mut session);
        let occupied_before = session.grid().occupied_count();
        let above_before: Vec<_> = session.grid().rows().take(HEIGHT - 1).copied().collect();

        drop_vertical_i_into_column_0(&mut session);
        let snapshot = session.tick();
        assert_eq!(snapshot.state, GameState::Spawn);
        assert_eq!(snapshot.score, SCORE_TABLE[1]);
        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(snapshot.grid.occupied_count(), occupied_before + 4 - WIDTH);

        // rows above the cleared one moved down by one, apart from the I cells
        for y in 1..HEIGHT {
            for x in 0..WIDTH {
                let pos = Position::new(coord(x), coord(y));
                let expected = if x == 0 && y >= HEIGHT - 3 {
                    Block::Filled(TetrominoKind::I)
                } else {
                    above_before[y - 1][x]
                };
                assert_eq!(snapshot.grid.get(pos), Some(expected), "{pos:?}");
            }
        }
        assert_eq!(
            snapshot.grid.get(Position::new(9, BOTTOM)),
            Some(Block::Filled(TetrominoKind::L))
        );
        assert!(snapshot.grid.row(0).unwrap().iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_vertical_i_clears_four_lines() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::I);
        for y in BOTTOM - 3..=BOTTOM {
            for x in 1..coord(WIDTH) {
                session
                    .grid_mut()
                    .set(Position::new(x, y), Block::Filled(TetrominoKind::T));
            }
        }
        drop_vertical_i_into_column_0(&mut session);

        let snapshot = session.tick();
        assert_eq!(snapshot.state, GameState::Spawn);
        assert_eq!(snapshot.score, SCORE_TABLE[4]);
        assert_eq!(snapshot.grid, Grid::EMPTY);
        assert_eq!(session.stats().total_cleared_lines(), 4);
        assert_eq!(session.stats().line_cleared_counter()[4], 1);
        assert_eq!(snapshot.level, 3);
        assert_eq!(snapshot.line_clears, [0, 0, 0, 1]);
    }

    #[test]
    fn test_terminate_then_restart() {
        let mut session = started(MemoryHighScoreStore::new(0), TetrominoKind::I);
        prepare_single_gap(&mut session);
        drop_vertical_i_into_column_0(&mut session);
        session.tick();
        assert_eq!(session.stats().high_score(), SCORE_TABLE[1]);
        assert_eq!(session.store().high_score(), SCORE_TABLE[1]);
        assert_eq!(session.store().saves(), 1);

        session.tick();
        assert_eq!(session.state(), GameState::Moving);
        let snapshot = session.user_input(UserAction::Terminate, false);
        assert_eq!(snapshot.state, GameState::GameOver);
        assert_eq!(snapshot.grid, Grid::EMPTY);
        assert!(snapshot.active.is_none());

        let snapshot = session.user_input(UserAction::Start, false);
        assert_eq!(snapshot.state, GameState::Spawn);
        assert_eq!(snapshot.grid, Grid::EMPTY);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.high_score, SCORE_TABLE[1]);
    }

    #[test]
    fn test_terminate_is_idempotent() {
        let mut session: GameSession = GameSession::default();
        assert_eq!(
            session.user_input(UserAction::Terminate, false).state,
            GameState::GameOver
        );
        let before = session.snapshot();
        assert_eq!(session.user_input(UserAction::Terminate, false), before);
        assert_eq!(session.tick(), before);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut session: GameSession = GameSession::default();
        session.user_input(UserAction::Start, false);
        session.set_next_kind(TetrominoKind::O);
        session
            .grid_mut()
            .set(Position::new(5, 1), Block::Filled(TetrominoKind::J));
        assert!(!session.can_spawn());

        let snapshot = session.tick();
        assert_eq!(snapshot.state, GameState::GameOver);
        assert!(snapshot.active.is_none());
    }

    #[test]
    fn test_pause_suppresses_everything_but_pause_and_terminate() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::T);
        let paused = session.user_input(UserAction::Pause, false);
        assert!(paused.paused);

        for action in [
            UserAction::Left,
            UserAction::Right,
            UserAction::Up,
            UserAction::Down,
            UserAction::Action,
            UserAction::Start,
        ] {
            assert_eq!(session.user_input(action, false), paused);
        }
        assert_eq!(session.tick(), paused);

        let resumed = session.user_input(UserAction::Pause, false);
        assert!(!resumed.paused);
        assert_eq!(resumed.state, GameState::Moving);
        assert_ne!(session.tick(), resumed);

        session.user_input(UserAction::Pause, false);
        let snapshot = session.user_input(UserAction::Terminate, false);
        assert_eq!(snapshot.state, GameState::GameOver);
        assert!(!snapshot.paused);
    }

    #[test]
    fn test_held_keys() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::T);
        session.tick();
        let before = session.snapshot();
        assert_eq!(session.user_input(UserAction::Up, true), before);
        assert_eq!(session.user_input(UserAction::Action, true), before);
        assert_eq!(session.user_input(UserAction::Pause, true), before);

        let moved = session.user_input(UserAction::Left, true);
        assert_eq!(
            moved.active.unwrap().cells,
            before.active.unwrap().cells.map(|c| c.translated(-1, 0))
        );
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::S);
        let before = session.snapshot();
        assert_eq!(session.user_input(UserAction::Start, false), before);
    }

    #[test]
    fn test_push_down_goes_through_shifting() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::O);
        let origin = session.tetromino().unwrap().origin();
        let snapshot = session.user_input(UserAction::Down, false);
        assert_eq!(snapshot.state, GameState::Shifting);
        assert_eq!(session.tetromino().unwrap().origin(), origin.translated(0, 1));

        // only tick and pause are accepted while shifting
        assert_eq!(session.user_input(UserAction::Left, false), snapshot);
        let snapshot = session.tick();
        assert_eq!(snapshot.state, GameState::Moving);
        assert_eq!(session.tetromino().unwrap().origin(), origin.translated(0, 2));
    }

    #[test]
    fn test_push_down_near_floor_lands() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::O);
        for _ in 0..HEIGHT - 3 {
            session.tick();
        }
        assert!(!session.is_attach());
        session.user_input(UserAction::Down, false);
        assert!(session.is_attach());
        assert_eq!(session.tick().state, GameState::Attaching);
        assert_eq!(session.tick().grid.occupied_count(), 4);
    }

    #[test]
    fn test_hard_drop_lands_on_stack() {
        let mut session = started(MemoryHighScoreStore::default(), TetrominoKind::O);
        session
            .grid_mut()
            .set(Position::new(4, 10), Block::Filled(TetrominoKind::I));
        session.user_input(UserAction::Action, false);
        assert_eq!(session.state(), GameState::Attaching);
        assert_eq!(session.tetromino().unwrap().origin(), Position::new(3, 8));
        assert!(session.is_attach());
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let seed = "5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap();
        let mut session = GameSession::with_seed(MemoryHighScoreStore::default(), seed);
        let mut rng = Pcg32::seed_from_u64(7);
        session.user_input(UserAction::Start, false);

        let inputs = [
            UserAction::Left,
            UserAction::Right,
            UserAction::Up,
            UserAction::Down,
            UserAction::Action,
        ];
        let mut last = session.snapshot();
        for _ in 0..20_000 {
            let occupied = session.grid().occupied_count();
            let cleared = session.stats().total_cleared_lines();
            let attaching = session.state() == GameState::Attaching;
            let ticked = rng.random_bool(0.5);
            let snapshot = if ticked {
                session.tick()
            } else {
                session.user_input(inputs[rng.random_range(0..inputs.len())], false)
            };
            // only an attach adds cells; each cleared row removes a full row
            let added = if ticked && attaching { 4 } else { 0 };
            let removed =
                WIDTH * usize::try_from(session.stats().total_cleared_lines() - cleared).unwrap();
            assert_eq!(snapshot.grid.occupied_count() + removed, occupied + added);
            assert!(snapshot.score >= last.score);
            assert!(snapshot.level >= last.level);
            assert!(snapshot.speed >= last.speed);
            assert!(snapshot.level <= MAX_LEVEL);
            assert!(snapshot.speed <= MAX_SPEED);
            assert!(snapshot.high_score >= snapshot.score);
            if let Some(piece) = session.tetromino() {
                assert!(!session.grid().is_colliding(piece));
            }
            if snapshot.state == GameState::GameOver {
                break;
            }
            last = snapshot;
        }
    }
}
