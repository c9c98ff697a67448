//! Game rules and session state.
//!
//! - [`GameSession`] - one game: field, falling piece, next kind, stats
//! - [`GameStats`] - score, high score, level and speed
//! - [`PieceGenerator`] - seeded uniform piece generation
//! - [`HighScoreStore`] - persistence port for the high score
//! - [`Snapshot`] - read-only view handed to presentation
//!
//! # Game Flow
//!
//! The session is driven by two entry points, [`GameSession::user_input`] and
//! [`GameSession::tick`]. Both look up an [`Effect`] in the [`transition`]
//! table for the current [`GameState`] and return a fresh snapshot.
//!
//! # Example
//!
//! ```
//! use bricktris_engine::{GameSession, GameState, MemoryHighScoreStore, UserAction};
//!
//! let mut session = GameSession::new(MemoryHighScoreStore::default());
//! session.user_input(UserAction::Start, false);
//! assert_eq!(session.state(), GameState::Spawn);
//!
//! let snapshot = session.tick();
//! assert_eq!(snapshot.state, GameState::Moving);
//! assert!(snapshot.active.is_some());
//! ```

pub use self::{
    fsm::*, game_session::*, game_stats::*, high_score::*, piece_generator::*, snapshot::*,
};

mod controller;
mod fsm;
mod game_session;
mod game_stats;
mod high_score;
mod piece_generator;
mod snapshot;
