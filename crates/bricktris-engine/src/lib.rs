//! Rules engine for a falling-block puzzle game.
//!
//! [`core`] holds the field and the pieces; [`engine`] holds the session,
//! scoring, the controller state machine and the high score port.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("spawn position blocked for {kind:?} piece")]
pub struct SpawnBlockedError {
    pub kind: TetrominoKind,
}
