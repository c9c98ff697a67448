//! States, signals and the transition table of the game controller.
//!
//! The table is a single exhaustive `match` over `(GameState, Signal)`, so
//! every pair has a defined [`Effect`] (most of them [`Effect::None`]). Adding
//! a state or a signal makes the match non-exhaustive until the new row or
//! column is filled in.

use serde::{Deserialize, Serialize};

/// Controller state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
pub enum GameState {
    /// Waiting for the first `Start`.
    #[default]
    Start,
    /// The game ended (spawn blocked or terminated); `Start` begins a new one.
    GameOver,
    /// The next tick spawns a new piece.
    Spawn,
    /// A piece is falling under gravity and player control.
    Moving,
    /// The player pushed the piece down; the next tick shifts it once more.
    Shifting,
    /// The piece has landed; the next tick attaches it and clears lines.
    Attaching,
}

/// Player input, as produced by the presentation layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum UserAction {
    Start,
    Pause,
    Terminate,
    Left,
    Right,
    /// Rotate clockwise.
    Up,
    /// Push the piece one row down.
    Down,
    /// Hard drop.
    Action,
}

impl UserAction {
    pub const ALL: [Self; 8] = [
        Self::Start,
        Self::Pause,
        Self::Terminate,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Action,
    ];

    /// Whether an auto-repeated ("held") key press should be processed again.
    ///
    /// Only sideways moves and the soft push repeat; everything else acts once
    /// per physical press.
    #[must_use]
    pub const fn repeats_when_held(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Down)
    }
}

/// Anything the controller reacts to: a player action or a gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From)]
pub enum Signal {
    User(UserAction),
    Tick,
}

/// What the controller does for one `(state, signal)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Nothing happens.
    None,
    /// Initialize (or reset) the session and go to `Spawn`.
    StartGame,
    TogglePause,
    /// Release the field and the piece, go to `GameOver`.
    Terminate,
    /// Spawn the next piece; `Moving` on success, `GameOver` if blocked.
    Spawn,
    MoveLeft,
    MoveRight,
    Rotate,
    /// Push the piece down one row and go to `Shifting`.
    PushDown,
    /// Drop the piece until it lands, then go to `Attaching`.
    HardDrop,
    /// Gravity while moving: `Attaching` if landed, otherwise shift down.
    Gravity,
    /// Shift once more: `Attaching` if landed, otherwise back to `Moving`.
    Shift,
    /// Attach, clear lines, update score, go to `Spawn`.
    Attach,
}

impl Effect {
    /// Effects that still run while the game is paused.
    #[must_use]
    pub const fn runs_while_paused(self) -> bool {
        matches!(self, Self::TogglePause | Self::Terminate | Self::None)
    }
}

/// Looks up the effect for `signal` arriving in `state`.
///
/// # Example
///
/// ```
/// use bricktris_engine::{Effect, GameState, Signal, UserAction, transition};
///
/// assert_eq!(transition(GameState::Moving, Signal::Tick), Effect::Gravity);
/// assert_eq!(
///     transition(GameState::Shifting, UserAction::Left.into()),
///     Effect::None
/// );
/// ```
#[must_use]
pub const fn transition(state: GameState, signal: Signal) -> Effect {
    use GameState as S;
    use UserAction as A;

    match (state, signal) {
        (_, Signal::User(A::Terminate)) => Effect::Terminate,

        (S::Start | S::GameOver, Signal::User(A::Start)) => Effect::StartGame,
        (
            S::Start | S::GameOver,
            Signal::Tick
            | Signal::User(A::Pause | A::Left | A::Right | A::Up | A::Down | A::Action),
        ) => Effect::None,

        (S::Spawn | S::Moving | S::Shifting | S::Attaching, Signal::User(A::Pause)) => {
            Effect::TogglePause
        }
        (S::Spawn | S::Moving | S::Shifting | S::Attaching, Signal::User(A::Start)) => {
            Effect::None
        }

        (S::Spawn, Signal::Tick) => Effect::Spawn,
        (S::Spawn, Signal::User(A::Left | A::Right | A::Up | A::Down | A::Action)) => {
            Effect::None
        }

        (S::Moving, Signal::User(A::Left)) => Effect::MoveLeft,
        (S::Moving, Signal::User(A::Right)) => Effect::MoveRight,
        (S::Moving, Signal::User(A::Up)) => Effect::Rotate,
        (S::Moving, Signal::User(A::Down)) => Effect::PushDown,
        (S::Moving, Signal::User(A::Action)) => Effect::HardDrop,
        (S::Moving, Signal::Tick) => Effect::Gravity,

        (S::Shifting, Signal::Tick) => Effect::Shift,
        (S::Shifting, Signal::User(A::Left | A::Right | A::Up | A::Down | A::Action)) => {
            Effect::None
        }

        (S::Attaching, Signal::Tick) => Effect::Attach,
        (S::Attaching, Signal::User(A::Left | A::Right | A::Up | A::Down | A::Action)) => {
            Effect::None
        }
    }
}
