use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// One frame of the fixed-rate clock elapsed.
    Frame,
    /// The screen needs to be redrawn.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
