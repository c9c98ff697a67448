use crossterm::event::Event;
use ratatui::Frame;

/// Application driven by [`Tui::run`](super::Tui::run).
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Advances the application by one frame.
    fn update(&mut self);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);
}
