use bricktris_engine::{
    GameSession, GameState, HighScoreStore, MAX_SPEED, MIN_SPEED, Snapshot, UserAction,
};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{tui::App, ui::widgets::SessionDisplay};

use super::input::{self, KeyCommand};

pub(super) const FPS: u32 = 60;

/// Frames between two gravity ticks: 1000 ms at speed 1, 100 ms less per
/// speed step.
fn drop_frames(speed: u32, fps: u32) -> u32 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    let millis = 1000 - (speed - 1) * 100;
    (millis * fps / 1000).max(1)
}

#[derive(Debug)]
pub(super) struct PlayApp<S> {
    session: GameSession<S>,
    snapshot: Snapshot,
    frames_until_drop: u32,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: HighScoreStore,
{
    pub(super) fn new(session: GameSession<S>) -> Self {
        let snapshot = session.snapshot();
        Self {
            frames_until_drop: drop_frames(snapshot.speed, FPS),
            session,
            snapshot,
            is_exiting: false,
        }
    }

    /// The last view shown before exiting.
    pub(super) fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    fn reset_drop_timer(&mut self) {
        self.frames_until_drop = drop_frames(self.snapshot.speed, FPS);
    }

    fn quit(&mut self) {
        // the last view is kept for the summary
        self.session.user_input(UserAction::Terminate, false);
        self.is_exiting = true;
    }
}

impl<S> App for PlayApp<S>
where
    S: HighScoreStore,
{
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        match input::map_key(&key) {
            Some(KeyCommand::Game { action, hold }) => {
                self.snapshot = self.session.user_input(action, hold);
            }
            Some(KeyCommand::Quit) => self.quit(),
            None => {}
        }
    }

    fn update(&mut self) {
        if self.snapshot.paused {
            return;
        }
        match self.session.state() {
            GameState::Start | GameState::GameOver => {}
            GameState::Spawn => {
                self.snapshot = self.session.tick();
                self.reset_drop_timer();
            }
            GameState::Shifting | GameState::Attaching => self.snapshot = self.session.tick(),
            GameState::Moving => {
                self.frames_until_drop = self.frames_until_drop.saturating_sub(1);
                if self.frames_until_drop == 0 {
                    self.snapshot = self.session.tick();
                    self.reset_drop_timer();
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.snapshot);
        let help_text = match self.snapshot.state {
            GameState::Start | GameState::GameOver => "Controls: ENTER (Start) | Q (Quit)",
            _ if self.snapshot.paused => "Controls: P (Resume) | ESC (End Game) | Q (Quit)",
            _ => {
                "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Push Down) | Space (Drop) | P (Pause) | ESC (End Game) | Q (Quit)"
            }
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }
}

#[cfg(test)]
mod tests {
    use bricktris_engine::MemoryHighScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn started_app() -> PlayApp<MemoryHighScoreStore> {
        let seed = "0f0e0d0c0b0a09080706050403020100".parse().unwrap();
        let mut app = PlayApp::new(GameSession::with_seed(MemoryHighScoreStore::default(), seed));
        app.handle_event(&key(KeyCode::Enter));
        assert_eq!(app.snapshot.state, GameState::Spawn);
        app.update();
        assert_eq!(app.snapshot.state, GameState::Moving);
        app
    }

    fn active_top(app: &PlayApp<MemoryHighScoreStore>) -> i32 {
        app.snapshot
            .active
            .map(|active| active.cells.iter().map(|c| c.y).min().unwrap())
            .unwrap()
    }

    #[test]
    fn test_drop_frames() {
        assert_eq!(drop_frames(1, 60), 60);
        assert_eq!(drop_frames(5, 60), 36);
        assert_eq!(drop_frames(10, 60), 6);
        assert_eq!(drop_frames(0, 60), 60);
        assert_eq!(drop_frames(99, 60), 6);
        for speed in MIN_SPEED..MAX_SPEED {
            assert!(drop_frames(speed + 1, FPS) < drop_frames(speed, FPS));
        }
    }

    #[test]
    fn test_gravity_paced_by_frames() {
        let mut app = started_app();
        let top = active_top(&app);
        for _ in 0..drop_frames(1, FPS) - 1 {
            app.update();
        }
        assert_eq!(active_top(&app), top);
        app.update();
        assert_eq!(active_top(&app), top + 1);
    }

    #[test]
    fn test_idle_and_paused_frames_do_nothing() {
        let seed = "0f0e0d0c0b0a09080706050403020100".parse().unwrap();
        let mut app = PlayApp::new(GameSession::with_seed(MemoryHighScoreStore::default(), seed));
        let before = app.snapshot.clone();
        app.update();
        assert_eq!(app.snapshot, before);

        let mut app = started_app();
        app.handle_event(&key(KeyCode::Char('p')));
        let paused = app.snapshot.clone();
        assert!(paused.paused);
        for _ in 0..2 * FPS {
            app.update();
        }
        assert_eq!(app.snapshot, paused);
    }

    #[test]
    fn test_escape_ends_game_and_q_quits() {
        let mut app = started_app();
        app.handle_event(&key(KeyCode::Esc));
        assert_eq!(app.snapshot.state, GameState::GameOver);
        assert!(!app.should_exit());

        let mut app = started_app();
        let last = app.snapshot.clone();
        app.handle_event(&key(KeyCode::Char('q')));
        assert!(app.should_exit());
        assert_eq!(app.session.state(), GameState::GameOver);
        assert_eq!(app.into_snapshot(), last);
    }
}
