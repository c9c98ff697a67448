use bricktris_engine::UserAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyCommand {
    Game { action: UserAction, hold: bool },
    Quit,
}

/// Translates a key event.
///
/// Auto-repeated presses are marked as `hold`; releases are dropped.
pub(super) fn map_key(event: &KeyEvent) -> Option<KeyCommand> {
    let hold = match event.kind {
        KeyEventKind::Press => false,
        KeyEventKind::Repeat => true,
        KeyEventKind::Release => return None,
    };
    let action = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(KeyCommand::Quit);
        }
        KeyCode::Char('q' | 'Q') => return Some(KeyCommand::Quit),
        KeyCode::Enter => UserAction::Start,
        KeyCode::Char('p' | 'P') => UserAction::Pause,
        KeyCode::Esc => UserAction::Terminate,
        KeyCode::Left => UserAction::Left,
        KeyCode::Right => UserAction::Right,
        KeyCode::Up => UserAction::Up,
        KeyCode::Down => UserAction::Down,
        KeyCode::Char(' ') => UserAction::Action,
        _ => return None,
    };
    Some(KeyCommand::Game { action, hold })
}
