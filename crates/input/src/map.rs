//! Key mapping from terminal events to game actions.
//!
//! Presses produce the action edges, releases only end a soft drop, and terminal
//! auto-repeat re-issues horizontal moves and keeps a soft drop alive.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn is_left(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A')
    )
}

fn is_right(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D')
    )
}

/// Keys that hold the soft drop
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S')
    )
}

/// Map keyboard input to game actions.
pub fn map_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return match key.kind {
            KeyEventKind::Press => Some(GameAction::Quit),
            _ => None,
        };
    }

    match key.kind {
        KeyEventKind::Press => map_press(key.code),
        KeyEventKind::Repeat => match key.code {
            c if is_left(c) => Some(GameAction::MoveLeft),
            c if is_right(c) => Some(GameAction::MoveRight),
            c if is_soft_drop_key(c) => Some(GameAction::SoftDropStart),
            _ => None,
        },
        KeyEventKind::Release => {
            if is_soft_drop_key(key.code) {
                Some(GameAction::SoftDropEnd)
            } else {
                None
            }
        }
    }
}

fn map_press(code: KeyCode) -> Option<GameAction> {
    match code {
        // Movement
        c if is_left(c) => Some(GameAction::MoveLeft),
        c if is_right(c) => Some(GameAction::MoveRight),
        c if is_soft_drop_key(c) => Some(GameAction::SoftDropStart),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p' | 'P') => Some(GameAction::TogglePause),
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
