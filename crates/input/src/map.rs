//! Key mapping from terminal events to logical keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to a logical key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Key::Right),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Key::Down),

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Key::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Key::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Key::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Hold),

        _ => None,
    }
}

/// Map a key event, ignoring Ctrl chords (Ctrl-C quits rather than holds).
pub fn handle_key_event(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    map_key(key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), Some(Key::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Right)), Some(Key::Right));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Down)), Some(Key::Down));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('H'))), Some(Key::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('l'))), Some(Key::Right));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Up)), Some(Key::RotateCw));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('z'))),
            Some(Key::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Key::HardDrop)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('c'))), Some(Key::Hold));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
