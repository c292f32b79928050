//! Key tracker for terminal environments.
//!
//! Turns press/release events into one [`InputFrame`] per tick. Terminals
//! that never emit release events are handled with a timeout: a key with no
//! press (or auto-repeat) for longer than the timeout counts as released.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{InputFrame, Key, KeySet};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers key repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct InputHandler {
    pressed: KeySet,
    held: KeySet,
    since_press_ms: [u32; Key::ALL.len()],
    key_release_timeout_ms: u32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed: KeySet::empty(),
            held: KeySet::empty(),
            since_press_ms: [0; Key::ALL.len()],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Feed one terminal key event. Returns the logical key it touched.
    pub fn handle_event(&mut self, event: KeyEvent) -> Option<Key> {
        let key = handle_key_event(event)?;
        match event.kind {
            KeyEventKind::Release => self.release(key),
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(key),
        }
        Some(key)
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Key> {
        self.handle_event(KeyEvent::from(code))
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let mut event = KeyEvent::from(code);
        event.kind = KeyEventKind::Release;
        self.handle_event(event);
    }

    fn press(&mut self, key: Key) {
        // Auto-repeat of a key already down only refreshes its timeout.
        if !self.held.contains(key) {
            self.pressed.insert(key);
            self.held.insert(key);
        }
        self.since_press_ms[key as usize] = 0;
    }

    fn release(&mut self, key: Key) {
        self.held.remove(key);
    }

    /// Advance timers and auto-release keys that went quiet.
    pub fn update(&mut self, elapsed_ms: u32) {
        for key in Key::ALL {
            if !self.held.contains(key) {
                continue;
            }
            let since = &mut self.since_press_ms[key as usize];
            *since = since.saturating_add(elapsed_ms);
            if *since > self.key_release_timeout_ms {
                self.held.remove(key);
            }
        }
    }

    /// Frame for this tick; consumes the fresh presses.
    pub fn frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            pressed: self.pressed,
            held: self.held,
        };
        self.pressed = KeySet::empty();
        frame
    }
}
