//! Terminal input module (controller-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Key`] and tracks them into
//! one [`crate::types::InputFrame`] per tick for the human controller,
//! including terminals without key-release events.

pub mod handler;
pub mod map;

pub use tetris_duel_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, map_key, should_quit};
