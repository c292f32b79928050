//! Tetris duel (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof, plus the driver
//! configuration and the text view used by the binary.

pub use tetris_duel_core as core;
pub use tetris_duel_engine as engine;
pub use tetris_duel_input as input;
pub use tetris_duel_types as types;

pub mod config;
pub mod view;
