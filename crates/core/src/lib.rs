//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the board rules and state machine. It has **no
//! dependencies** on terminals, clocks or threads, which makes it:
//!
//! - **Deterministic**: same seed and same moves produce the same board
//! - **Cloneable**: search explores futures on cheap independent copies
//! - **Portable**: runs headless, in tests and benches
//!
//! # Module Structure
//!
//! - [`catalog`]: static shape patterns, kick tables and the rotation transform
//! - [`grid`]: W×H tile array with row clearing and garbage insertion
//! - [`piece`]: the active piece (shape, orientation, anchor, cells)
//! - [`rng`]: seeded LCG and the 7-bag upcoming queue
//! - [`board_state`]: the board-state machine behind `make_move`
//! - [`garbage`]: clear-to-garbage conversion and broadcast
//! - [`snapshot`]: read-only views for rendering
//!
//! # Rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Randomizer | 7-bag, queue kept at least 5 deep |
//! | Rotation | catalog transform plus 5 kick attempts, all-or-nothing |
//! | Gravity | one row per step delay |
//! | Lock delay | reset by sideways moves and rotations, bounded by max lock delay |
//! | Hold | once per piece, cleared on spawn |
//! | Garbage | `ceil(cleared / 2)` rows to every other board, applied at lock |
//! | Game over | a spawned piece overlaps the stack |
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{AfterLock, BoardConfig, BoardState, SimpleRng};
//! use tetris_duel_types::Shape;
//!
//! let mut board =
//!     BoardState::new(BoardConfig::default(), &[Shape::I, Shape::O], SimpleRng::new(1))
//!         .unwrap();
//! assert_eq!(board.piece().shape, Shape::I);
//!
//! board.hard_drop(AfterLock::Spawn);
//! assert_eq!(board.piece().shape, Shape::O);
//! assert_eq!(board.grid().column_height(4), 1);
//! ```

pub mod board_state;
pub mod catalog;
pub mod config;
pub mod error;
pub mod garbage;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use tetris_duel_types as types;

// Re-export commonly used types for convenience
pub use board_state::{AfterLock, BoardState};
pub use catalog::{kick_index, rotate_cells, shape_data, Pivot, ShapeData};
pub use config::BoardConfig;
pub use error::BoardError;
pub use garbage::{broadcast_lines_cleared, garbage_for_clear};
pub use grid::Grid;
pub use piece::ActivePiece;
pub use rng::{shuffled_bag, PieceQueue, SimpleRng};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
