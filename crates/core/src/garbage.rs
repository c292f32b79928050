//! Garbage routing between boards
//!
//! A board that clears rows sends half of them (rounded up) to every other
//! board in the match. The rows are only queued here; each receiver pushes
//! them under its stack the next time it locks a piece.

use crate::board_state::BoardState;
use crate::types::BoardId;

/// Rows sent to each opponent for a clear of `cleared` rows
pub fn garbage_for_clear(cleared: u32) -> u32 {
    cleared.div_ceil(2)
}

/// Notify every board that `source` cleared `cleared` rows.
///
/// The sender is part of `boards` and ignores its own notification.
pub fn broadcast_lines_cleared<'a>(
    boards: impl IntoIterator<Item = &'a mut BoardState>,
    source: BoardId,
    cleared: u32,
) {
    if cleared == 0 {
        return;
    }
    for board in boards {
        board.on_lines_cleared(source, cleared);
    }
}
