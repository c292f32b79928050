//! Placement - drive a board to a search goal in one go
//!
//! Search scratch boards do not replay the tick-by-tick input a controller
//! would send. They hold if asked, rotate by the orientation delta, jump
//! straight to the target column and hard-drop.

use tetris_duel_core::{AfterLock, BoardState};

/// Where the search wants the current piece to end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Goal {
    /// Hold before placing (the goal then refers to the swapped-in piece)
    pub hold_first: bool,
    /// Target orientation index
    pub orientation: u8,
    /// Target anchor column
    pub x: i8,
}

impl Goal {
    pub fn new(orientation: u8, x: i8) -> Self {
        Self {
            hold_first: false,
            orientation,
            x,
        }
    }

    pub fn with_hold(self) -> Self {
        Self {
            hold_first: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    HoldUnavailable,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold_unavailable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NotPlayable => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold requested when unavailable",
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "target x collides with the stack",
            PlaceError::NotPlayable => "board is game over",
        }
    }
}

/// Apply `goal` to `board` and lock the piece. Returns the number of cleared
/// rows. On error the board may be partially modified; callers work on clones.
pub fn apply_goal(board: &mut BoardState, goal: Goal, after: AfterLock) -> Result<u32, PlaceError> {
    if board.game_over() {
        return Err(PlaceError::NotPlayable);
    }

    if goal.hold_first && !board.hold() {
        return Err(PlaceError::HoldUnavailable);
    }
    if board.game_over() {
        return Err(PlaceError::NotPlayable);
    }

    let delta = goal.orientation as i8 - board.piece().orientation as i8;
    if !board.rotate(delta) || board.piece().orientation != goal.orientation {
        return Err(PlaceError::RotationBlocked);
    }

    let piece = *board.piece();
    let (min_dx, max_dx) = piece.x_extent();
    let width = board.width() as i16;
    let x = goal.x as i16;
    if x + (min_dx as i16) < 0 || x + (max_dx as i16) >= width {
        return Err(PlaceError::XOutOfBounds);
    }

    if !board.translate(goal.x - piece.anchor.x, 0) {
        return Err(PlaceError::XBlocked);
    }

    Ok(board.hard_drop(after))
}
