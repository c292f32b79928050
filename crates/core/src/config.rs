//! Board configuration - dimensions and timing

use crate::error::BoardError;
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, LOCK_DELAY_MS, MAX_LOCK_DELAY_MS, MIN_BOARD_DIM, STEP_DELAY_MS,
};

/// Size and timing of one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Forced gravity interval
    pub step_delay_ms: u32,
    /// Grace period once the piece cannot fall; reset by sideways moves and rotations
    pub lock_delay_ms: u32,
    /// Ceiling measured from the first landing of a piece; never reset
    pub max_lock_delay_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            max_lock_delay_ms: MAX_LOCK_DELAY_MS,
        }
    }
}

impl BoardConfig {
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject boards that could not hold a spawned piece.
    pub fn validate(&self) -> Result<(), BoardError> {
        // Anchors are i8; keep every coordinate (plus kicks) representable.
        if self.width < MIN_BOARD_DIM
            || self.height < MIN_BOARD_DIM
            || self.width > 100
            || self.height > 100
        {
            return Err(BoardError::DegenerateSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.step_delay_ms == 0 || self.lock_delay_ms == 0 {
            return Err(BoardError::ZeroTiming);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(BoardConfig::default().validate().is_ok());
        assert_eq!(BoardConfig::default().width, 10);
        assert_eq!(BoardConfig::default().height, 20);
    }

    #[test]
    fn degenerate_sizes_rejected() {
        for (w, h) in [(0, 20), (3, 20), (10, 3), (101, 20)] {
            assert!(matches!(
                BoardConfig::with_size(w, h).validate(),
                Err(BoardError::DegenerateSize { .. })
            ));
        }
    }

    #[test]
    fn zero_step_delay_rejected() {
        let config = BoardConfig {
            step_delay_ms: 0,
            ..BoardConfig::default()
        };
        assert_eq!(config.validate(), Err(BoardError::ZeroTiming));
    }
}
