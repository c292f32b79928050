use std::fmt;

/// Reasons a board refuses to be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    DegenerateSize { width: u8, height: u8 },
    EmptyQueue,
    ZeroTiming,
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::DegenerateSize { .. } => "degenerate_size",
            BoardError::EmptyQueue => "empty_queue",
            BoardError::ZeroTiming => "zero_timing",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BoardError::DegenerateSize { .. } => "board dimensions are too small to spawn a piece",
            BoardError::EmptyQueue => "initial queue must contain at least one shape",
            BoardError::ZeroTiming => "step and lock delays must be non-zero",
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::DegenerateSize { width, height } => {
                write!(f, "{} ({}x{})", self.message(), width, height)
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for BoardError {}
