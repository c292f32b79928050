//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board logic, search, input adapters, the CLI driver).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (boards may be built with other sizes):
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, bottom to top)
//! - **Spawn anchor**: `(width / 2 - 1, height - 3)`, one row lower for I
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed driver timestep (~60 FPS) |
//! | `STEP_DELAY_MS` | 1000 | Forced gravity interval |
//! | `LOCK_DELAY_MS` | 500 | Grace period once the piece cannot fall |
//! | `MAX_LOCK_DELAY_MS` | 5000 | Absolute lock ceiling, never extended |
//! | `BOT_MOVE_COOLDOWN_MS` | 200 | Pause between bot moves |
//! | `FIRST_REPEAT_DELAY_MS` | 150 | Human key-repeat start delay |
//! | `HELD_REPEAT_DELAY_MS` | 10 | Human key-repeat interval |
//!
//! # Examples
//!
//! ```
//! use tetris_duel_types::{Direction, Move, RotationInput, Shape};
//!
//! let shape = Shape::from_str("t").unwrap();
//! assert_eq!(shape, Shape::T);
//!
//! let mv = Move::translate(Direction::Left);
//! assert_eq!(mv.direction, Direction::Left);
//! assert_eq!(mv.rotation, RotationInput::None);
//! assert!(!mv.hold && !mv.hard_drop);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest width or height a board accepts
pub const MIN_BOARD_DIM: u8 = 4;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Forced gravity interval (one row per second)
pub const STEP_DELAY_MS: u32 = 1000;

/// Lock delay once the piece can no longer fall
pub const LOCK_DELAY_MS: u32 = 500;

/// Upper bound on how long a grounded piece may be kept alive
pub const MAX_LOCK_DELAY_MS: u32 = 5000;

/// Minimum number of shapes kept in the upcoming queue
pub const QUEUE_LOOKAHEAD: usize = 5;

/// Number of queued shapes exported for preview
pub const PREVIEW_LEN: usize = 5;

/// Pause between two bot moves
pub const BOT_MOVE_COOLDOWN_MS: u32 = 200;

/// Delay before a held direction key starts repeating
pub const FIRST_REPEAT_DELAY_MS: u32 = 150;

/// Interval between repeats of a held direction key
pub const HELD_REPEAT_DELAY_MS: u32 = 10;

/// The seven shape identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl Shape {
    /// All shapes in catalog order.
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::Shape;
    ///
    /// assert_eq!(Shape::from_str("i"), Some(Shape::I));
    /// assert_eq!(Shape::from_str("Z"), Some(Shape::Z));
    /// assert_eq!(Shape::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Shape::I),
            "o" => Some(Shape::O),
            "t" => Some(Shape::T),
            "j" => Some(Shape::J),
            "l" => Some(Shape::L),
            "s" => Some(Shape::S),
            "z" => Some(Shape::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "i",
            Shape::O => "o",
            Shape::T => "t",
            Shape::J => "j",
            Shape::L => "l",
            Shape::S => "s",
            Shape::Z => "z",
        }
    }

    /// Dense index in `0..7`, matching [`Shape::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Content of one grid tile
///
/// Shape identity is kept so a renderer can color locked pieces; the search
/// heuristics only look at [`TileState::is_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    Empty,
    Garbage,
    Piece(Shape),
}

impl TileState {
    pub fn is_empty(self) -> bool {
        matches!(self, TileState::Empty)
    }

    /// Single-character glyph for text dumps.
    pub fn glyph(self) -> char {
        match self {
            TileState::Empty => '.',
            TileState::Garbage => '#',
            TileState::Piece(shape) => shape.as_str().as_bytes()[0].to_ascii_uppercase() as char,
        }
    }
}

/// Grid coordinate, origin at the bottom-left, y grows upward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Identifier of a board inside a match (used for garbage routing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardId(pub u32);

/// Translation requested for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Down,
}

impl Direction {
    /// Anchor delta for this direction; `None` does not translate.
    pub fn delta(self) -> Option<(i8, i8)> {
        match self {
            Direction::None => None,
            Direction::Left => Some((-1, 0)),
            Direction::Right => Some((1, 0)),
            Direction::Down => Some((0, -1)),
        }
    }
}

/// Rotation requested for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationInput {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

impl RotationInput {
    /// Quarter-turn amount: +1 clockwise, -1 counter-clockwise.
    pub fn amount(self) -> i8 {
        match self {
            RotationInput::None => 0,
            RotationInput::Clockwise => 1,
            RotationInput::CounterClockwise => -1,
        }
    }
}

/// One discrete decision for one tick
///
/// Controllers set at most one of hold / hard drop / translate-or-rotate per
/// tick. The board gives `hold` precedence over `hard_drop`, and both over
/// movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub hold: bool,
    pub hard_drop: bool,
    pub direction: Direction,
    pub rotation: RotationInput,
}

impl Move {
    /// A tick with no input (gravity and locking still run).
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn hold() -> Self {
        Self {
            hold: true,
            ..Self::default()
        }
    }

    pub fn hard_drop() -> Self {
        Self {
            hard_drop: true,
            ..Self::default()
        }
    }

    pub fn translate(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn rotate(rotation: RotationInput) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of applying one [`Move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResults {
    pub held: bool,
    pub locked: bool,
    pub lines_cleared: u32,
}

/// Logical keys understood by the human controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
    HardDrop,
    Hold,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Left,
        Key::Right,
        Key::Down,
        Key::RotateCw,
        Key::RotateCcw,
        Key::HardDrop,
        Key::Hold,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Small bitset of [`Key`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeySet(u8);

impl KeySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut set = KeySet::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Keyboard state for one tick
///
/// `pressed` holds keys that went down since the previous frame, `held` holds
/// every key currently down (pressed keys included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub pressed: KeySet,
    pub held: KeySet,
}

impl InputFrame {
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key) || self.pressed.contains(key)
    }
}
