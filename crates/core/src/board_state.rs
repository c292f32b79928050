//! Board state module - the deterministic board-state machine
//!
//! [`BoardState`] owns the grid, the active piece, the upcoming queue, the
//! held shape, the gravity / lock timers and the pending garbage count. All
//! mutation from the outside goes through [`BoardState::make_move`]; the
//! finer-grained operations (`translate`, `rotate`, `hard_drop`, `hold`) are
//! public for the search engine, which drives scratch clones directly.
//!
//! # Timing
//!
//! The board owns a millisecond clock advanced by the caller on every
//! `make_move`. Gravity runs once per elapsed step delay. When gravity fails
//! the piece starts *locking*: it locks once the clock passes either the lock
//! deadline (pushed back by every successful sideways move or rotation) or the
//! max-lock deadline (armed at the first landing of the piece, never pushed
//! back).
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::BoardState;
//! use tetris_duel_types::{Direction, Move};
//!
//! let mut board = BoardState::with_seed(7);
//! board.make_move(Move::translate(Direction::Left), 16);
//! let results = board.make_move(Move::hard_drop(), 16);
//! assert!(results.locked);
//! assert!(!board.game_over());
//! ```

use crate::catalog::{kicks_for, rotate_cells, shape_data, ShapeCells};
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::garbage::garbage_for_clear;
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::{shuffled_bag, PieceQueue, SimpleRng};
use crate::snapshot::{ActiveSnapshot, BoardSnapshot};
use crate::types::{BoardId, Cell, Move, MoveResults, Shape, TileState, PREVIEW_LEN};

/// What happens after a piece is merged into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterLock {
    /// Spawn the next queued shape (normal play)
    Spawn,
    /// Leave the merged piece in place; used by simulation-only placements
    NoSpawn,
}

/// Complete state of one board
#[derive(Debug, Clone)]
pub struct BoardState {
    id: BoardId,
    config: BoardConfig,
    grid: Grid,
    queue: PieceQueue,
    rng: SimpleRng,
    held: Option<Shape>,
    piece: ActivePiece,
    hold_used: bool,
    game_over: bool,
    pending_garbage: u32,
    clock_ms: u64,
    next_step_ms: u64,
    locking: bool,
    lock_deadline_ms: u64,
    max_lock_deadline_ms: Option<u64>,
}

impl BoardState {
    /// Build a board and spawn its first piece.
    ///
    /// Fails on a degenerate size, zero timing, or an empty initial queue.
    pub fn new(
        config: BoardConfig,
        initial_queue: &[Shape],
        rng: SimpleRng,
    ) -> Result<Self, BoardError> {
        config.validate()?;
        if initial_queue.is_empty() {
            return Err(BoardError::EmptyQueue);
        }
        Ok(Self::build(config, initial_queue, rng))
    }

    /// Default-sized board whose first bag comes from `seed`
    pub fn with_seed(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let bag = shuffled_bag(&mut rng);
        Self::build(BoardConfig::default(), &bag, rng)
    }

    fn build(config: BoardConfig, initial_queue: &[Shape], mut rng: SimpleRng) -> Self {
        let mut queue = PieceQueue::new(initial_queue, &mut rng);
        let first = queue.pop(&mut rng);
        let mut board = Self {
            id: BoardId::default(),
            config,
            grid: Grid::new(config.width, config.height),
            queue,
            rng,
            held: None,
            piece: ActivePiece::new(first, Cell::default()),
            hold_used: false,
            game_over: false,
            pending_garbage: 0,
            clock_ms: 0,
            next_step_ms: 0,
            locking: false,
            lock_deadline_ms: 0,
            max_lock_deadline_ms: None,
        };
        board.spawn(first);
        board
    }

    /// Tag the board for garbage routing
    pub fn with_id(mut self, id: BoardId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u8 {
        self.config.width
    }

    pub fn height(&self) -> u8 {
        self.config.height
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn held(&self) -> Option<Shape> {
        self.held
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn locking(&self) -> bool {
        self.locking
    }

    pub fn lock_deadline_ms(&self) -> u64 {
        self.lock_deadline_ms
    }

    pub fn max_lock_deadline_ms(&self) -> Option<u64> {
        self.max_lock_deadline_ms
    }

    /// Apply one tick of input.
    ///
    /// - `hold`: swap with the held shape (no-op if already used this piece)
    /// - `hard_drop`: drop to rest and lock
    /// - otherwise: at most one translation and one rotation, then gravity and
    ///   lock-delay bookkeeping for this tick
    ///
    /// `elapsed_ms` advances the board clock before the move is applied. A board
    /// in game over ignores every move.
    pub fn make_move(&mut self, mv: Move, elapsed_ms: u32) -> MoveResults {
        let mut results = MoveResults::default();
        if self.game_over {
            return results;
        }
        self.clock_ms += u64::from(elapsed_ms);

        if mv.hold {
            self.hold();
            results.held = true;
        } else if mv.hard_drop {
            results.locked = true;
            results.lines_cleared = self.hard_drop(AfterLock::Spawn);
        } else {
            if let Some((dx, dy)) = mv.direction.delta() {
                self.translate(dx, dy);
            }
            let amount = mv.rotation.amount();
            if amount != 0 {
                self.rotate(amount);
            }

            self.step();
            if self.lock_due() {
                results.locked = true;
                results.lines_cleared = self.lock(AfterLock::Spawn);
            }
        }

        results
    }

    /// Whether the active piece fits with its anchor at `anchor`
    pub fn is_valid_position(&self, anchor: Cell) -> bool {
        self.fits(&self.piece.cells, anchor)
    }

    fn fits(&self, cells: &ShapeCells, anchor: Cell) -> bool {
        cells.iter().all(|c| {
            match (c.x.checked_add(anchor.x), c.y.checked_add(anchor.y)) {
                (Some(x), Some(y)) => self.grid.is_free(x, y),
                _ => false,
            }
        })
    }

    /// Whether the active piece could move by (dx, dy)
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.checked_offset(dx, dy)
            .is_some_and(|anchor| self.is_valid_position(anchor))
    }

    /// Move the active piece by (dx, dy). Returns false, leaving the board
    /// untouched, if the target collides or leaves the grid.
    pub fn translate(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(anchor) = self.checked_offset(dx, dy) else {
            return false;
        };
        if !self.is_valid_position(anchor) {
            return false;
        }

        self.piece.anchor = anchor;
        if dx != 0 {
            self.extend_lock();
        }
        true
    }

    fn checked_offset(&self, dx: i8, dy: i8) -> Option<Cell> {
        let Cell { x, y } = self.piece.anchor;
        Some(Cell::new(x.checked_add(dx)?, y.checked_add(dy)?))
    }

    /// Rotate by `amount` quarter turns (positive is clockwise).
    ///
    /// The amount is taken mod 4: 2 is two clockwise turns and 3 is one
    /// counter-clockwise turn. Each quarter turn either succeeds (possibly with
    /// a kick) or leaves orientation and cells exactly as they were. Returns
    /// true when every requested quarter turn succeeded.
    pub fn rotate(&mut self, amount: i8) -> bool {
        if self.game_over {
            return false;
        }
        match amount.rem_euclid(4) {
            0 => true,
            1 => self.rotate_quarter(1),
            2 => self.rotate_quarter(1) && self.rotate_quarter(1),
            _ => self.rotate_quarter(-1),
        }
    }

    fn rotate_quarter(&mut self, direction: i8) -> bool {
        let current = self.piece;
        let data = shape_data(current.shape);
        let orientation = (current.orientation as i8 + direction).rem_euclid(4) as u8;
        let cells = rotate_cells(&current.cells, data.pivot, direction);

        for &(kx, ky) in kicks_for(current.shape, orientation, direction) {
            let anchor = current.anchor.offset(kx, ky);
            if self.fits(&cells, anchor) {
                self.piece = ActivePiece {
                    orientation,
                    anchor,
                    cells,
                    ..current
                };
                self.extend_lock();
                return true;
            }
        }

        false
    }

    fn extend_lock(&mut self) {
        if self.locking {
            self.lock_deadline_ms = self.clock_ms + u64::from(self.config.lock_delay_ms);
        }
    }

    /// Gravity for this tick
    fn step(&mut self) {
        if self.clock_ms < self.next_step_ms {
            return;
        }
        self.next_step_ms += u64::from(self.config.step_delay_ms);

        if self.translate(0, -1) {
            self.locking = false;
        } else if !self.locking {
            self.locking = true;
            self.lock_deadline_ms = self.clock_ms + u64::from(self.config.lock_delay_ms);
            if self.max_lock_deadline_ms.is_none() {
                self.max_lock_deadline_ms =
                    Some(self.clock_ms + u64::from(self.config.max_lock_delay_ms));
            }
        }
    }

    fn lock_due(&self) -> bool {
        if !self.locking {
            return false;
        }
        let past_max = self
            .max_lock_deadline_ms
            .map_or(false, |deadline| self.clock_ms > deadline);
        self.clock_ms > self.lock_deadline_ms || past_max
    }

    /// Anchor where the active piece would come to rest
    pub fn ghost_anchor(&self) -> Cell {
        let mut anchor = self.piece.anchor;
        while anchor.y > i8::MIN && self.is_valid_position(anchor.offset(0, -1)) {
            anchor = anchor.offset(0, -1);
        }
        anchor
    }

    /// Drop to rest and lock. Returns the number of cleared rows.
    pub fn hard_drop(&mut self, after: AfterLock) -> u32 {
        if self.game_over {
            return 0;
        }
        while self.translate(0, -1) {}
        self.lock(after)
    }

    /// Merge the active piece, clear rows, apply pending garbage, then spawn
    /// unless suppressed. Returns the number of cleared rows.
    pub fn lock(&mut self, after: AfterLock) -> u32 {
        if self.game_over {
            return 0;
        }
        let tile = TileState::Piece(self.piece.shape);
        for cell in self.piece.absolute_cells() {
            self.grid.set(cell.x, cell.y, tile);
        }

        let cleared = self.grid.clear_full_rows() as u32;
        self.push_garbage();

        if after == AfterLock::Spawn {
            let next = self.queue.pop(&mut self.rng);
            self.spawn(next);
        }
        cleared
    }

    fn spawn(&mut self, shape: Shape) {
        let anchor = ActivePiece::spawn_anchor(shape, self.config.width, self.config.height);
        self.piece = ActivePiece::new(shape, anchor);
        self.next_step_ms = self.clock_ms + u64::from(self.config.step_delay_ms);
        self.locking = false;
        self.lock_deadline_ms = 0;
        self.max_lock_deadline_ms = None;
        self.hold_used = false;

        if !self.is_valid_position(anchor) {
            self.game_over = true;
        }
    }

    /// Set the active shape aside, swapping with the held one (or taking the
    /// next queued shape if nothing is held). Once per piece; returns false if
    /// hold was already used.
    pub fn hold(&mut self) -> bool {
        if self.hold_used || self.game_over {
            return false;
        }
        let previous = self.held.replace(self.piece.shape);
        let next = match previous {
            Some(shape) => shape,
            None => self.queue.pop(&mut self.rng),
        };
        self.spawn(next);
        self.hold_used = true;
        true
    }

    /// Queue `rows` garbage rows for the next lock
    pub fn add_pending_garbage(&mut self, rows: u32) {
        self.pending_garbage = self.pending_garbage.saturating_add(rows);
    }

    /// Peer notification: `source` cleared `cleared` rows.
    ///
    /// Boards ignore their own clears; everyone else queues half the rows,
    /// rounded up.
    pub fn on_lines_cleared(&mut self, source: BoardId, cleared: u32) {
        if source != self.id {
            self.add_pending_garbage(garbage_for_clear(cleared));
        }
    }

    fn push_garbage(&mut self) {
        if self.pending_garbage == 0 {
            return;
        }
        let hole = self.rng.next_range(u32::from(self.config.width)) as usize;
        self.grid
            .push_garbage_rows(self.pending_garbage as usize, hole);
        self.pending_garbage = 0;
    }

    /// Write a tile directly, for scenario setup.
    ///
    /// Refuses (returns false) out-of-bounds writes and writes that would land
    /// under the active piece.
    pub fn set_tile(&mut self, x: i8, y: i8, tile: TileState) -> bool {
        let cell = Cell::new(x, y);
        if !tile.is_empty() && self.piece.absolute_cells().contains(&cell) {
            return false;
        }
        self.grid.set(x, y, tile)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> BoardSnapshot {
        let ghost = self.ghost_anchor();
        BoardSnapshot {
            id: self.id,
            width: self.config.width,
            height: self.config.height,
            tiles: self.grid.tiles().to_vec(),
            active: ActiveSnapshot {
                shape: self.piece.shape,
                orientation: self.piece.orientation,
                anchor: self.piece.anchor,
                cells: self.piece.absolute_cells(),
                ghost_cells: self.piece.cells_at(ghost),
            },
            held: self.held,
            hold_used: self.hold_used,
            preview: self.queue.iter().take(PREVIEW_LEN).collect(),
            pending_garbage: self.pending_garbage,
            game_over: self.game_over,
        }
    }
}
