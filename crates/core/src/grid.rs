//! Grid module - the W×H tile array
//!
//! Storage is a flat row-major array (`y * width + x`, row 0 at the bottom)
//! behind an `Arc`, so cloning a grid is a pointer copy and the first write on
//! either side pays for the duplication. Search clones that are only read
//! never copy tiles.

use std::sync::Arc;

use crate::types::TileState;

/// The board grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    tiles: Arc<Vec<TileState>>,
}

impl Grid {
    /// Create an empty grid. Callers validate the dimensions.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            tiles: Arc::new(vec![TileState::Empty; width as usize * height as usize]),
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Tile at (x, y), `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<TileState> {
        self.index(x, y).map(|idx| self.tiles[idx])
    }

    /// Set tile at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, tile: TileState) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                Arc::make_mut(&mut self.tiles)[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(TileState::Empty))
    }

    /// In bounds and not empty
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(t) if !t.is_empty())
    }

    /// Tiles of row `y`, left to right; `None` above the top row
    pub fn row(&self, y: usize) -> Option<&[TileState]> {
        if y >= self.height as usize {
            return None;
        }
        let w = self.width as usize;
        Some(&self.tiles[y * w..(y + 1) * w])
    }

    pub fn tiles(&self) -> &[TileState] {
        &self.tiles
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|t| !t.is_empty()))
    }

    /// Height of a column: index of its topmost filled tile plus one, 0 if empty
    pub fn column_height(&self, x: usize) -> usize {
        let w = self.width as usize;
        (0..self.height as usize)
            .rev()
            .find(|&y| !self.tiles[y * w + x].is_empty())
            .map_or(0, |y| y + 1)
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// Rows are scanned bottom to top; each kept row moves down by the number of
    /// full rows found below it and vacated rows at the top are emptied.
    /// Returns the number of rows removed; a grid without full rows is left
    /// untouched (and not copied).
    pub fn clear_full_rows(&mut self) -> usize {
        let h = self.height as usize;
        let Some(first) = (0..h).find(|&y| self.is_row_full(y)) else {
            return 0;
        };

        let w = self.width as usize;
        let tiles = Arc::make_mut(&mut self.tiles);
        let mut write_y = first;
        for read_y in first..h {
            let start = read_y * w;
            if tiles[start..start + w].iter().all(|t| !t.is_empty()) {
                continue;
            }
            if write_y != read_y {
                tiles.copy_within(start..start + w, write_y * w);
            }
            write_y += 1;
        }

        let cleared = h - write_y;
        for tile in &mut tiles[write_y * w..] {
            *tile = TileState::Empty;
        }
        cleared
    }

    /// Shift every row up by `count` and fill the bottom `count` rows with
    /// garbage, leaving `hole_column` empty in each. Rows pushed past the top
    /// are discarded.
    pub fn push_garbage_rows(&mut self, count: usize, hole_column: usize) {
        if count == 0 {
            return;
        }
        let w = self.width as usize;
        let h = self.height as usize;
        let count = count.min(h);
        let tiles = Arc::make_mut(&mut self.tiles);

        tiles.copy_within(0..(h - count) * w, count * w);
        for y in 0..count {
            for x in 0..w {
                tiles[y * w + x] = if x == hole_column {
                    TileState::Empty
                } else {
                    TileState::Garbage
                };
            }
        }
    }

    /// Text dump, top row first
    pub fn to_text(&self) -> String {
        let w = self.width as usize;
        let mut out = String::with_capacity((w + 1) * self.height as usize);
        for y in (0..self.height as usize).rev() {
            out.extend(self.row(y).into_iter().flatten().map(|t| t.glyph()));
            out.push('\n');
        }
        out
    }

    /// Whether two grids still share storage (no write since the clone)
    pub fn shares_storage_with(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.tiles, &other.tiles)
    }
}
