//! Active piece - the falling shape and its current orientation
//!
//! Cells are stored relative to the anchor so translation is a single anchor
//! update; rotation recomputes the relative cells through the catalog
//! transform.

use crate::catalog::{shape_data, spawn_cells, ShapeCells};
use crate::types::{Cell, Shape};

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    /// Orientation index in `0..4`
    pub orientation: u8,
    pub anchor: Cell,
    /// Anchor-relative cells for the current orientation
    pub cells: ShapeCells,
}

impl ActivePiece {
    /// A piece in orientation 0 at `anchor`
    pub fn new(shape: Shape, anchor: Cell) -> Self {
        Self {
            shape,
            orientation: 0,
            anchor,
            cells: spawn_cells(shape),
        }
    }

    /// Spawn anchor for `shape` on a `width`×`height` grid
    pub fn spawn_anchor(shape: Shape, width: u8, height: u8) -> Cell {
        let x = (width / 2) as i8 - 1;
        let mut y = height as i8 - 3;
        if shape == Shape::I {
            y -= 1;
        }
        Cell::new(x, y)
    }

    /// Absolute grid cells
    pub fn absolute_cells(&self) -> [Cell; 4] {
        self.cells_at(self.anchor)
    }

    /// Absolute grid cells if the anchor were at `anchor`
    pub fn cells_at(&self, anchor: Cell) -> [Cell; 4] {
        self.cells.map(|c| c.offset(anchor.x, anchor.y))
    }

    /// Highest orientation index worth visiting for this shape
    pub fn max_orientation(&self) -> u8 {
        shape_data(self.shape).max_orientation
    }

    /// Horizontal extent of the relative cells as (min dx, max dx)
    pub fn x_extent(&self) -> (i8, i8) {
        let mut min_dx = i8::MAX;
        let mut max_dx = i8::MIN;
        for cell in self.cells {
            min_dx = min_dx.min(cell.x);
            max_dx = max_dx.max(cell.x);
        }
        (min_dx, max_dx)
    }
}
