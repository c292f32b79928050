//! Shape catalog - immutable per-shape cell patterns and kick tables
//!
//! Coordinates are anchor-relative with y pointing up. Rotation is computed
//! from the current cells rather than looked up, so the catalog only stores the
//! orientation-0 pattern per shape.
//! Reference: https://tetris.wiki/SRS

use crate::types::{Cell, Shape};

/// Four anchor-relative cells of a piece
pub type ShapeCells = [Cell; 4];

/// Kick attempts for one orientation transition, tried in order
pub type KickRow = [(i8, i8); 5];

/// Kick table indexed by [`kick_index`]
pub type KickTable = [KickRow; 8];

/// Point the rotation transform turns around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// Rotate around an integer cell (results are exact)
    Cell,
    /// Rotate around the center of the (0,0)-(1,1) square, rounding up
    HalfCell,
}

/// Static data for one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeData {
    pub shape: Shape,
    pub cells: ShapeCells,
    pub kicks: &'static KickTable,
    /// Highest orientation index worth visiting (0, 1 or 3)
    pub max_orientation: u8,
    pub pivot: Pivot,
}

const fn c(x: i8, y: i8) -> Cell {
    Cell::new(x, y)
}

/// I kick table
const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Kick table shared by J, L, O, S, T, Z
const JLOSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// Catalog in [`Shape::ALL`] order
static CATALOG: [ShapeData; 7] = [
    ShapeData {
        shape: Shape::I,
        cells: [c(-1, 1), c(0, 1), c(1, 1), c(2, 1)],
        kicks: &I_KICKS,
        max_orientation: 1,
        pivot: Pivot::HalfCell,
    },
    ShapeData {
        shape: Shape::O,
        cells: [c(0, 1), c(1, 1), c(0, 0), c(1, 0)],
        kicks: &JLOSTZ_KICKS,
        max_orientation: 0,
        pivot: Pivot::HalfCell,
    },
    ShapeData {
        shape: Shape::T,
        cells: [c(0, 1), c(-1, 0), c(0, 0), c(1, 0)],
        kicks: &JLOSTZ_KICKS,
        max_orientation: 3,
        pivot: Pivot::Cell,
    },
    ShapeData {
        shape: Shape::J,
        cells: [c(-1, 1), c(-1, 0), c(0, 0), c(1, 0)],
        kicks: &JLOSTZ_KICKS,
        max_orientation: 3,
        pivot: Pivot::Cell,
    },
    ShapeData {
        shape: Shape::L,
        cells: [c(1, 1), c(-1, 0), c(0, 0), c(1, 0)],
        kicks: &JLOSTZ_KICKS,
        max_orientation: 3,
        pivot: Pivot::Cell,
    },
    ShapeData {
        shape: Shape::S,
        cells: [c(0, 1), c(1, 1), c(-1, 0), c(0, 0)],
        kicks: &JLOSTZ_KICKS,
        max_orientation: 1,
        pivot: Pivot::Cell,
    },
    ShapeData {
        shape: Shape::Z,
        cells: [c(-1, 1), c(0, 1), c(0, 0), c(1, 0)],
        kicks: &JLOSTZ_KICKS,
        max_orientation: 1,
        pivot: Pivot::Cell,
    },
];

/// Look up the static data for a shape
pub fn shape_data(shape: Shape) -> &'static ShapeData {
    &CATALOG[shape.index()]
}

/// Orientation-0 cells for a shape
pub fn spawn_cells(shape: Shape) -> ShapeCells {
    shape_data(shape).cells
}

/// Row of the kick table used when arriving at `new_orientation` by turning in
/// `direction` (+1 clockwise, -1 counter-clockwise).
pub fn kick_index(new_orientation: u8, direction: i8) -> usize {
    let mut index = new_orientation as i32 * 2;
    if direction < 0 {
        index -= 1;
    }
    index.rem_euclid(8) as usize
}

/// Kick attempts for a transition
pub fn kicks_for(shape: Shape, new_orientation: u8, direction: i8) -> &'static KickRow {
    &shape_data(shape).kicks[kick_index(new_orientation, direction)]
}

/// Rotate one cell a quarter turn (+1 clockwise, -1 counter-clockwise)
#[inline]
pub fn rotate_cell(cell: Cell, pivot: Pivot, direction: i8) -> Cell {
    let Cell { x, y } = cell;
    match (pivot, direction >= 0) {
        (Pivot::Cell, true) => Cell::new(y, -x),
        (Pivot::Cell, false) => Cell::new(-y, x),
        (Pivot::HalfCell, true) => Cell::new(y, 1 - x),
        (Pivot::HalfCell, false) => Cell::new(1 - y, x),
    }
}

/// Rotate all cells of a shape a quarter turn
pub fn rotate_cells(cells: &ShapeCells, pivot: Pivot, direction: i8) -> ShapeCells {
    cells.map(|cell| rotate_cell(cell, pivot, direction))
}
