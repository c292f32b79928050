use arrayvec::ArrayVec;

use crate::types::{BoardId, Cell, Shape, TileState, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub orientation: u8,
    pub anchor: Cell,
    /// Absolute cells
    pub cells: [Cell; 4],
    /// Absolute cells at the hard-drop landing spot
    pub ghost_cells: [Cell; 4],
}

/// Read-only copy of a board for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub id: BoardId,
    pub width: u8,
    pub height: u8,
    /// Row-major, row 0 at the bottom
    pub tiles: Vec<TileState>,
    pub active: ActiveSnapshot,
    pub held: Option<Shape>,
    pub hold_used: bool,
    pub preview: ArrayVec<Shape, PREVIEW_LEN>,
    pub pending_garbage: u32,
    pub game_over: bool,
}

impl BoardSnapshot {
    pub fn tile(&self, x: usize, y: usize) -> TileState {
        if x >= self.width as usize || y >= self.height as usize {
            return TileState::Empty;
        }
        self.tiles[y * self.width as usize + x]
    }

    /// Text dump, top row first, with the active piece drawn in lowercase and
    /// its ghost as `:`.
    pub fn to_text(&self) -> String {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut rows: Vec<Vec<char>> = (0..h)
            .map(|y| (0..w).map(|x| self.tile(x, y).glyph()).collect())
            .collect();

        let mut paint = |cells: &[Cell; 4], glyph: char| {
            for cell in cells {
                if cell.x < 0 || cell.y < 0 {
                    continue;
                }
                let (x, y) = (cell.x as usize, cell.y as usize);
                if x < w && y < h && rows[y][x] == '.' {
                    rows[y][x] = glyph;
                }
            }
        };
        if !self.game_over {
            paint(&self.active.ghost_cells, ':');
            let glyph = self.active.shape.as_str().chars().next().unwrap_or('?');
            paint(&self.active.cells, glyph);
        }

        let mut out = String::with_capacity((w + 1) * h);
        for row in rows.iter().rev() {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}
