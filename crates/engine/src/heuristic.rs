//! Board heuristics - scores a grid after a placement
//!
//! | Term | Default weight | Measure |
//! |------|----------------|---------|
//! | max height | -1 | tallest column, rightmost column excluded |
//! | bumpiness | -2 | triangular penalty on neighbour height steps |
//! | holes | -20 | each buried empty cell costs its column height |
//! | last column | -10 | filled tiles in the rightmost column |
//! | partial clear | -5 | per row short of four |
//! | four-row clear | +100 | flat bonus |
//! | new hole | -1e12 | hole score went up |
//!
//! The new-hole term dwarfs everything else, so any placement that keeps the
//! hole score flat beats every placement that raises it.

use tetris_duel_core::Grid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub max_height: f64,
    pub bumpiness: f64,
    pub holes: f64,
    pub last_column: f64,
    /// Applied per missing row on a 1-3 row clear
    pub partial_clear: f64,
    pub four_clear: f64,
    pub new_hole: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            max_height: -1.0,
            bumpiness: -2.0,
            holes: -20.0,
            last_column: -10.0,
            partial_clear: -5.0,
            four_clear: 100.0,
            new_hole: -1e12,
        }
    }
}

/// Raw terrain measures of one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub hole_score: u32,
    pub max_height: u32,
    pub bumpiness: u32,
    pub last_column_tiles: u32,
}

impl Features {
    pub fn measure(grid: &Grid) -> Self {
        let heights = column_heights(grid);
        Self {
            hole_score: hole_score_with(grid, &heights),
            max_height: max_height(&heights),
            bumpiness: bumpiness(&heights),
            last_column_tiles: tiles_in_last_column(grid),
        }
    }
}

pub fn column_heights(grid: &Grid) -> Vec<usize> {
    (0..grid.width() as usize)
        .map(|x| grid.column_height(x))
        .collect()
}

/// Sum over every empty cell below a column's top of that column's height
pub fn hole_score(grid: &Grid) -> u32 {
    hole_score_with(grid, &column_heights(grid))
}

fn hole_score_with(grid: &Grid, heights: &[usize]) -> u32 {
    let mut score = 0;
    for (x, &height) in heights.iter().enumerate() {
        let empty = (0..height)
            .filter(|&y| grid.get(x as i8, y as i8).is_some_and(|t| t.is_empty()))
            .count();
        score += (empty * height) as u32;
    }
    score
}

/// Tallest column, ignoring the rightmost one (kept as a well)
pub fn max_height(heights: &[usize]) -> u32 {
    let Some((_, rest)) = heights.split_last() else {
        return 0;
    };
    rest.iter().copied().max().unwrap_or(0) as u32
}

/// Neighbour step penalty over columns `0..W-1`.
///
/// Each step `d` costs `d(d+1)/2`. The first step is bumped by one when it
/// climbs, the last one when it falls; two consecutive steps above 2 add the
/// previous step to the current one.
pub fn bumpiness(heights: &[usize]) -> u32 {
    let width = heights.len();
    if width < 3 {
        return 0;
    }

    let mut total = 0u32;
    let mut prev_height = heights[0] as i64;
    let mut prev_diff = 0i64;
    for x in 1..width - 1 {
        let height = heights[x] as i64;
        let mut diff = (height - prev_height).abs();

        if (x == 1 && height > prev_height) || (x == width - 2 && height < prev_height) {
            diff += 1;
        }
        if prev_diff > 2 && diff > 2 {
            diff += prev_diff;
        }

        total += (diff * (diff + 1) / 2) as u32;
        prev_height = height;
        prev_diff = diff;
    }
    total
}

pub fn tiles_in_last_column(grid: &Grid) -> u32 {
    let x = grid.width() as i8 - 1;
    (0..grid.height() as i8)
        .filter(|&y| grid.is_occupied(x, y))
        .count() as u32
}

/// Line-clear term: bonus for four rows, penalty for fewer, nothing for none
pub fn clear_score(cleared: u32, weights: &Weights) -> f64 {
    match cleared {
        0 => 0.0,
        n if n >= 4 => weights.four_clear,
        n => (4 - n) as f64 * weights.partial_clear,
    }
}

/// Score `grid` right after a placement that cleared `cleared` rows, with
/// `prev_hole_score` measured before the placement.
pub fn evaluate(grid: &Grid, cleared: u32, prev_hole_score: u32, weights: &Weights) -> f64 {
    let f = Features::measure(grid);

    let mut score = f.max_height as f64 * weights.max_height
        + f.bumpiness as f64 * weights.bumpiness
        + f.hole_score as f64 * weights.holes
        + f.last_column_tiles as f64 * weights.last_column
        + clear_score(cleared, weights);

    if f.hole_score > prev_hole_score {
        score += weights.new_hole;
    }
    score
}
