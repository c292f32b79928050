//! Move search - exhaustive placement enumeration with optional lookahead
//!
//! For the active piece, every `(orientation, x)` pair is tried on its own
//! clone of the board: orientation runs over `0..=max_orientation` of the
//! shape, x over anchor columns `-1..W`. Pairs the board refuses (rotation
//! blocked, out of bounds, collision) are skipped. The rest are hard-dropped
//! and scored with [`heuristic::evaluate`](crate::heuristic::evaluate)
//! against the hole score before the drop. Ties keep the first pair found,
//! so the same board always yields the same goal.
//!
//! With `consider_hold`, the same search runs on a clone that held first;
//! holding wins only on a strictly better score.
//!
//! With `depth > 1`, each candidate's score adds the best score of the next
//! piece on the resulting board. Candidates whose immediate score falls more
//! than `prune_margin` below the best immediate score seen at the same level
//! are not expanded and count as `f64::MIN`. This pruning can discard the
//! true optimum.

use tetris_duel_core::{AfterLock, BoardState};

use crate::heuristic::{evaluate, hole_score, Weights};
use crate::place::{apply_goal, Goal};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Number of pieces placed per evaluated line (1 = current piece only)
    pub depth: u8,
    pub prune_margin: f64,
    pub consider_hold: bool,
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            prune_margin: 50.0,
            consider_hold: true,
            weights: Weights::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }
}

/// Chosen goal and its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub goal: Goal,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct MoveSearchEngine {
    config: SearchConfig,
}

impl Default for MoveSearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl MoveSearchEngine {
    pub fn new(mut config: SearchConfig) -> Self {
        config.depth = config.depth.max(1);
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Goal for the active piece, `None` if the board is over or nothing fits
    pub fn find_goal(&self, board: &BoardState) -> Option<Goal> {
        self.search(board).map(|result| result.goal)
    }

    pub fn search(&self, board: &BoardState) -> Option<SearchResult> {
        let direct = self.best_placement(board, self.config.depth);

        let held = if self.config.consider_hold && !board.hold_used() {
            let mut scratch = board.clone();
            if scratch.hold() && !scratch.game_over() {
                self.best_placement(&scratch, self.config.depth)
            } else {
                None
            }
        } else {
            None
        };

        match (direct, held) {
            (Some(direct), Some(held)) if held.score > direct.score => Some(SearchResult {
                goal: held.goal.with_hold(),
                score: held.score,
            }),
            (None, Some(held)) => Some(SearchResult {
                goal: held.goal.with_hold(),
                score: held.score,
            }),
            (direct, _) => direct,
        }
    }

    fn best_placement(&self, board: &BoardState, levels: u8) -> Option<SearchResult> {
        if board.game_over() {
            return None;
        }

        let prev_holes = hole_score(board.grid());
        let mut best: Option<SearchResult> = None;
        let mut best_immediate = f64::NEG_INFINITY;
        for goal in candidate_goals(board) {
            let Some(score) =
                self.score_candidate(board, goal, levels, prev_holes, &mut best_immediate)
            else {
                continue;
            };
            if best.map_or(true, |b| score > b.score) {
                best = Some(SearchResult { goal, score });
            }
        }
        best
    }

    /// Score one candidate on its own clone; `None` when the board refuses
    /// the goal. `best_immediate` is the best immediate score seen so far at
    /// this level and drives pruning.
    fn score_candidate(
        &self,
        board: &BoardState,
        goal: Goal,
        levels: u8,
        prev_holes: u32,
        best_immediate: &mut f64,
    ) -> Option<f64> {
        let after = if levels > 1 {
            AfterLock::Spawn
        } else {
            AfterLock::NoSpawn
        };
        let mut scratch = board.clone();
        let cleared = apply_goal(&mut scratch, goal, after).ok()?;
        let immediate = evaluate(scratch.grid(), cleared, prev_holes, &self.config.weights);

        if levels <= 1 {
            return Some(immediate);
        }
        if immediate < *best_immediate - self.config.prune_margin {
            return Some(f64::MIN);
        }
        *best_immediate = best_immediate.max(immediate);
        Some(match self.best_placement(&scratch, levels - 1) {
            Some(child) => immediate + child.score,
            None => f64::MIN,
        })
    }
}

/// Every `(orientation, x)` pair the search visits for the active piece, in
/// visiting order
pub fn candidate_goals(board: &BoardState) -> impl Iterator<Item = Goal> {
    let max_orientation = board.piece().max_orientation();
    let width = board.width() as i8;
    (0..=max_orientation).flat_map(move |orientation| (-1..width).map(move |x| Goal::new(orientation, x)))
}
