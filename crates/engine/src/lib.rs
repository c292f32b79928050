//! Decision making and match driving
//!
//! - [`heuristic`]: terrain features and the placement score
//! - [`place`]: apply a search goal to a scratch board
//! - [`search`]: exhaustive placement search with hold and lookahead
//! - [`controller`]: human and search-driven move sources
//! - [`driver`]: the per-tick match loop and garbage routing
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::BoardState;
//! use tetris_duel_engine::{Controller, Match, SearchConfig};
//!
//! let mut m = Match::new();
//! m.add_player(BoardState::with_seed(1), Controller::heuristic(SearchConfig::default()));
//! m.add_player(BoardState::with_seed(2), Controller::heuristic(SearchConfig::default()));
//!
//! let reports = m.tick(16);
//! assert_eq!(reports.len(), 2);
//! assert!(!m.is_finished());
//! ```

pub mod controller;
pub mod driver;
pub mod heuristic;
pub mod place;
pub mod search;

pub use controller::{Controller, HeuristicController, HumanController, HumanTiming};
pub use driver::{Match, Player, TickReport, TickReports, MAX_PLAYERS};
pub use heuristic::{evaluate, Features, Weights};
pub use place::{apply_goal, Goal, PlaceError};
pub use search::{candidate_goals, MoveSearchEngine, SearchConfig, SearchResult};
