//! Match driver - ticks every player of one match
//!
//! Each tick, for every live player in seat order: ask the controller for a
//! move, apply it with the elapsed time, and notify the controller when the
//! move held or locked. Line clears are collected during the tick and
//! broadcast once every player has moved, so garbage never lands mid-tick.

use arrayvec::ArrayVec;

use tetris_duel_core::{broadcast_lines_cleared, BoardState};
use tetris_duel_types::{BoardId, MoveResults};

use crate::controller::Controller;

/// Seats per match
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone)]
pub struct Player {
    pub board: BoardState,
    pub controller: Controller,
}

/// What happened to one player during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub id: BoardId,
    pub results: MoveResults,
    /// Locked and the controller is not muted
    pub play_lock_cue: bool,
    pub game_over: bool,
}

pub type TickReports = ArrayVec<TickReport, MAX_PLAYERS>;

#[derive(Debug, Clone, Default)]
pub struct Match {
    players: ArrayVec<Player, MAX_PLAYERS>,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player. The board is re-tagged with the seat index; returns
    /// `None` when every seat is taken.
    pub fn add_player(&mut self, board: BoardState, controller: Controller) -> Option<BoardId> {
        let id = BoardId(self.players.len() as u32);
        self.players
            .try_push(Player {
                board: board.with_id(id),
                controller,
            })
            .ok()?;
        Some(id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: BoardId) -> Option<&Player> {
        self.players.get(id.0 as usize)
    }

    pub fn player_mut(&mut self, id: BoardId) -> Option<&mut Player> {
        self.players.get_mut(id.0 as usize)
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> TickReports {
        let mut reports = TickReports::new();
        let mut clears: ArrayVec<(BoardId, u32), MAX_PLAYERS> = ArrayVec::new();

        for player in &mut self.players {
            let id = player.board.id();
            if player.board.game_over() {
                reports.push(TickReport {
                    id,
                    results: MoveResults::default(),
                    play_lock_cue: false,
                    game_over: true,
                });
                continue;
            }

            let mv = player.controller.get_move(&player.board);
            let results = player.board.make_move(mv, elapsed_ms);
            if results.held || results.locked {
                player.controller.notify_new_piece();
            }
            if results.lines_cleared > 0 {
                clears.push((id, results.lines_cleared));
            }

            reports.push(TickReport {
                id,
                results,
                play_lock_cue: results.locked && !player.controller.muted(),
                game_over: player.board.game_over(),
            });
        }

        for (source, cleared) in clears {
            broadcast_lines_cleared(
                self.players.iter_mut().map(|p| &mut p.board),
                source,
                cleared,
            );
        }

        reports
    }

    pub fn alive(&self) -> usize {
        self.players.iter().filter(|p| !p.board.game_over()).count()
    }

    /// At most one player left standing (or the only player is out)
    pub fn is_finished(&self) -> bool {
        match self.players.len() {
            0 => true,
            1 => self.alive() == 0,
            _ => self.alive() <= 1,
        }
    }

    /// The last board standing, once the match is finished
    pub fn winner(&self) -> Option<BoardId> {
        if self.players.len() < 2 || !self.is_finished() {
            return None;
        }
        self.players
            .iter()
            .find(|p| !p.board.game_over())
            .map(|p| p.board.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::HeuristicController;
    use crate::search::SearchConfig;
    use tetris_duel_types::InputFrame;

    fn bot() -> Controller {
        Controller::Heuristic(HeuristicController::new(SearchConfig::default()).with_cooldown_ms(0))
    }

    #[test]
    fn seats_are_numbered_and_bounded() {
        let mut m = Match::new();
        for i in 0..MAX_PLAYERS {
            assert_eq!(
                m.add_player(BoardState::with_seed(i as u32 + 1), bot()),
                Some(BoardId(i as u32))
            );
        }
        assert_eq!(m.add_player(BoardState::with_seed(9), bot()), None);
        assert_eq!(m.player(BoardId(2)).map(|p| p.board.id()), Some(BoardId(2)));
    }

    #[test]
    fn tick_reports_every_player() {
        let mut m = Match::new();
        m.add_player(BoardState::with_seed(1), bot());
        m.add_player(BoardState::with_seed(2), Controller::human());
        if let Some(p) = m.player_mut(BoardId(1)) {
            p.controller.set_input(InputFrame::default());
        }

        let reports = m.tick(16);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, BoardId(0));
        assert_eq!(reports[1].id, BoardId(1));
        assert!(!reports[1].results.locked);
        assert!(!m.is_finished());
    }

    #[test]
    fn bots_lock_pieces_silently() {
        let mut m = Match::new();
        m.add_player(BoardState::with_seed(3), bot());
        let mut locks = 0;
        for _ in 0..200 {
            for report in m.tick(16) {
                if report.results.locked {
                    locks += 1;
                    assert!(!report.play_lock_cue);
                }
            }
        }
        assert!(locks > 5);
    }

    #[test]
    fn solo_match_finishes_on_game_over() {
        let mut m = Match::new();
        m.add_player(BoardState::with_seed(1), Controller::human());
        assert!(!m.is_finished());
        if let Some(p) = m.player_mut(BoardId(0)) {
            p.board.lock(tetris_duel_core::AfterLock::Spawn);
            while !p.board.game_over() {
                p.board.lock(tetris_duel_core::AfterLock::Spawn);
            }
        }
        assert!(m.is_finished());
        assert_eq!(m.winner(), None);
        assert!(m.tick(16)[0].game_over);
    }
}
