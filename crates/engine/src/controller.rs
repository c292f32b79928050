//! Controllers - the per-tick source of moves for one board
//!
//! [`Controller`] is a closed set of two variants sharing one contract:
//! `get_move` is called once per tick with the authoritative board,
//! `notify_new_piece` after every tick that held or locked, and `muted`
//! tells the driver whether to cue the lock sound.
//!
//! Both variants time themselves off the board clock, never a wall clock.

use tetris_duel_core::BoardState;
use tetris_duel_types::{
    Direction, InputFrame, Key, Move, RotationInput, BOT_MOVE_COOLDOWN_MS,
    FIRST_REPEAT_DELAY_MS, HELD_REPEAT_DELAY_MS,
};

use crate::place::Goal;
use crate::search::{MoveSearchEngine, SearchConfig};

#[derive(Debug, Clone)]
pub enum Controller {
    Human(HumanController),
    Heuristic(HeuristicController),
}

impl Controller {
    pub fn human() -> Self {
        Controller::Human(HumanController::new())
    }

    pub fn heuristic(config: SearchConfig) -> Self {
        Controller::Heuristic(HeuristicController::new(config))
    }

    pub fn get_move(&mut self, board: &BoardState) -> Move {
        match self {
            Controller::Human(c) => c.get_move(board),
            Controller::Heuristic(c) => c.get_move(board),
        }
    }

    /// Search-driven controllers do not cue the lock sound
    pub fn muted(&self) -> bool {
        matches!(self, Controller::Heuristic(_))
    }

    pub fn notify_new_piece(&mut self) {
        match self {
            Controller::Human(c) => c.notify_new_piece(),
            Controller::Heuristic(c) => c.notify_new_piece(),
        }
    }

    /// Feed this tick's keyboard state; ignored by non-human controllers
    pub fn set_input(&mut self, frame: InputFrame) {
        if let Controller::Human(c) = self {
            c.set_input(frame);
        }
    }
}

/// Key-repeat timing for held direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanTiming {
    pub first_repeat_delay_ms: u32,
    pub held_repeat_delay_ms: u32,
}

impl Default for HumanTiming {
    fn default() -> Self {
        Self {
            first_repeat_delay_ms: FIRST_REPEAT_DELAY_MS,
            held_repeat_delay_ms: HELD_REPEAT_DELAY_MS,
        }
    }
}

/// Keyboard-driven controller with key repeat on held directions
#[derive(Debug, Clone, Default)]
pub struct HumanController {
    timing: HumanTiming,
    input: InputFrame,
    next_move_ms: u64,
    same_sequential_moves: u32,
    last_direction: Direction,
}

impl HumanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: HumanTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn set_input(&mut self, frame: InputFrame) {
        self.input = frame;
    }

    pub fn get_move(&mut self, board: &BoardState) -> Move {
        let input = self.input;
        if input.is_pressed(Key::Hold) {
            return Move::hold();
        }
        if input.is_pressed(Key::HardDrop) {
            return Move::hard_drop();
        }

        let mut mv = Move::idle();
        self.movement(&mut mv, board.now_ms());
        mv.rotation = if input.is_pressed(Key::RotateCcw) {
            RotationInput::CounterClockwise
        } else if input.is_pressed(Key::RotateCw) {
            RotationInput::Clockwise
        } else {
            RotationInput::None
        };
        mv
    }

    fn movement(&mut self, mv: &mut Move, now_ms: u64) {
        const KEYS: [(Key, Direction); 3] = [
            (Key::Left, Direction::Left),
            (Key::Right, Direction::Right),
            (Key::Down, Direction::Down),
        ];

        let fresh = KEYS
            .iter()
            .find(|(key, _)| self.input.is_pressed(*key))
            .map(|&(_, direction)| direction);
        let direction = match fresh {
            Some(direction) => {
                self.last_direction = Direction::None;
                direction
            }
            None => match KEYS.iter().find(|(key, _)| self.input.is_held(*key)) {
                Some(&(_, direction)) => direction,
                None => return,
            },
        };

        // A fresh press always moves; a held key waits for its repeat.
        if fresh.is_none() && now_ms < self.next_move_ms {
            return;
        }

        mv.direction = direction;
        self.same_sequential_moves = if self.last_direction == direction {
            self.same_sequential_moves + 1
        } else {
            0
        };
        let delay = if self.same_sequential_moves == 0 {
            self.timing.first_repeat_delay_ms
        } else {
            self.timing.held_repeat_delay_ms
        };
        self.next_move_ms = now_ms + u64::from(delay);
        self.last_direction = direction;
    }

    pub fn notify_new_piece(&mut self) {
        self.same_sequential_moves = 0;
        self.next_move_ms = 0;
    }
}

/// Search-driven controller
///
/// Picks a goal when it has none, then walks the piece there one move per
/// cooldown: the hold first if the goal asks for it, then one sideways step
/// and one quarter turn per move, and a hard drop once both match.
#[derive(Debug, Clone)]
pub struct HeuristicController {
    engine: MoveSearchEngine,
    move_cooldown_ms: u32,
    next_move_ms: u64,
    goal: Option<Goal>,
    pending_hold: bool,
    hold_in_flight: bool,
}

impl HeuristicController {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            engine: MoveSearchEngine::new(config),
            move_cooldown_ms: BOT_MOVE_COOLDOWN_MS,
            next_move_ms: 0,
            goal: None,
            pending_hold: false,
            hold_in_flight: false,
        }
    }

    /// Pause between moves; 0 acts on every tick
    pub fn with_cooldown_ms(mut self, cooldown_ms: u32) -> Self {
        self.move_cooldown_ms = cooldown_ms;
        self
    }

    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    pub fn get_move(&mut self, board: &BoardState) -> Move {
        let now = board.now_ms();
        if now < self.next_move_ms {
            return Move::idle();
        }
        self.next_move_ms = now + u64::from(self.move_cooldown_ms);

        if self.goal.is_none() {
            if let Some(goal) = self.engine.find_goal(board) {
                self.goal = Some(goal);
                self.pending_hold = goal.hold_first;
            }
        }

        self.goal_to_move(board)
    }

    fn goal_to_move(&mut self, board: &BoardState) -> Move {
        let Some(goal) = self.goal else {
            return Move::idle();
        };

        if self.pending_hold {
            self.pending_hold = false;
            self.hold_in_flight = true;
            return Move::hold();
        }

        let piece = board.piece();
        if piece.anchor.x == goal.x && piece.orientation == goal.orientation {
            self.goal = None;
            return Move::hard_drop();
        }

        let mut mv = Move::idle();
        if goal.x < piece.anchor.x {
            mv.direction = Direction::Left;
        } else if goal.x > piece.anchor.x {
            mv.direction = Direction::Right;
        }

        let forward = (goal.orientation as i8 - piece.orientation as i8).rem_euclid(4);
        if forward == 3 {
            mv.rotation = RotationInput::CounterClockwise;
        } else if forward != 0 {
            mv.rotation = RotationInput::Clockwise;
        }
        mv
    }

    /// Drop any goal left over from the previous piece. The piece swapped in
    /// by a goal's own hold keeps the goal.
    pub fn notify_new_piece(&mut self) {
        if self.hold_in_flight {
            self.hold_in_flight = false;
        } else {
            self.goal = None;
            self.pending_hold = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_duel_core::{BoardConfig, SimpleRng};
    use tetris_duel_types::{KeySet, Shape};

    fn board(queue: &[Shape]) -> BoardState {
        BoardState::new(BoardConfig::default(), queue, SimpleRng::new(4)).unwrap()
    }

    fn frame(pressed: &[Key], held: &[Key]) -> InputFrame {
        InputFrame {
            pressed: pressed.iter().copied().collect::<KeySet>(),
            held: held.iter().copied().collect::<KeySet>(),
        }
    }

    #[test]
    fn human_hold_and_drop_take_priority() {
        let b = board(&[Shape::T]);
        let mut c = HumanController::new();
        c.set_input(frame(&[Key::Hold, Key::Left], &[]));
        assert_eq!(c.get_move(&b), Move::hold());
        c.set_input(frame(&[Key::HardDrop, Key::Left], &[]));
        assert_eq!(c.get_move(&b), Move::hard_drop());
    }

    #[test]
    fn human_held_key_repeats_after_first_delay() {
        let mut b = board(&[Shape::T]);
        let mut c = HumanController::new();

        c.set_input(frame(&[Key::Left], &[Key::Left]));
        assert_eq!(c.get_move(&b).direction, Direction::Left);

        c.set_input(frame(&[], &[Key::Left]));
        b.make_move(Move::idle(), 100);
        assert_eq!(c.get_move(&b).direction, Direction::None);

        b.make_move(Move::idle(), 50);
        assert_eq!(c.get_move(&b).direction, Direction::Left);

        b.make_move(Move::idle(), 10);
        assert_eq!(c.get_move(&b).direction, Direction::Left);
    }

    #[test]
    fn human_rotation_keys() {
        let b = board(&[Shape::T]);
        let mut c = HumanController::new();
        c.set_input(frame(&[Key::RotateCcw], &[]));
        assert_eq!(c.get_move(&b).rotation, RotationInput::CounterClockwise);
        c.set_input(frame(&[Key::RotateCw], &[]));
        assert_eq!(c.get_move(&b).rotation, RotationInput::Clockwise);
    }

    #[test]
    fn heuristic_respects_cooldown() {
        let mut b = board(&[Shape::T, Shape::O]);
        let mut c = HeuristicController::new(SearchConfig::default());
        assert!(!c.get_move(&b).is_idle());

        b.make_move(Move::idle(), 100);
        assert!(c.get_move(&b).is_idle());
    }

    #[test]
    fn heuristic_walks_to_goal_then_drops() {
        let mut b = board(&[Shape::I, Shape::O, Shape::T]);
        let mut c = Controller::Heuristic(
            HeuristicController::new(SearchConfig {
                consider_hold: false,
                ..SearchConfig::default()
            })
            .with_cooldown_ms(0),
        );

        let mut locked = false;
        for _ in 0..20 {
            let mv = c.get_move(&b);
            let results = b.make_move(mv, 16);
            if results.locked {
                assert!(mv.hard_drop);
                c.notify_new_piece();
                locked = true;
                break;
            }
        }
        assert!(locked);
        for x in 0..4 {
            assert!(b.grid().is_occupied(x, 0));
        }
    }

    #[test]
    fn heuristic_rotation_takes_short_way() {
        let b = board(&[Shape::T]);
        let mut c = HeuristicController::new(SearchConfig::default());
        c.goal = Some(Goal::new(3, b.piece().anchor.x));
        assert_eq!(c.get_move(&b).rotation, RotationInput::CounterClockwise);

        let mut c = HeuristicController::new(SearchConfig::default());
        c.goal = Some(Goal::new(2, b.piece().anchor.x));
        assert_eq!(c.get_move(&b).rotation, RotationInput::Clockwise);
    }

    #[test]
    fn heuristic_turns_back_one_step_counter_clockwise() {
        let mut b = board(&[Shape::T]);
        assert!(b.rotate(1));
        let mut c = HeuristicController::new(SearchConfig::default());
        c.goal = Some(Goal::new(0, b.piece().anchor.x));
        assert_eq!(c.get_move(&b).rotation, RotationInput::CounterClockwise);
    }

    #[test]
    fn notify_clears_stale_goal_but_not_after_own_hold() {
        let b = board(&[Shape::T]);
        let mut c = HeuristicController::new(SearchConfig::default());
        c.goal = Some(Goal::new(0, 0).with_hold());
        c.pending_hold = true;
        assert_eq!(c.get_move(&b), Move::hold());
        c.notify_new_piece();
        assert!(c.goal().is_some());

        c.notify_new_piece();
        assert!(c.goal().is_none());
    }

    #[test]
    fn muted_only_for_search() {
        assert!(!Controller::human().muted());
        assert!(Controller::heuristic(SearchConfig::default()).muted());
    }
}
