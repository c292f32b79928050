//! Board tests - grid rules and the board-state machine

use tetris_duel::core::{AfterLock, BoardConfig, BoardError, BoardState, Grid, SimpleRng};
use tetris_duel::types::{
    Cell, Direction, Move, RotationInput, Shape, TileState, BOARD_HEIGHT, BOARD_WIDTH,
};

fn board(queue: &[Shape]) -> BoardState {
    BoardState::new(BoardConfig::default(), queue, SimpleRng::new(12345)).unwrap()
}

fn fill_row_except(board: &mut BoardState, y: i8, hole: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        if x != hole {
            assert!(board.set_tile(x, y, TileState::Garbage));
        }
    }
}

// ============== Grid ==============

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT);
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(grid.is_free(x, y), "Cell ({}, {}) should be free", x, y);
        }
    }
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_clear_single_row_shifts_down_by_one() {
    let mut grid = Grid::new(10, 20);
    for x in 0..10 {
        grid.set(x, 0, TileState::Garbage);
    }
    grid.set(2, 1, TileState::Piece(Shape::T));
    grid.set(7, 5, TileState::Piece(Shape::L));

    assert_eq!(grid.clear_full_rows(), 1);
    assert_eq!(grid.get(2, 0), Some(TileState::Piece(Shape::T)));
    assert_eq!(grid.get(7, 4), Some(TileState::Piece(Shape::L)));
    assert!(grid.is_free(7, 5));
    assert_eq!(grid.tiles().iter().filter(|t| !t.is_empty()).count(), 2);
}

#[test]
fn test_clear_on_empty_grid_does_not_mutate() {
    let mut grid = Grid::new(10, 20);
    let before = grid.clone();
    assert_eq!(grid.clear_full_rows(), 0);
    assert!(grid.shares_storage_with(&before));
}

#[test]
fn test_clone_shares_until_write() {
    let grid = Grid::new(10, 20);
    let mut copy = grid.clone();
    assert!(copy.shares_storage_with(&grid));
    copy.set(0, 0, TileState::Garbage);
    assert!(!copy.shares_storage_with(&grid));
    assert!(grid.is_free(0, 0));
}

// ============== Construction ==============

#[test]
fn test_degenerate_board_rejected() {
    let err = BoardState::new(BoardConfig::with_size(3, 20), &[Shape::T], SimpleRng::new(1))
        .unwrap_err();
    assert_eq!(err.code(), "degenerate_size");
    assert!(matches!(err, BoardError::DegenerateSize { width: 3, .. }));
}

#[test]
fn test_small_board_spawns() {
    let b = BoardState::new(BoardConfig::with_size(4, 4), &[Shape::I], SimpleRng::new(1)).unwrap();
    assert!(!b.game_over());
    assert!(b.is_valid_position(b.piece().anchor));
}

// ============== Validity ==============

#[test]
fn test_valid_position_matches_cell_rule() {
    let mut b = board(&[Shape::T]);
    b.set_tile(0, 0, TileState::Garbage);
    b.set_tile(5, 3, TileState::Garbage);
    b.set_tile(9, 10, TileState::Garbage);
    let piece = *b.piece();

    for y in -2..(BOARD_HEIGHT as i8 + 2) {
        for x in -2..(BOARD_WIDTH as i8 + 2) {
            let anchor = Cell::new(x, y);
            let expected = piece
                .cells_at(anchor)
                .iter()
                .all(|c| b.grid().get(c.x, c.y) == Some(TileState::Empty));
            assert_eq!(b.is_valid_position(anchor), expected, "anchor {:?}", anchor);
        }
    }
}

// ============== Movement ==============

#[test]
fn test_rotation_all_or_nothing_when_boxed_in() {
    let mut b = board(&[Shape::L]);
    let piece = *b.piece();
    let occupied = piece.absolute_cells();
    for y in 10..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if !occupied.contains(&Cell::new(x, y)) {
                b.set_tile(x, y, TileState::Garbage);
            }
        }
    }

    let results = b.make_move(Move::rotate(RotationInput::Clockwise), 16);
    assert!(!results.locked);
    assert_eq!(*b.piece(), piece);
    assert!(!b.rotate(-1));
    assert_eq!(*b.piece(), piece);
}

#[test]
fn test_rotation_kicks_off_left_wall() {
    let mut b = board(&[Shape::I]);
    assert!(b.rotate(1));
    while b.translate(-1, 0) {}
    let upright = *b.piece();
    assert_eq!(upright.anchor.x, -1);

    // In place and one step left both leave the grid; the (2, 0) kick fits.
    assert!(b.rotate(-1));
    assert_eq!(b.piece().orientation, 0);
    assert_eq!(b.piece().anchor, upright.anchor.offset(2, 0));
    assert_eq!(b.piece().anchor.x, 1);
    let cells = b.piece().absolute_cells();
    for x in 0..4 {
        assert!(cells.contains(&Cell::new(x, upright.anchor.y + 1)));
    }
}

#[test]
fn test_hard_drop_then_down_fails() {
    let mut b = board(&[Shape::S]);
    b.hard_drop(AfterLock::NoSpawn);
    assert!(!b.translate(0, -1));
    assert!(!b.can_move(0, -1));
}

#[test]
fn test_i_left_four_then_hard_drop() {
    let mut b = board(&[Shape::I, Shape::O]);
    for _ in 0..4 {
        b.make_move(Move::translate(Direction::Left), 16);
    }
    let results = b.make_move(Move::hard_drop(), 16);

    assert!(results.locked);
    assert_eq!(results.lines_cleared, 0);
    assert!(!b.game_over());
    for x in 0..4 {
        assert_eq!(b.grid().get(x, 0), Some(TileState::Piece(Shape::I)));
    }
    assert_eq!(b.grid().tiles().iter().filter(|t| !t.is_empty()).count(), 4);
}

#[test]
fn test_filling_gap_clears_and_compacts() {
    let mut b = board(&[Shape::I, Shape::O]);
    fill_row_except(&mut b, 0, 3);
    b.set_tile(0, 1, TileState::Garbage);

    b.make_move(Move::rotate(RotationInput::Clockwise), 16);
    b.make_move(Move::translate(Direction::Left), 16);
    b.make_move(Move::translate(Direction::Left), 16);
    let results = b.make_move(Move::hard_drop(), 16);

    assert!(results.locked);
    assert_eq!(results.lines_cleared, 1);
    assert_eq!(b.grid().column_height(3), 3);
    assert_eq!(b.grid().get(0, 0), Some(TileState::Garbage));
    assert_eq!(b.grid().column_height(5), 0);
}

// ============== Hold / Garbage ==============

#[test]
fn test_hold_twice_swaps_once() {
    let mut b = board(&[Shape::Z, Shape::J, Shape::T]);
    assert!(b.make_move(Move::hold(), 16).held);
    assert!(b.make_move(Move::hold(), 16).held);
    assert_eq!(b.held(), Some(Shape::Z));
    assert_eq!(b.piece().shape, Shape::J);
}

#[test]
fn test_pending_garbage_pushed_on_lock() {
    let mut b = board(&[Shape::O, Shape::T]);
    b.set_tile(0, 0, TileState::Piece(Shape::L));
    b.add_pending_garbage(2);

    b.make_move(Move::translate(Direction::Right), 16);
    b.make_move(Move::hard_drop(), 16);

    assert_eq!(b.pending_garbage(), 0);
    for y in 0..2 {
        let row = b.grid().row(y).unwrap();
        assert_eq!(row.iter().filter(|t| **t == TileState::Garbage).count(), 9);
        assert_eq!(row.iter().filter(|t| t.is_empty()).count(), 1);
    }
    assert_eq!(b.grid().get(0, 2), Some(TileState::Piece(Shape::L)));
    assert_eq!(b.grid().get(5, 2), Some(TileState::Piece(Shape::O)));
}

#[test]
fn test_garbage_overflow_discards_top_rows() {
    let mut b = board(&[Shape::O, Shape::T]);
    b.set_tile(0, 19, TileState::Piece(Shape::L));
    b.add_pending_garbage(3);
    b.hard_drop(AfterLock::NoSpawn);
    assert!(b.grid().is_free(0, 19));
    assert_eq!(b.grid().tiles().iter().filter(|t| **t == TileState::Piece(Shape::L)).count(), 0);
}

// ============== Clock ==============

#[test]
fn test_idle_piece_falls_and_locks_on_its_own() {
    let mut b = board(&[Shape::O, Shape::T]);
    let mut locked_at = None;
    for tick in 0..3000u32 {
        if b.make_move(Move::idle(), 16).locked {
            locked_at = Some(tick);
            break;
        }
    }
    assert!(locked_at.is_some());
    assert_eq!(b.piece().shape, Shape::T);
    assert_eq!(b.grid().column_height(4), 2);
}
