use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_duel::core::{BoardState, Grid};
use tetris_duel::engine::{Controller, Match, MoveSearchEngine, SearchConfig};
use tetris_duel::types::{Direction, Move, Shape, TileState};

fn bench_make_move(c: &mut Criterion) {
    let mut board = BoardState::with_seed(12345);

    c.bench_function("make_move_idle_16ms", |b| {
        b.iter(|| {
            if board.game_over() {
                board = BoardState::with_seed(12345);
            }
            board.make_move(black_box(Move::idle()), black_box(16));
        })
    });
}

fn bench_translate(c: &mut Criterion) {
    let mut board = BoardState::with_seed(12345);

    c.bench_function("make_move_translate", |b| {
        b.iter(|| {
            board.make_move(Move::translate(Direction::Left), 0);
            board.make_move(Move::translate(Direction::Right), 0);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            for y in 0..4 {
                for x in 0..10 {
                    grid.set(x, y, TileState::Piece(Shape::I));
                }
            }
            grid.clear_full_rows()
        })
    });
}

fn bench_board_clone(c: &mut Criterion) {
    let board = BoardState::with_seed(12345);

    c.bench_function("board_clone", |b| b.iter(|| black_box(&board).clone()));
}

fn bench_search(c: &mut Criterion) {
    let board = BoardState::with_seed(12345);
    let depth1 = MoveSearchEngine::new(SearchConfig::default());
    let depth2 = MoveSearchEngine::new(SearchConfig::default().with_depth(2));

    c.bench_function("find_goal_depth1", |b| {
        b.iter(|| depth1.find_goal(black_box(&board)))
    });
    c.bench_function("find_goal_depth2", |b| {
        b.iter(|| depth2.find_goal(black_box(&board)))
    });
}

fn bench_match_tick(c: &mut Criterion) {
    let new_match = || {
        let mut m = Match::new();
        for seed in [1, 2] {
            m.add_player(
                BoardState::with_seed(seed),
                Controller::heuristic(SearchConfig::default()),
            );
        }
        m
    };
    let mut m = new_match();

    c.bench_function("match_tick_16ms", |b| {
        b.iter(|| {
            if m.is_finished() {
                m = new_match();
            }
            m.tick(black_box(16))
        })
    });
}

criterion_group!(
    benches,
    bench_make_move,
    bench_translate,
    bench_line_clear,
    bench_board_clone,
    bench_search,
    bench_match_tick
);
criterion_main!(benches);
