use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{collides, kick_rotate, tetromino, Board, GameState};
use blockfall::types::{PieceKind, Position, RotateDirection};

fn bench_advance(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);

    c.bench_function("advance_1000ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset(Arc::from("gray"));
            }
            state.advance(black_box(1000));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let i = tetromino(PieceKind::I);

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::standard(Arc::from("gray"));
            // Fill bottom 4 rows except the last column
            for y in 16..20 {
                for x in 0..9 {
                    let _ = board.set_locked(x, y, Arc::from("red"));
                }
            }
            board.lock_piece(&i.shape, Position::new(8, 16), &i.color)
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset(Arc::from("gray"));
            }
            state.hard_drop();
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::standard(Arc::from("gray"));
    let t = tetromino(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| collides(&t.shape, black_box(Position::new(4, 10)), &board, Position::new(0, 1)))
    });
}

fn bench_kick_rotate(c: &mut Criterion) {
    let board = Board::standard(Arc::from("gray"));
    let i = tetromino(PieceKind::I);

    c.bench_function("kick_rotate", |b| {
        b.iter(|| {
            kick_rotate(
                &i.shape,
                black_box(Position::new(7, 5)),
                &board,
                RotateDirection::Clockwise,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_line_clear,
    bench_hard_drop,
    bench_collides,
    bench_kick_rotate
);
criterion_main!(benches);
