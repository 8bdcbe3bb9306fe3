use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blockfall::core::{Board, Game};
use blockfall::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::with_seed(10, 24, 12345).unwrap();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            game.tick();
            if game.is_game_over() {
                game.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 24);
            for y in 20..24 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = Game::with_seed(10, 24, 12345).unwrap();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            game.hard_drop();
            if game.is_game_over() {
                game.reset();
            }
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut game = Game::with_seed(10, 24, 12345).unwrap();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            game.move_left();
            game.move_right()
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = Game::with_seed(10, 24, 12345).unwrap();

    c.bench_function("rotate_cw_ccw", |b| {
        b.iter(|| {
            game.rotate_cw();
            game.rotate_ccw()
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let game = Game::with_seed(10, 24, 12345).unwrap();
    let mut snapshot = game.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(black_box(&mut snapshot));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
