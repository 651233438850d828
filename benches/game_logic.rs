use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{shape, Board, Engine, GravityScheduler};
use blockfall::types::{PieceKind, TICK_MS};

fn bench_gravity_tick(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    let mut gravity = GravityScheduler::new();
    engine.start();

    c.bench_function("gravity_tick_16ms", |b| {
        b.iter(|| {
            if engine.is_over() {
                engine.start();
            }
            gravity.advance(&mut engine, black_box(TICK_MS));
        })
    });
}

fn bench_remove_rows(c: &mut Criterion) {
    c.bench_function("remove_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            let rows = board.full_rows();
            board.remove_rows(black_box(&rows))
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 19, Some(PieceKind::Z));
    }
    let t = shape(PieceKind::T);

    c.bench_function("can_place", |b| {
        b.iter(|| board.can_place(black_box(&t), black_box(4), black_box(17)))
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();
    let mut step = 1;

    c.bench_function("move_horizontal", |b| {
        b.iter(|| {
            if !engine.move_horizontal(step).unwrap_or(false) {
                step = -step;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            engine.rotate();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();

    c.bench_function("hard_drop_and_settle", |b| {
        b.iter(|| {
            if engine.is_over() {
                engine.start();
            }
            engine.hard_drop();
            engine.advance_time(500);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();
    let mut snap = engine.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });

    c.bench_function("compose_view", |b| b.iter(|| black_box(snap.compose())));
}

criterion_group!(
    benches,
    bench_gravity_tick,
    bench_remove_rows,
    bench_can_place,
    bench_move,
    bench_rotate,
    bench_hard_drop,
    bench_snapshot
);
criterion_main!(benches);
