use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use snake::{Cell, Direction, Engine, FreeCellPool, GameConfig, StdRandom};

fn bench_tick(c: &mut Criterion) {
    // 200 segments laid over rows 10..13, head at (50, 10) heading up.
    let body: Vec<Cell> = (0..200).map(|i| Cell::new(50 - (i % 50), 10 + i / 50)).collect();

    c.bench_function("move_snake_len_200", |b| {
        b.iter_batched(
            || {
                Engine::from_parts(
                    GameConfig::default(),
                    StdRandom::new(Some(1)),
                    Direction::Top,
                    body.clone(),
                    Some(Cell::new(1, 1)),
                )
                .unwrap()
            },
            |mut engine| black_box(engine.move_snake()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut seed = 0;
    c.bench_function("bootstrap", |b| {
        b.iter(|| {
            seed += 1;
            let mut engine = Engine::new(GameConfig::default(), StdRandom::new(Some(seed))).unwrap();
            engine.init_direction().unwrap();
            engine.spawn_snake().unwrap();
            engine.spawn_food().unwrap();
            black_box(engine.food());
        })
    });
}

fn bench_free_cells(c: &mut Criterion) {
    let mut pool = FreeCellPool::new(50);
    let cell = Cell::new(25, 25);

    c.bench_function("free_cells_remove_insert", |b| {
        b.iter(|| {
            pool.remove(black_box(cell));
            pool.insert(black_box(cell));
        })
    });
}

criterion_group!(benches, bench_tick, bench_bootstrap, bench_free_cells);
criterion_main!(benches);
