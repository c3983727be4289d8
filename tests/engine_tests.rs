//! Engine lifecycle tests through the public API

use snake::{
    BoardFullPolicy, Cell, Direction, Engine, EngineError, GameConfig, Phase, RandomProvider, ScriptedRandom,
    StdRandom, TickOutcome,
};

const TOTAL: usize = 50 * 50;

fn bootstrap<R: RandomProvider>(rng: R) -> Engine<R> {
    let mut engine = Engine::new(GameConfig::default(), rng).unwrap();
    engine.init_direction().unwrap();
    engine.spawn_snake().unwrap();
    engine.spawn_food().unwrap();
    engine
}

fn assert_partition<R: RandomProvider>(engine: &Engine<R>) {
    for cell in engine.snake().iter() {
        assert!(!engine.free_cells().contains(*cell), "{} is both free and occupied", cell);
    }
    assert_eq!(engine.free_cells().len() + engine.snake().len(), TOTAL);
}

#[test]
fn test_lifecycle_phases() {
    let mut engine = Engine::new(GameConfig::default(), StdRandom::new(Some(3))).unwrap();
    assert_eq!(engine.phase(), Phase::Uninitialized);

    engine.init_direction().unwrap();
    assert_eq!(engine.phase(), Phase::DirectionSet);

    engine.spawn_snake().unwrap();
    assert_eq!(engine.phase(), Phase::Spawned);

    engine.spawn_food().unwrap();
    assert_eq!(engine.phase(), Phase::Fed);

    engine.move_snake().unwrap();
    assert_eq!(engine.phase(), Phase::Playing);
}

#[test]
fn test_spawn_snake_before_direction_fails() {
    let mut engine = Engine::new(GameConfig::default(), StdRandom::new(Some(1))).unwrap();
    assert_eq!(engine.spawn_snake(), Err(EngineError::DirectionNotSet));
}

#[test]
fn test_init_direction_twice_fails() {
    let mut engine = Engine::new(GameConfig::default(), StdRandom::new(Some(1))).unwrap();
    engine.init_direction().unwrap();
    assert_eq!(engine.init_direction(), Err(EngineError::InvalidState));
}

#[test]
fn test_spawn_partitions_the_field() {
    for seed in 0..20 {
        let engine = bootstrap(StdRandom::new(Some(seed)));
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.free_cells().len(), TOTAL - 4);
        assert_partition(&engine);

        let food = engine.food().unwrap();
        assert!(engine.free_cells().contains(food));
    }
}

#[test]
fn test_spawned_head_respects_inset() {
    for seed in 0..50 {
        let engine = bootstrap(StdRandom::new(Some(seed)));
        let head = engine.snake().head().unwrap();
        assert!((7..=44).contains(&head.x), "head {} too close to border", head);
        assert!((7..=44).contains(&head.y), "head {} too close to border", head);
        for cell in engine.snake().iter() {
            assert!(cell.in_bounds(50));
        }
    }
}

#[test]
fn test_straight_run_keeps_length_and_partition() {
    // Food parked far off the snake's row; the snake runs right and wraps around.
    let body = [Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10), Cell::new(7, 10)];
    let mut engine = Engine::from_parts(
        GameConfig::default(),
        ScriptedRandom::new(),
        Direction::Right,
        body,
        Some(Cell::new(1, 40)),
    )
    .unwrap();

    for _ in 0..120 {
        let outcome = engine.move_snake().unwrap();
        assert!(matches!(outcome, TickOutcome::Moved { ate: false, .. }));
        assert_eq!(engine.snake().len(), 4);
        assert_partition(&engine);
    }
    assert_eq!(engine.ticks(), 120);
    // 10 + 120 = 130 -> wraps past 50 twice
    assert_eq!(engine.snake().head(), Some(Cell::new(30, 10)));
}

#[test]
fn test_eating_grows_by_one() {
    let body = [Cell::new(10, 10), Cell::new(10, 11), Cell::new(10, 12), Cell::new(10, 13)];
    let mut engine =
        Engine::from_parts(GameConfig::default(), ScriptedRandom::new(), Direction::Top, body, Some(Cell::new(10, 8)))
            .unwrap();

    engine.move_snake().unwrap();
    assert_eq!(engine.snake().len(), 4);
    assert!(engine.rng().index_calls().is_empty());

    let outcome = engine.move_snake().unwrap();
    assert!(matches!(outcome, TickOutcome::Moved { ate: true, old_tail: None, .. }));
    assert_eq!(engine.snake().len(), 5);
    assert_eq!(engine.rng().index_calls().len(), 1);
    assert_eq!(engine.score(), 1);
    assert_partition(&engine);
}

#[test]
fn test_reversal_is_ignored_during_play() {
    let mut engine = bootstrap(StdRandom::new(Some(11)));
    let heading = engine.direction();
    let reverse = match heading {
        Direction::Top => Direction::Down,
        Direction::Down => Direction::Top,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
        Direction::None => unreachable!(),
    };

    assert!(!engine.set_direction(reverse));
    assert_eq!(engine.direction(), heading);
    engine.move_snake().unwrap();
    assert!(engine.is_playing());
}

#[test]
fn test_turning_into_own_body_ends_the_game() {
    // Heading right, then down, left, up closes a loop onto the second segment.
    let body = [Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10), Cell::new(7, 10), Cell::new(6, 10)];
    let mut engine = Engine::from_parts(
        GameConfig::default(),
        ScriptedRandom::new(),
        Direction::Right,
        body,
        Some(Cell::new(40, 40)),
    )
    .unwrap();

    assert!(engine.set_direction(Direction::Down));
    engine.move_snake().unwrap();
    assert!(engine.set_direction(Direction::Left));
    engine.move_snake().unwrap();
    assert!(engine.set_direction(Direction::Top));
    let outcome = engine.move_snake().unwrap();

    assert_eq!(outcome, TickOutcome::Crashed { head: Cell::new(9, 10) });
    assert!(!engine.is_playing());
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.move_snake(), Ok(TickOutcome::Over));
}

#[test]
fn test_board_full_end_game_policy() {
    let config = GameConfig {
        field_size: 13,
        snake_length: 1,
        standard_offset: 5,
        on_board_full: BoardFullPolicy::EndGame,
        ..GameConfig::default()
    };
    let mut cells: Vec<Cell> = (0..168).map(|i| Cell::from_index(i, 13)).collect();
    cells.rotate_right(1);
    let mut engine =
        Engine::from_parts(config, ScriptedRandom::new(), Direction::Right, cells, Some(Cell::new(13, 13))).unwrap();

    let outcome = engine.move_snake().unwrap();
    assert!(matches!(outcome, TickOutcome::Moved { ate: true, .. }));
    assert!(!engine.is_playing());
    assert_eq!(engine.snake().len(), 169);
    assert!(engine.free_cells().is_empty());
}

#[test]
fn test_from_parts_rejects_out_of_bounds() {
    let result = Engine::from_parts(
        GameConfig::default(),
        ScriptedRandom::new(),
        Direction::Top,
        [Cell::new(0, 5)],
        None,
    );
    assert!(matches!(result, Err(EngineError::OutOfBounds(c)) if c == Cell::new(0, 5)));
}

#[test]
fn test_random_play_holds_invariants() {
    for seed in 0..10 {
        let mut engine = bootstrap(StdRandom::new(Some(seed)));
        let mut turns = StdRandom::new(Some(seed + 1000));

        for _ in 0..500 {
            let pick = turns.random_int(0, 4);
            if pick < 4 {
                engine.set_direction(Direction::CARDINALS[pick as usize]);
            }
            match engine.move_snake().unwrap() {
                TickOutcome::Crashed { .. } | TickOutcome::Over => break,
                _ => assert_partition(&engine),
            }
        }
    }
}
