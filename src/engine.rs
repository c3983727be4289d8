//! Game-state engine: direction control, snake and food spawning, and the
//! per-tick movement with wrap-around and self-collision detection.
//!
//! The engine has no timer and does no I/O. A driver bootstraps it with
//! [`Engine::init_direction`], [`Engine::spawn_snake`] and
//! [`Engine::spawn_food`], then relays input through
//! [`Engine::set_direction`] and calls [`Engine::move_snake`] once per tick.

use log::{debug, info, warn};

use crate::config::{BoardFullPolicy, GameConfig};
use crate::direction::{request_turn, Direction};
use crate::error::EngineError;
use crate::free_cells::FreeCellPool;
use crate::random::RandomProvider;
use crate::{Cell, Snake};

/// Lifecycle position, derived from the engine's state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    DirectionSet,
    Spawned,
    Fed,
    Playing,
    GameOver,
}

/// What a single call to [`Engine::move_snake`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { new_head: Cell, old_head: Cell, old_tail: Option<Cell>, ate: bool },
    /// The head ran into the body. The game is over.
    Crashed { head: Cell },
    /// No heading is set, the snake holds still.
    Idle,
    /// The game already ended, nothing changed.
    Over,
}

pub struct Engine<R: RandomProvider> {
    config: GameConfig,
    rng: R,
    direction: Direction,
    snake: Snake,
    free_cells: FreeCellPool,
    food: Option<Cell>,
    is_playing: bool,
    spawn_length: usize,
    ticks: u64,
}

impl<R: RandomProvider> Engine<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, EngineError> {
        config.validate().map_err(|e| EngineError::InvalidConfig(e.to_string()))?;

        let free_cells = FreeCellPool::new(config.field_size);
        Ok(Engine {
            config,
            rng,
            direction: Direction::None,
            snake: Snake::new(),
            free_cells,
            food: None,
            is_playing: true,
            spawn_length: 0,
            ticks: 0,
        })
    }

    /// Restores an engine around an explicit snake body (head first) and
    /// optional food. Body cells are taken out of the free pool; repeated
    /// cells are allowed so a collided snake can be restored as-is. Food
    /// must land on a free cell.
    pub fn from_parts(
        config: GameConfig,
        rng: R,
        direction: Direction,
        body: impl IntoIterator<Item = Cell>,
        food: Option<Cell>,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::new(config, rng)?;
        let field_size = engine.config.field_size;

        let snake: Snake = body.into_iter().collect();
        for cell in snake.iter().chain(food.iter()) {
            if !cell.in_bounds(field_size) {
                return Err(EngineError::OutOfBounds(*cell));
            }
        }
        for cell in snake.iter() {
            engine.free_cells.remove(*cell);
        }
        if let Some(food) = food {
            if !engine.free_cells.contains(food) {
                return Err(EngineError::FoodOnSnake(food));
            }
        }

        engine.spawn_length = snake.len();
        engine.snake = snake;
        engine.direction = direction;
        engine.food = food;
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn free_cells(&self) -> &FreeCellPool {
        &self.free_cells
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Segments grown since the snake was placed.
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(self.spawn_length)
    }

    pub fn phase(&self) -> Phase {
        if !self.is_playing {
            Phase::GameOver
        } else if self.ticks > 0 {
            Phase::Playing
        } else if self.food.is_some() {
            Phase::Fed
        } else if !self.snake.is_empty() {
            Phase::Spawned
        } else if self.direction != Direction::None {
            Phase::DirectionSet
        } else {
            Phase::Uninitialized
        }
    }

    /// Picks a random cardinal heading. Only valid while no heading is set.
    pub fn init_direction(&mut self) -> Result<(), EngineError> {
        if self.direction != Direction::None {
            return Err(EngineError::InvalidState);
        }

        let draw = self.rng.random_int(0, 3);
        self.direction = Direction::CARDINALS[draw as usize % Direction::CARDINALS.len()];
        debug!("initial direction {:?}", self.direction);
        Ok(())
    }

    /// Applies the turn-validity rule. Rejected turns are silent no-ops;
    /// the return value says whether the heading changed hands.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        let turn = request_turn(self.direction, requested);
        self.direction = turn.direction;
        turn.accepted
    }

    /// A cell drawn uniformly from the square inset by `offset` from every
    /// border.
    pub fn random_coordinates(&mut self, offset: u16) -> Cell {
        let min = offset + 1;
        let max = self.config.field_size - offset;
        let x = self.rng.random_int(min, max);
        let y = self.rng.random_int(min, max);
        Cell::new(x, y)
    }

    pub fn spawn_snake(&mut self) -> Result<(), EngineError> {
        if !self.snake.is_empty() {
            return Err(EngineError::AlreadySpawned);
        }
        if self.direction == Direction::None {
            return Err(EngineError::DirectionNotSet);
        }

        // validate() bounds the inset below field_size / 2
        let head = self.random_coordinates(self.config.spawn_inset() as u16);
        self.snake = Snake::spawn(head, self.config.snake_length, self.direction);
        for cell in self.snake.iter() {
            self.free_cells.remove(*cell);
        }
        self.spawn_length = self.snake.len();

        info!("snake spawned at {} heading {:?}", head, self.direction);
        Ok(())
    }

    pub fn spawn_food(&mut self) -> Result<(), EngineError> {
        if self.free_cells.is_empty() {
            return match self.config.on_board_full {
                BoardFullPolicy::FailLoudly => {
                    warn!("no free space left for food");
                    Err(EngineError::NoFreeSpace)
                }
                BoardFullPolicy::EndGame => {
                    info!("board full, game over");
                    self.is_playing = false;
                    Ok(())
                }
            };
        }

        let i = self.rng.random_index(self.free_cells.len());
        self.food = self.free_cells.get(i);
        debug!("food placed at {:?}", self.food);
        Ok(())
    }

    pub fn is_eating(&self) -> bool {
        matches!((self.snake.head(), self.food), (Some(head), Some(food)) if head == food)
    }

    /// One simulation step: move the head, check for self-collision, then
    /// either eat (keep the tail, place new food) or advance the tail.
    ///
    /// Fails only when called before the snake and food exist, or when the
    /// snake fills the board under [`BoardFullPolicy::FailLoudly`].
    pub fn move_snake(&mut self) -> Result<TickOutcome, EngineError> {
        if !self.is_playing {
            return Ok(TickOutcome::Over);
        }
        if self.snake.is_empty() || self.food.is_none() {
            return Err(EngineError::NotReady);
        }
        let Some((old_head, new_head)) = self.move_head() else {
            return Ok(TickOutcome::Idle);
        };
        self.ticks += 1;

        let crashed = self.check_game_over();

        let ate = self.is_eating();
        let old_tail = if ate {
            self.food = None;
            self.spawn_food()?;
            None
        } else {
            self.advance_tail()
        };

        if crashed {
            return Ok(TickOutcome::Crashed { head: new_head });
        }
        Ok(TickOutcome::Moved { new_head, old_head, old_tail, ate })
    }

    /// Prepends the next head cell, wrapping at the borders, and takes it out
    /// of the free pool. Returns `(old_head, new_head)`, or `None` when there
    /// is no heading or no snake.
    pub(crate) fn move_head(&mut self) -> Option<(Cell, Cell)> {
        if self.direction == Direction::None {
            return None;
        }
        let old_head = self.snake.head()?;
        let new_head = wrap_step(old_head, self.direction, self.config.field_size);

        self.snake.push_head(new_head);
        self.free_cells.remove(new_head);
        Some((old_head, new_head))
    }

    /// Ends the game if the head sits on any other segment.
    pub(crate) fn check_game_over(&mut self) -> bool {
        if self.snake.head_overlaps_body() {
            info!("self-collision at {:?} after {} ticks", self.snake.head(), self.ticks);
            self.is_playing = false;
            return true;
        }
        false
    }

    /// Pops the tail and hands its cell back to the free pool, unless another
    /// segment still covers it (only possible after a collision).
    pub(crate) fn advance_tail(&mut self) -> Option<Cell> {
        let tail = self.snake.pop_tail()?;
        if self.is_playing || !self.snake.contains(&tail) {
            self.free_cells.insert(tail);
        }
        Some(tail)
    }
}

/// `cell` advanced one unit along `direction`, teleporting to the opposite
/// edge when it would leave `[1, field_size]`.
pub fn wrap_step(cell: Cell, direction: Direction, field_size: u16) -> Cell {
    let (dx, dy) = direction.delta();
    let wrap = |v: u16, d: i32| {
        let n = v as i32 + d;
        if n < 1 {
            field_size
        } else if n > field_size as i32 {
            1
        } else {
            n as u16
        }
    };
    Cell::new(wrap(cell.x, dx), wrap(cell.y, dy))
}
