use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};

use crate::term::TermManager;
use crate::{Direction, Engine, EngineError, GameConfig, StdRandom, TickOutcome};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Whether the player wants another round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal driver: owns the timer and keyboard loop and feeds the engine.
pub struct SnakeGame {
    config: GameConfig,
    paused: bool,
    rounds: u64,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(SnakeGame { config, paused: false, rounds: 0, term: TermManager::new()? })
    }

    /// Enters the alternate screen and shrinks the field if the terminal
    /// can't show it whole.
    pub fn initialize(&mut self) -> Result<()> {
        let max = self.term.max_field_size();
        if self.config.field_size > max {
            let shrunk = GameConfig { field_size: max, ..self.config.clone() };
            if shrunk.validate().is_err() {
                let (w, h) = self.term.size();
                bail!(
                    "terminal {}x{} is too small for a field of {} (need at least {})",
                    w,
                    h,
                    self.config.field_size,
                    self.config.min_field_size() + 2
                );
            }
            warn!("field size {} doesn't fit the terminal, using {}", self.config.field_size, max);
            self.config = shrunk;
        }

        self.term.setup()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Continue)
    }

    /// Runs one game on a fresh engine until it ends or the player quits.
    pub fn play(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.draw_borders(self.config.field_size)?;
        self.paused = false;

        let seed = self.config.seed.map(|s| s.wrapping_add(self.rounds));
        self.rounds += 1;

        let mut engine = Engine::new(self.config.clone(), StdRandom::new(seed))?;
        engine.init_direction()?;
        engine.spawn_snake()?;
        engine.spawn_food()?;
        info!("round {} started, seed {:?}", self.rounds, seed);

        self.print_snake(&engine)?;
        self.print_food(&engine)?;

        let tick_interval = self.config.tick_interval();
        let mut dir_change: Option<Direction> = None;
        let mut last_tick = Instant::now();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                if is_ctrl_c(&key_ev) {
                    return Ok(Flow::Quit);
                }
                match key_ev.code {
                    KeyCode::Esc => self.toggle_pause()?,
                    code => {
                        if let Some(dir) = direction_for(code) {
                            dir_change = Some(dir);
                        }
                    }
                }
            }

            if self.paused {
                last_tick = Instant::now();
                continue;
            }
            if last_tick.elapsed() < tick_interval {
                continue;
            }
            last_tick = Instant::now();

            // At most one turn per step, the last key pressed wins
            if let Some(dir) = dir_change.take() {
                engine.set_direction(dir);
            }

            match engine.move_snake() {
                Ok(outcome @ TickOutcome::Moved { ate, .. }) => {
                    self.print_snake_update(&engine, &outcome)?;
                    if ate {
                        self.print_food(&engine)?;
                    }
                    if !engine.is_playing() {
                        self.game_over(&engine, true)?;
                        break;
                    }
                }
                Ok(TickOutcome::Crashed { .. }) => {
                    self.game_over(&engine, false)?;
                    break;
                }
                Ok(TickOutcome::Idle) => {}
                Ok(TickOutcome::Over) => break,
                Err(EngineError::NoFreeSpace) => {
                    self.game_over(&engine, true)?;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, engine: &Engine<StdRandom>, win: bool) -> Result<()> {
        let headline = if win { "You won!" } else { "Game over!" };
        info!("{} score {} after {} ticks", headline, engine.score(), engine.ticks());

        if !win {
            for cell in engine.snake().iter() {
                self.term.print_cell(*cell, DEAD_SNAKE_CHAR)?;
            }
        }

        self.term.show_message(&[
            headline,
            &format!("Score: {}", engine.score()),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit.",
        ])
    }

    fn print_food(&mut self, engine: &Engine<StdRandom>) -> Result<()> {
        if let Some(food) = engine.food() {
            self.term.print_cell(food, FOOD_CHAR)?;
        }
        self.term.flush()
    }

    fn print_snake(&mut self, engine: &Engine<StdRandom>) -> Result<()> {
        let head = head_char(engine.direction());

        for (i, cell) in engine.snake().iter().enumerate() {
            let ch = if i == 0 { head } else { SNAKE_BODY_CHAR };
            self.term.print_cell(*cell, ch)?;
        }

        self.term.flush()
    }

    fn print_snake_update(&mut self, engine: &Engine<StdRandom>, outcome: &TickOutcome) -> Result<()> {
        if let TickOutcome::Moved { new_head, old_head, old_tail, .. } = outcome {
            if let Some(tail) = old_tail {
                self.term.print_cell(*tail, ' ')?;
            }
            self.term.print_cell(*old_head, SNAKE_BODY_CHAR)?;
            self.term.print_cell(*new_head, head_char(engine.direction()))?;
            self.term.flush()?;
        }
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Arrow keys and WASD.
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Direction::Top),
        KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

pub fn head_char(direction: Direction) -> char {
    match direction {
        Direction::Top => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
        Direction::None => '@',
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
