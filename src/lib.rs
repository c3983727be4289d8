pub mod cell;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod free_cells;
pub mod game;
pub mod random;
pub mod snake;
pub mod term;

pub use cell::Cell;
pub use config::{BoardFullPolicy, GameConfig};
pub use direction::{request_turn, Direction, Turn};
pub use engine::{Engine, Phase, TickOutcome};
pub use error::{ConfigError, EngineError};
pub use free_cells::FreeCellPool;
pub use random::{RandomProvider, ScriptedRandom, StdRandom};
pub use snake::Snake;
