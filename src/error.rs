use thiserror::Error;

use crate::Cell;

/// Contract violations raised by the engine to its caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("direction can only be initialized once")]
    InvalidState,
    #[error("snake is already spawned")]
    AlreadySpawned,
    #[error("direction must be set before spawning the snake")]
    DirectionNotSet,
    #[error("can't spawn food: no free space left")]
    NoFreeSpace,
    #[error("snake and food must be placed before ticking")]
    NotReady,
    #[error("cell {0} lies outside the field")]
    OutOfBounds(Cell),
    #[error("food at {0} sits on the snake")]
    FoodOnSnake(Cell),
    #[error("{0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_yaml_ng::Error),
}
