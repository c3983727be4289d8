use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const FIELD_SIZE: u16 = 50;
pub const SNAKE_LENGTH: u16 = 4;
pub const STANDARD_OFFSET: u16 = 2;
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MAX_FIELD_SIZE: u16 = 1024;

const TICK_INTERVAL_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=5000;

/// What `spawn_food` does when every cell is taken by the snake.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoardFullPolicy {
    /// Return `EngineError::NoFreeSpace` to the caller.
    #[default]
    FailLoudly,
    /// Mark the game as no longer playing and return normally.
    EndGame,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_size: u16,
    pub snake_length: u16,
    pub standard_offset: u16,
    pub on_board_full: BoardFullPolicy,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_size: FIELD_SIZE,
            snake_length: SNAKE_LENGTH,
            standard_offset: STANDARD_OFFSET,
            on_board_full: BoardFullPolicy::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Inset from every border used when picking the snake's head.
    pub fn spawn_inset(&self) -> u32 {
        self.snake_length as u32 + self.standard_offset as u32
    }

    /// Smallest field that still leaves at least one legal head position.
    pub fn min_field_size(&self) -> u32 {
        2 * self.spawn_inset() + 1
    }

    pub fn total_cells(&self) -> usize {
        self.field_size as usize * self.field_size as usize
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snake_length == 0 {
            return Err(ConfigError::Invalid("snake length must be at least 1".to_string()));
        }
        if self.field_size > MAX_FIELD_SIZE {
            return Err(ConfigError::Invalid(format!(
                "field size {} exceeds the maximum of {}",
                self.field_size, MAX_FIELD_SIZE
            )));
        }
        if (self.field_size as u32) < self.min_field_size() {
            return Err(ConfigError::Invalid(format!(
                "field size {} is too small, need at least {} for snake length {} and offset {}",
                self.field_size,
                self.min_field_size(),
                self.snake_length,
                self.standard_offset
            )));
        }
        if !TICK_INTERVAL_RANGE_MS.contains(&self.tick_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "tick interval must be between {}ms and {}ms",
                TICK_INTERVAL_RANGE_MS.start(),
                TICK_INTERVAL_RANGE_MS.end()
            )));
        }
        Ok(())
    }
}
