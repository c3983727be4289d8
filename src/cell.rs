use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-indexed field position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Cell { x, y }
    }

    pub fn in_bounds(&self, field_size: u16) -> bool {
        (1..=field_size).contains(&self.x) && (1..=field_size).contains(&self.y)
    }

    // Row-major, only meaningful for in-bounds cells
    pub fn index(&self, field_size: u16) -> usize {
        (self.y as usize - 1) * field_size as usize + (self.x as usize - 1)
    }

    pub fn from_index(index: usize, field_size: u16) -> Self {
        let size = field_size as usize;
        Cell { x: (index % size) as u16 + 1, y: (index / size) as u16 + 1 }
    }
}

impl From<(u16, u16)> for Cell {
    fn from((x, y): (u16, u16)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
