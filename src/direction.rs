use serde::{Deserialize, Serialize};

use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Top,
    Right,
    Down,
    Left,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub accepted: bool,
    pub direction: Direction,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [Top, Right, Down, Left];

    pub fn from_index(index: u16) -> Option<Direction> {
        Self::CARDINALS.get(index as usize).copied()
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Top | Down)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Right | Left)
    }

    // y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            None => (0, 0),
            Top => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }
}

/// Accepts a turn from `None`, a reset to `None`, or a perpendicular turn.
/// Anything else keeps the current heading.
pub fn request_turn(current: Direction, requested: Direction) -> Turn {
    let accepted = current == None
        || requested == None
        || (current.is_vertical() && requested.is_horizontal())
        || (current.is_horizontal() && requested.is_vertical());

    Turn { accepted, direction: if accepted { requested } else { current } }
}
