use std::collections::VecDeque;

use crate::{Cell, Direction};

/// Occupied cells, head first. Segments are distinct while the game is in
/// progress; that is enforced by the collision check, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new() -> Self {
        Snake { body: VecDeque::new() }
    }

    /// Lays out `length` segments starting at `head` and extending opposite
    /// the heading, so a snake heading `Top` trails downwards.
    pub fn spawn(head: Cell, length: u16, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();

        let body = (0..length as i32)
            .map(|i| (head.x as i32 - dx * i, head.y as i32 - dy * i))
            .map(|(x, y)| Cell::new(x as u16, y as u16))
            .collect();
        Snake { body }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body.contains(cell)
    }

    /// True if any segment behind the head sits on the head's cell.
    pub fn head_overlaps_body(&self) -> bool {
        match self.head() {
            Some(head) => self.body.iter().skip(1).any(|c| *c == head),
            None => false,
        }
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

impl FromIterator<Cell> for Snake {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Snake { body: iter.into_iter().collect() }
    }
}
