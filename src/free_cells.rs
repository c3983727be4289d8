use crate::Cell;

const VACANT: u32 = u32::MAX;

/// Cells not occupied by the snake.
///
/// `free` is a dense list of cell indices in arbitrary order and `slot` maps
/// every cell index to its position in `free` (or `VACANT` when occupied),
/// so membership, insertion and removal are all O(1) and a uniform draw is
/// a single index into `free`.
#[derive(Debug, Clone)]
pub struct FreeCellPool {
    field_size: u16,
    free: Vec<u32>,
    slot: Vec<u32>,
}

impl FreeCellPool {
    /// A pool holding every cell of a `field_size` x `field_size` field,
    /// ordered row by row starting at (1, 1).
    pub fn new(field_size: u16) -> Self {
        let total = field_size as usize * field_size as usize;
        FreeCellPool {
            field_size,
            free: (0..total as u32).collect(),
            slot: (0..total as u32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.field_size) && self.slot[cell.index(self.field_size)] != VACANT
    }

    /// The `i`-th free cell. Order is stable between mutations only.
    pub fn get(&self, i: usize) -> Option<Cell> {
        self.free.get(i).map(|&idx| Cell::from_index(idx as usize, self.field_size))
    }

    /// Marks `cell` occupied. Returns false if it was not free.
    pub fn remove(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return false;
        }

        let idx = cell.index(self.field_size);
        let pos = self.slot[idx] as usize;
        self.free.swap_remove(pos);
        if let Some(&moved) = self.free.get(pos) {
            self.slot[moved as usize] = pos as u32;
        }
        self.slot[idx] = VACANT;
        true
    }

    /// Marks `cell` free. Returns false if it was already free or lies
    /// outside the field.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if !cell.in_bounds(self.field_size) || self.contains(cell) {
            return false;
        }

        let idx = cell.index(self.field_size);
        self.slot[idx] = self.free.len() as u32;
        self.free.push(idx as u32);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.free.iter().map(move |&idx| Cell::from_index(idx as usize, self.field_size))
    }
}
