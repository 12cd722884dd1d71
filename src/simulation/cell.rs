/// Binary automaton cell, stored as one 32-bit word.
///
/// The word layout matches `array<u32>` in the render shader, so a grid's
/// cell slice can be uploaded to the storage buffer with `bytemuck::cast_slice`.
/// Only the values 0 (dead) and 1 (alive) are ever constructed.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Cell(u32);

impl Cell {
    pub const DEAD: Cell = Cell(0);
    pub const ALIVE: Cell = Cell(1);

    pub fn from_alive(alive: bool) -> Self {
        if alive {
            Self::ALIVE
        } else {
            Self::DEAD
        }
    }

    pub fn is_alive(self) -> bool {
        self.0 == 1
    }

    /// Numeric state, 0 or 1
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn toggled(self) -> Self {
        Self::from_alive(!self.is_alive())
    }

    /// Conway's B3/S23 transition for a cell with `neighbors` live neighbours
    pub fn next(self, neighbors: u8) -> Self {
        match (self.is_alive(), neighbors) {
            (true, 2) | (true, 3) => Self::ALIVE,
            (false, 3) => Self::ALIVE,
            _ => Self::DEAD,
        }
    }
}
