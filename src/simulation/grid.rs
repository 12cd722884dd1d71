use crate::simulation::cell::Cell;

/// A `cols x rows` toroidal field of cells stored row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid. Zero-sized grids are allowed.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::DEAD; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    /// Cell at (col, row); anything outside the grid reads as dead
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.index(col, row)
            .map(|i| self.cells[i])
            .unwrap_or(Cell::DEAD)
    }

    /// Set a cell; out-of-range coordinates are ignored
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Flip a cell. Returns false when (col, row) is outside the grid.
    pub fn toggle(&mut self, col: usize, row: usize) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.cells[i] = self.cells[i].toggled();
                true
            }
            None => false,
        }
    }

    /// Reset every cell to dead without reallocating
    pub fn fill_dead(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Live cells among the 8 toroidally wrapped neighbours of (col, row)
    pub fn count_neighbors(&self, col: usize, row: usize) -> u8 {
        if self.cols == 0 || self.rows == 0 {
            return 0;
        }

        let mut count = 0;
        for row_offset in -1..=1isize {
            for col_offset in -1..=1isize {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }

                let neighbor_row = (row as isize + row_offset).rem_euclid(self.rows as isize) as usize;
                let neighbor_col = (col as isize + col_offset).rem_euclid(self.cols as isize) as usize;

                count += self.cells[neighbor_row * self.cols + neighbor_col].value() as u8;
            }
        }

        count
    }

    /// Write the next generation of `self` into `next`.
    ///
    /// `next` must have the same dimensions. Every cell is computed from
    /// `self` alone, so the transition is synchronous.
    pub fn evolve_into(&self, next: &mut Grid) {
        debug_assert_eq!((self.cols, self.rows), (next.cols, next.rows));

        for row in 0..self.rows {
            for col in 0..self.cols {
                let i = row * self.cols + col;
                next.cells[i] = self.cells[i].next(self.count_neighbors(col, row));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(100, 50);
        assert_eq!(grid.cells().len(), 5000);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_zero_sized_grid() {
        let grid = Grid::new(0, 7);
        assert!(grid.cells().is_empty());
        assert_eq!(grid.count_neighbors(0, 0), 0);
        assert_eq!(grid.get(0, 0), Cell::DEAD);
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new(4, 3);
        grid.set(1, 2, Cell::ALIVE);
        assert!(grid.cells()[2 * 4 + 1].is_alive());
    }

    #[test]
    fn test_out_of_range_access_is_harmless() {
        let mut grid = Grid::new(3, 3);
        grid.set(3, 0, Cell::ALIVE);
        assert!(!grid.toggle(0, 3));
        assert_eq!(grid.get(5, 5), Cell::DEAD);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_count_excludes_self() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, Cell::ALIVE);
        assert_eq!(grid.count_neighbors(2, 2), 0);
        assert_eq!(grid.count_neighbors(1, 1), 1);
        assert_eq!(grid.count_neighbors(3, 2), 1);
    }

    #[test]
    fn test_count_full_neighbourhood() {
        let mut grid = Grid::new(5, 5);
        for row in 1..=3 {
            for col in 1..=3 {
                grid.set(col, row, Cell::ALIVE);
            }
        }
        assert_eq!(grid.count_neighbors(2, 2), 8);
    }

    #[test]
    fn test_count_wraps_columns() {
        let mut grid = Grid::new(6, 4);
        grid.set(0, 1, Cell::ALIVE);
        assert_eq!(grid.count_neighbors(5, 1), 1);

        let mut grid = Grid::new(6, 4);
        grid.set(5, 1, Cell::ALIVE);
        assert_eq!(grid.count_neighbors(0, 1), 1);
    }

    #[test]
    fn test_count_wraps_corners() {
        let mut grid = Grid::new(6, 4);
        grid.set(5, 3, Cell::ALIVE);
        assert_eq!(grid.count_neighbors(0, 0), 1);
    }

    #[test]
    fn test_small_torus_counts_duplicates() {
        // On a 1x1 torus every neighbour offset lands on the cell itself
        let mut grid = Grid::new(1, 1);
        grid.set(0, 0, Cell::ALIVE);
        assert_eq!(grid.count_neighbors(0, 0), 8);
    }
}
