use rand::Rng;

use crate::config::CELL_SIZE;
use crate::simulation::cell::Cell;
use crate::simulation::grid::Grid;

/// Double-buffered Game of Life state.
///
/// `current` is the generation being displayed and edited, `next` is the
/// scratch target of `step`. Both always share the same dimensions; a step
/// swaps them instead of allocating.
pub struct Engine {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl Engine {
    /// Create an all-dead `cols x rows` engine
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            current: Grid::new(cols, rows),
            next: Grid::new(cols, rows),
            generation: 0,
        }
    }

    /// Create an engine covering a surface of the given logical pixel size
    pub fn for_surface(width: u32, height: u32) -> Self {
        let (cols, rows) = grid_dimensions(width, height);
        Self::new(cols, rows)
    }

    /// Replace both buffers with all-dead grids of the new size
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.current = Grid::new(cols, rows);
        self.next = Grid::new(cols, rows);
        self.generation = 0;
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) {
        let (cols, rows) = grid_dimensions(width, height);
        self.resize(cols, rows);
    }

    pub fn cols(&self) -> usize {
        self.current.cols()
    }

    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    /// Current generation, row-major
    pub fn cells(&self) -> &[Cell] {
        self.current.cells()
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.current.get(col, row)
    }

    pub fn count_neighbors(&self, col: usize, row: usize) -> u8 {
        self.current.count_neighbors(col, row)
    }

    /// Steps applied since the grid was created, cleared or seeded
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.current.evolve_into(&mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    /// Flip one cell. Out-of-range coordinates are ignored and return false.
    pub fn toggle(&mut self, col: usize, row: usize) -> bool {
        self.current.toggle(col, row)
    }

    pub fn clear(&mut self) {
        self.current.fill_dead();
        self.generation = 0;
    }

    /// Clear, then seed roughly `density` of the grid alive
    pub fn randomize(&mut self, density: f64) {
        self.randomize_with(&mut rand::thread_rng(), density);
    }

    /// Clear, then mark `ceil(cols * rows * density)` uniformly drawn
    /// coordinates alive.
    ///
    /// Coordinates are drawn with replacement, so repeated draws of the same
    /// cell leave the live count below the requested density.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        self.clear();

        let (cols, rows) = (self.cols(), self.rows());
        if cols == 0 || rows == 0 {
            return;
        }

        let draws = ((cols * rows) as f64 * density.max(0.0)).ceil() as usize;
        for _ in 0..draws {
            let col = rng.gen_range(0..cols);
            let row = rng.gen_range(0..rows);
            self.current.set(col, row, Cell::ALIVE);
        }
    }
}

/// Columns and rows that fit in a surface of the given logical pixel size
pub fn grid_dimensions(width: u32, height: u32) -> (usize, usize) {
    ((width / CELL_SIZE) as usize, (height / CELL_SIZE) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn live_cells(engine: &Engine) -> Vec<(usize, usize)> {
        let mut live = Vec::new();
        for row in 0..engine.rows() {
            for col in 0..engine.cols() {
                if engine.cell(col, row).is_alive() {
                    live.push((col, row));
                }
            }
        }
        live
    }

    #[test]
    fn test_surface_dimensions_truncate() {
        assert_eq!(grid_dimensions(605, 399), (60, 39));
        assert_eq!(grid_dimensions(9, 9), (0, 0));

        let engine = Engine::for_surface(600, 400);
        assert_eq!((engine.cols(), engine.rows()), (60, 40));
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        let mut engine = Engine::new(12, 9);
        engine.step();
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_zero_sized_grid_is_inert() {
        let mut engine = Engine::new(0, 0);
        engine.step();
        engine.randomize(0.5);
        assert!(!engine.toggle(0, 0));
        assert!(engine.cells().is_empty());
    }

    #[test]
    fn test_birth_with_three_neighbours() {
        let mut engine = Engine::new(6, 6);
        engine.toggle(1, 1);
        engine.toggle(3, 1);
        engine.toggle(2, 3);
        assert_eq!(engine.count_neighbors(2, 2), 3);

        engine.step();
        assert!(engine.cell(2, 2).is_alive());
    }

    #[test]
    fn test_alive_with_three_neighbours_survives() {
        let mut engine = Engine::new(6, 6);
        for (col, row) in [(2, 2), (1, 1), (3, 1), (2, 3)] {
            engine.toggle(col, row);
        }
        assert_eq!(engine.count_neighbors(2, 2), 3);

        engine.step();
        assert!(engine.cell(2, 2).is_alive());
    }

    #[test]
    fn test_survival_and_death_counts() {
        // Centre cell with n live neighbours taken from a fixed ring order
        let ring = [(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (1, 2)];
        for n in 0..=8 {
            let mut engine = Engine::new(7, 7);
            engine.toggle(2, 2);
            for &(col, row) in &ring[..n] {
                engine.toggle(col, row);
            }
            assert_eq!(engine.count_neighbors(2, 2) as usize, n);

            engine.step();
            assert_eq!(
                engine.cell(2, 2).is_alive(),
                n == 2 || n == 3,
                "alive centre with {} neighbours",
                n
            );
        }
    }

    #[test]
    fn test_step_uses_pre_step_snapshot() {
        // A 2x2 block is stable only if every cell sees the old generation
        let mut engine = Engine::new(6, 6);
        for (col, row) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            engine.toggle(col, row);
        }
        let before = live_cells(&engine);
        engine.step();
        assert_eq!(live_cells(&engine), before);
    }

    #[test]
    fn test_step_reuses_both_buffers() {
        let mut engine = Engine::new(10, 10);
        let first = engine.cells().as_ptr();
        engine.step();
        let second = engine.cells().as_ptr();
        assert_ne!(first, second);
        engine.step();
        assert_eq!(engine.cells().as_ptr(), first);

        // Seeding writes in place, so the same pair keeps alternating
        engine.randomize_with(&mut StdRng::seed_from_u64(3), 0.2);
        assert_eq!(engine.cells().as_ptr(), first);
        engine.step();
        assert_eq!(engine.cells().as_ptr(), second);
        engine.step();
        assert_eq!(engine.cells().as_ptr(), first);
    }

    #[test]
    fn test_wrap_adjacent_pair() {
        let mut engine = Engine::new(8, 5);
        engine.toggle(0, 2);
        engine.toggle(7, 2);
        assert_eq!(engine.count_neighbors(7, 2), 1);
        assert_eq!(engine.count_neighbors(0, 2), 1);
        // The cells sharing the wrapped edge see both
        assert_eq!(engine.count_neighbors(0, 1), 2);
        assert_eq!(engine.count_neighbors(7, 3), 2);

        engine.step();
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut engine = Engine::new(5, 5);
        let horizontal = vec![(1, 2), (2, 2), (3, 2)];
        let vertical = vec![(2, 1), (2, 2), (2, 3)];
        for &(col, row) in &horizontal {
            engine.toggle(col, row);
        }

        engine.step();
        assert_eq!(live_cells(&engine), vertical);

        engine.step();
        assert_eq!(live_cells(&engine), horizontal);
    }

    #[test]
    fn test_blinker_across_the_seam() {
        let mut engine = Engine::new(6, 5);
        for (col, row) in [(5, 2), (0, 2), (1, 2)] {
            engine.toggle(col, row);
        }

        engine.step();
        assert_eq!(live_cells(&engine), vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_glider_translates() {
        let mut engine = Engine::new(8, 8);
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        for &(col, row) in &glider {
            engine.toggle(col, row);
        }
        for _ in 0..4 {
            engine.step();
        }
        let mut shifted: Vec<_> = glider.iter().map(|&(c, r)| (c + 1, r + 1)).collect();
        shifted.sort_by_key(|&(c, r)| (r, c));
        assert_eq!(live_cells(&engine), shifted);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut engine = Engine::new(4, 4);
        engine.toggle(1, 3);
        let before = engine.cells().to_vec();

        assert!(engine.toggle(2, 2));
        assert!(engine.toggle(2, 2));
        assert_eq!(engine.cells(), before.as_slice());
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let mut engine = Engine::new(4, 4);
        assert!(!engine.toggle(4, 0));
        assert!(!engine.toggle(0, 4));
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut engine = Engine::new(10, 10);
        engine.randomize_with(&mut StdRng::seed_from_u64(7), 0.5);
        engine.step();
        engine.clear();
        for row in 0..10 {
            for col in 0..10 {
                assert_eq!(engine.cell(col, row).value(), 0);
            }
        }
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_resize_resets_contents() {
        let mut engine = Engine::new(10, 10);
        engine.toggle(1, 1);
        engine.step();
        engine.resize_surface(205, 104);
        assert_eq!((engine.cols(), engine.rows()), (20, 10));
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 0);

        // The scratch buffer follows the new size too
        engine.toggle(19, 9);
        engine.step();
        assert_eq!(engine.cells().len(), 200);
    }

    #[test]
    fn test_randomize_replaces_previous_state() {
        let mut engine = Engine::new(10, 10);
        for row in 0..10 {
            for col in 0..10 {
                engine.toggle(col, row);
            }
        }
        engine.randomize_with(&mut StdRng::seed_from_u64(1), 0.0);
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_randomize_never_exceeds_draws() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut engine = Engine::new(10, 10);
        for _ in 0..50 {
            engine.randomize_with(&mut rng, 0.2);
            assert!(engine.population() <= 20);
            assert!(engine.population() > 0);
        }
    }

    #[test]
    fn test_randomize_density_distribution() {
        // 20 draws with replacement over 100 cells leave ~18.2 distinct cells
        let mut rng = StdRng::seed_from_u64(2024);
        let mut engine = Engine::new(10, 10);
        let trials = 500;
        let total: usize = (0..trials)
            .map(|_| {
                engine.randomize_with(&mut rng, 0.2);
                engine.population()
            })
            .sum();
        let mean = total as f64 / trials as f64;
        assert!(mean > 16.5 && mean < 20.0, "mean live count {}", mean);
    }
}
