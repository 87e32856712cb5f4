use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cell, Pattern, Rotation, rules::Rule};

/// Edge policy for neighbor counting and panning.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Opposite edges are adjacent (donut topology)
    #[default]
    Toroidal,
    /// Cells beyond the boundary are permanently dead
    Bounded,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("grid dimensions {width}x{height} are not positive")]
    InvalidDimensions { width: usize, height: usize },
}

/// The live simulation grid.
///
/// Dimensions are fixed for the grid's lifetime; `resized` builds a new
/// grid. Generations advance into a scratch buffer that is swapped in
/// whole, so every neighbor count within one step sees the same
/// prior-generation snapshot.
#[derive(Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    wrap: WrapMode,
    cells: Vec<Cell>,
    scratch: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize, wrap: WrapMode) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            wrap,
            cells: vec![Cell::Dead; width * height],
            scratch: vec![Cell::Dead; width * height],
            generation: 0,
        })
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Change the edge policy. Cell contents are untouched; the new policy
    /// applies from the next neighbor count on.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
    }

    /// Generations advanced since construction or the last clear
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Get cell state at a possibly out-of-range position, applying the
    /// wrap policy: toroidal coordinates wrap, bounded ones read as dead.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        match self.resolve(x, y) {
            Some(idx) => self.cells[idx],
            None => Cell::Dead,
        }
    }

    /// Set cell state, applying the wrap policy. Out-of-range writes on a
    /// bounded grid are dropped.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(idx) = self.resolve(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Flip one cell. Unlike `set`, the editor cursor never wraps: any
    /// coordinate outside the grid is an error the caller may ignore.
    pub fn toggle_cell(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(GridError::OutOfBounds { x, y });
        }
        let idx = y as usize * self.width + x as usize;
        self.cells[idx] = self.cells[idx].toggle();
        Ok(())
    }

    /// Map a grid-space coordinate to a buffer index under the wrap policy
    fn resolve(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = match self.wrap {
            WrapMode::Toroidal => (
                x.rem_euclid(self.width as i32) as usize,
                y.rem_euclid(self.height as i32) as usize,
            ),
            WrapMode::Bounded => {
                if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
                    return None;
                }
                (x as usize, y as usize)
            }
        };
        Some(y * self.width + x)
    }

    fn count_neighbors(
        cells: &[Cell],
        width: usize,
        height: usize,
        wrap: WrapMode,
        x: usize,
        y: usize,
    ) -> u8 {
        let w = width as i32;
        let h = height as i32;
        let mut count = 0u8;
        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                let alive = match wrap {
                    WrapMode::Toroidal => {
                        let nx = nx.rem_euclid(w) as usize;
                        let ny = ny.rem_euclid(h) as usize;
                        cells[ny * width + nx].is_alive()
                    }
                    WrapMode::Bounded => {
                        nx >= 0
                            && ny >= 0
                            && nx < w
                            && ny < h
                            && cells[ny as usize * width + nx as usize].is_alive()
                    }
                };
                if alive {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance one generation (serial). The next generation is computed
    /// into the scratch buffer from an unchanging snapshot, then swapped.
    pub fn step(&mut self, rule: &Rule) {
        let (width, height, wrap) = (self.width, self.height, self.wrap);
        let cells = &self.cells;
        for (y, row) in self.scratch.chunks_mut(width).enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                let neighbors = Self::count_neighbors(cells, width, height, wrap, x, y);
                *slot = rule.next_state(cells[y * width + x], neighbors);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }

    /// Advance one generation with the neighbor-count pass parallelized
    /// over rows. Each worker writes only its own scratch row; the buffer
    /// swap after the pass is the single synchronization point.
    pub fn step_parallel(&mut self, rule: &Rule) {
        let (width, height, wrap) = (self.width, self.height, self.wrap);
        let cells = &self.cells;
        self.scratch
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    let neighbors = Self::count_neighbors(cells, width, height, wrap, x, y);
                    *slot = rule.next_state(cells[y * width + x], neighbors);
                }
            });
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }

    /// Clear all cells and reset the generation counter
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
        self.generation = 0;
    }

    /// Independently set each cell alive with probability `density`.
    /// The random source is injected so callers can seed it.
    pub fn randomize(&mut self, density: f64, rng: &mut impl Rng) {
        let density = density.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            *cell = Cell::from_alive(rng.random_range(0.0..1.0) < density);
        }
        self.generation = 0;
    }

    /// Place a pattern's alive cells with its bounding box rotated and the
    /// top-left corner anchored at (x, y). Cells landing outside a bounded
    /// grid are dropped; on a toroidal grid they wrap.
    pub fn place_pattern(&mut self, pattern: &Pattern, x: i32, y: i32, rotation: Rotation) {
        let (pw, ph) = (pattern.width, pattern.height);
        for &(px, py) in &pattern.cells {
            let (rx, ry) = rotation.apply(px, py, pw, ph);
            self.set(x + rx as i32, y + ry as i32, Cell::Alive);
        }
    }

    /// Copy this grid's cells into a freshly constructed grid, cropping
    /// or padding as needed. Generation restarts at 0.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self, GridError> {
        let mut next = Self::new(width, height, self.wrap)?;
        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                next.cells[y * width + x] = self.cells[y * self.width + x];
            }
        }
        Ok(next)
    }

    /// Count of living cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Invoke `f` for every alive cell, row-major. Read-only enumeration
    /// for the renderer.
    pub fn for_each_alive(&self, mut f: impl FnMut(usize, usize)) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x].is_alive() {
                    f(x, y);
                }
            }
        }
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.cells[y * self.width + x]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pattern::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn alive_set(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        grid.for_each_alive(|x, y| cells.push((x, y)));
        cells
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 10, WrapMode::Toroidal),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(Grid::new(10, 0, WrapMode::Bounded).is_err());
    }

    #[test]
    fn test_all_dead_grid_stays_dead() {
        let mut grid = Grid::new(16, 16, WrapMode::Toroidal).unwrap();
        grid.step(&Rule::default());
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut grid = Grid::new(20, 10, WrapMode::Bounded).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        grid.randomize(0.0, &mut rng);
        assert_eq!(grid.population(), 0);

        grid.randomize(1.0, &mut rng);
        assert_eq!(grid.population(), 200);
    }

    #[test]
    fn test_randomize_is_deterministic_under_seed() {
        let mut a = Grid::new(32, 32, WrapMode::Toroidal).unwrap();
        let mut b = Grid::new(32, 32, WrapMode::Toroidal).unwrap();
        a.randomize(0.5, &mut StdRng::seed_from_u64(42));
        b.randomize(0.5, &mut StdRng::seed_from_u64(42));
        assert_eq!(alive_set(&a), alive_set(&b));
    }

    #[test]
    fn test_blinker_oscillates_both_modes() {
        for wrap in [WrapMode::Toroidal, WrapMode::Bounded] {
            let mut grid = Grid::new(9, 9, wrap).unwrap();
            grid.place_pattern(&presets::blinker(), 3, 4, Rotation::None);
            let horizontal = alive_set(&grid);

            grid.step(&Rule::default());
            let vertical = alive_set(&grid);
            assert_ne!(horizontal, vertical);
            assert_eq!(vertical, vec![(4, 3), (4, 4), (4, 5)]);

            grid.step(&Rule::default());
            assert_eq!(alive_set(&grid), horizontal);
        }
    }

    #[test]
    fn test_glider_translates_one_cell_per_four_steps() {
        let mut grid = Grid::new(24, 24, WrapMode::Toroidal).unwrap();
        grid.place_pattern(&presets::glider(), 4, 4, Rotation::None);
        let before = alive_set(&grid);

        for _ in 0..4 {
            grid.step(&Rule::default());
        }
        let shifted: Vec<_> = before.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(alive_set(&grid), shifted);
        assert_eq!(grid.generation(), 4);
    }

    #[test]
    fn test_toroidal_corner_adjacency() {
        let mut grid = Grid::new(8, 6, WrapMode::Toroidal).unwrap();
        grid.set(7, 5, Cell::Alive);
        assert_eq!(
            Grid::count_neighbors(&grid.cells, 8, 6, WrapMode::Toroidal, 0, 0),
            1
        );
        assert_eq!(
            Grid::count_neighbors(&grid.cells, 8, 6, WrapMode::Bounded, 0, 0),
            0
        );
    }

    #[test]
    fn test_step_parallel_matches_serial() {
        let rule = Rule::default();
        let mut serial = Grid::new(40, 30, WrapMode::Toroidal).unwrap();
        serial.randomize(0.4, &mut StdRng::seed_from_u64(99));
        let mut parallel = Grid::new(40, 30, WrapMode::Toroidal).unwrap();
        parallel.randomize(0.4, &mut StdRng::seed_from_u64(99));

        for _ in 0..5 {
            serial.step(&rule);
            parallel.step_parallel(&rule);
        }
        assert_eq!(alive_set(&serial), alive_set(&parallel));
    }

    #[test]
    fn test_toggle_cell_out_of_bounds() {
        let mut grid = Grid::new(4, 4, WrapMode::Toroidal).unwrap();
        assert_eq!(
            grid.toggle_cell(4, 0),
            Err(GridError::OutOfBounds { x: 4, y: 0 })
        );
        assert_eq!(grid.toggle_cell(-1, 2), Err(GridError::OutOfBounds { x: -1, y: 2 }));

        grid.toggle_cell(2, 3).unwrap();
        assert!(grid.get(2, 3).is_alive());
        grid.toggle_cell(2, 3).unwrap();
        assert!(!grid.get(2, 3).is_alive());
    }

    #[test]
    fn test_place_rotated_pattern_swaps_bounding_box() {
        // 3x1 blinker placed with a quarter turn occupies a 1x3 column
        let mut grid = Grid::new(10, 10, WrapMode::Bounded).unwrap();
        grid.place_pattern(&presets::blinker(), 2, 2, Rotation::Quarter);
        assert_eq!(alive_set(&grid), vec![(2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_bounded_placement_drops_overhang() {
        let mut grid = Grid::new(4, 4, WrapMode::Bounded).unwrap();
        grid.place_pattern(&presets::blinker(), 2, 0, Rotation::None);
        assert_eq!(alive_set(&grid), vec![(2, 0), (3, 0)]);
    }

    #[test]
    fn test_toroidal_placement_wraps_overhang() {
        let mut grid = Grid::new(4, 4, WrapMode::Toroidal).unwrap();
        grid.place_pattern(&presets::blinker(), 3, 1, Rotation::None);
        assert_eq!(alive_set(&grid), vec![(0, 1), (1, 1), (3, 1)]);
    }

    #[test]
    fn test_resized_crops_and_resets_generation() {
        let mut grid = Grid::new(8, 8, WrapMode::Toroidal).unwrap();
        grid.set(1, 1, Cell::Alive);
        grid.set(7, 7, Cell::Alive);
        grid.step(&Rule::default());

        let cropped = grid.resized(4, 4).unwrap();
        assert_eq!(cropped.dimensions(), (4, 4));
        assert_eq!(cropped.generation(), 0);
        assert!(grid.resized(0, 4).is_err());
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut grid = Grid::new(6, 6, WrapMode::Toroidal).unwrap();
        grid.set(3, 3, Cell::Alive);
        grid.step(&Rule::default());
        grid.clear();
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
    }
}
