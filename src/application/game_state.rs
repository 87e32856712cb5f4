use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::{Grid, GridError, Pattern, Rotation, Rule, WrapMode};

/// Serial stepping is faster until the neighbor pass has enough rows to
/// amortize the fork/join overhead.
const PARALLEL_STEP_THRESHOLD: usize = 100 * 100;

const MIN_SPEED: f32 = 1.0;
const MAX_SPEED: f32 = 60.0;

/// GameState orchestrates the simulation for the frame loop.
///
/// One logical tick advances at most one generation, and edits only
/// happen between ticks, so the renderer always reads a fully settled
/// generation and an edit batch is never half-applied across a step.
pub struct GameState {
    pub grid: Grid,
    pub rule: Rule,
    pub is_running: bool,
    pub updates_per_second: f32,
    update_timer: f32,
    /// Catalog index of a pattern pending placement (None = normal mode)
    pub pending_pattern_index: Option<usize>,
    rng: StdRng,
}

impl GameState {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            rule: Rule::default(),
            is_running: false,
            updates_per_second: 10.0,
            update_timer: 0.0,
            pending_pattern_index: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the grid with a resized copy of the current one
    pub fn resize_grid(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        self.grid = self.grid.resized(width, height)?;
        self.is_running = false;
        Ok(())
    }

    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.grid.set_wrap(wrap);
    }

    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
    }

    /// Clear grid and stop the simulation
    pub fn clear(&mut self) {
        self.grid.clear();
        self.is_running = false;
    }

    /// Re-seed the grid with random cells at the given density
    pub fn randomize(&mut self, density: f64) {
        self.grid.randomize(density, &mut self.rng);
    }

    pub fn adjust_speed(&mut self, delta: f32) {
        self.updates_per_second = (self.updates_per_second + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Advance exactly one generation regardless of the run flag
    pub fn step_once(&mut self) {
        let (w, h) = self.grid.dimensions();
        if w * h >= PARALLEL_STEP_THRESHOLD {
            self.grid.step_parallel(&self.rule);
        } else {
            self.grid.step(&self.rule);
        }
    }

    /// Per-frame update: at most one generation per elapsed interval
    pub fn tick(&mut self, dt: f32) {
        if !self.is_running {
            return;
        }
        self.update_timer += dt;
        let interval = 1.0 / self.updates_per_second;
        if self.update_timer >= interval {
            self.step_once();
            self.update_timer = 0.0;
        }
    }

    /// Place a pattern and adopt its rule specifier if it carries one.
    /// An unsupported specifier degrades to the standard rule with a
    /// warning; placement itself always succeeds.
    pub fn apply_pattern(&mut self, pattern: &Pattern, x: i32, y: i32, rotation: Rotation) {
        self.grid.place_pattern(pattern, x, y, rotation);
        if let Some(spec) = &pattern.rule {
            self.rule = Rule::parse(spec).unwrap_or_else(|e| {
                log::warn!("{}: falling back to {}", e, Rule::default());
                Rule::default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;

    fn state() -> GameState {
        GameState::new(Grid::new(32, 32, WrapMode::Toroidal).unwrap())
    }

    #[test]
    fn test_tick_does_nothing_while_paused() {
        let mut state = state();
        state.randomize(0.5);
        state.tick(1.0);
        assert_eq!(state.grid.generation(), 0);
    }

    #[test]
    fn test_tick_advances_at_most_one_generation() {
        let mut state = state();
        state.is_running = true;
        state.updates_per_second = 10.0;

        // A long frame still advances a single generation
        state.tick(5.0);
        assert_eq!(state.grid.generation(), 1);

        // A short frame accumulates without stepping
        state.tick(0.01);
        assert_eq!(state.grid.generation(), 1);
    }

    #[test]
    fn test_speed_clamps_to_bounds() {
        let mut state = state();
        state.adjust_speed(1000.0);
        assert_eq!(state.updates_per_second, MAX_SPEED);
        state.adjust_speed(-1000.0);
        assert_eq!(state.updates_per_second, MIN_SPEED);
    }

    #[test]
    fn test_apply_pattern_adopts_supported_rule() {
        let mut state = state();
        let mut p = presets::blinker();
        p.rule = Some("B36/S23".to_string());
        state.apply_pattern(&p, 4, 4, Rotation::None);
        assert_eq!(state.rule, Rule::parse("B36/S23").unwrap());
        assert_eq!(state.grid.population(), 3);
    }

    #[test]
    fn test_apply_pattern_degrades_unsupported_rule() {
        let mut state = state();
        state.rule = Rule::parse("B36/S23").unwrap();
        let mut p = presets::blinker();
        p.rule = Some("W110".to_string());
        state.apply_pattern(&p, 4, 4, Rotation::None);
        assert_eq!(state.rule, Rule::default());
    }

    #[test]
    fn test_resize_stops_simulation() {
        let mut state = state();
        state.is_running = true;
        state.resize_grid(16, 16).unwrap();
        assert!(!state.is_running);
        assert_eq!(state.grid.dimensions(), (16, 16));
        assert!(state.resize_grid(0, 16).is_err());
    }
}
