use thiserror::Error;

use crate::domain::WrapMode;

/// The supported pixels-per-cell zoom ladder
pub const ZOOM_LEVELS: [u32; 4] = [1, 2, 4, 8];
const DEFAULT_ZOOM_INDEX: usize = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewportError {
    #[error("pixel ({px}, {py}) is outside the screen")]
    OutOfViewport { px: i32, py: i32 },
}

/// Screen-space rectangle covering one grid cell
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

/// Maps grid cells to screen pixels under pan and zoom.
///
/// The viewport holds no simulation state; it only reads the grid's
/// dimensions and wrap policy at construction. On bounded grids the
/// origin clamps with at most one cell of letterbox margin past each
/// edge; on toroidal grids it wraps and never clamps.
pub struct Viewport {
    grid_width: i32,
    grid_height: i32,
    wrap: WrapMode,
    origin_x: i32,
    origin_y: i32,
    zoom_index: usize,
    screen_width: i32,
    screen_height: i32,
}

impl Viewport {
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        wrap: WrapMode,
        screen_width: u32,
        screen_height: u32,
    ) -> Self {
        Self {
            grid_width: grid_width as i32,
            grid_height: grid_height as i32,
            wrap,
            origin_x: 0,
            origin_y: 0,
            zoom_index: DEFAULT_ZOOM_INDEX,
            screen_width: screen_width as i32,
            screen_height: screen_height as i32,
        }
    }

    /// Current cell edge length in screen pixels
    pub fn zoom(&self) -> u32 {
        ZOOM_LEVELS[self.zoom_index]
    }

    /// Grid cell currently at the screen's top-left corner
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Number of whole cells visible horizontally
    pub fn cells_wide(&self) -> i32 {
        self.screen_width / self.zoom() as i32
    }

    /// Number of whole cells visible vertically
    pub fn cells_high(&self) -> i32 {
        self.screen_height / self.zoom() as i32
    }

    /// Screen rectangle of a grid cell. Cells off screen map to
    /// rectangles outside the screen bounds; culling is the renderer's
    /// concern.
    pub fn grid_to_screen(&self, cell_x: i32, cell_y: i32) -> CellRect {
        let zoom = self.zoom() as i32;
        CellRect {
            x: (cell_x - self.origin_x) * zoom,
            y: (cell_y - self.origin_y) * zoom,
            size: self.zoom(),
        }
    }

    /// Grid cell under a screen pixel; the editor cursor and pointer
    /// interactions go through this. Toroidal results wrap into grid
    /// range; bounded results may lie in the letterbox margin.
    pub fn screen_to_grid(&self, px: i32, py: i32) -> Result<(i32, i32), ViewportError> {
        if px < 0 || py < 0 || px >= self.screen_width || py >= self.screen_height {
            return Err(ViewportError::OutOfViewport { px, py });
        }
        let zoom = self.zoom() as i32;
        let x = self.origin_x + px / zoom;
        let y = self.origin_y + py / zoom;
        Ok(match self.wrap {
            WrapMode::Toroidal => (x.rem_euclid(self.grid_width), y.rem_euclid(self.grid_height)),
            WrapMode::Bounded => (x, y),
        })
    }

    /// Inclusive (min, max) grid cells covering the screen, including
    /// partially visible edge cells. The renderer iterates this range.
    pub fn visible_range(&self) -> ((i32, i32), (i32, i32)) {
        let zoom = self.zoom() as i32;
        let max_x = self.origin_x + (self.screen_width + zoom - 1) / zoom - 1;
        let max_y = self.origin_y + (self.screen_height + zoom - 1) / zoom - 1;
        ((self.origin_x, self.origin_y), (max_x, max_y))
    }

    /// Shift the origin by whole cells, applying the clamp/wrap policy
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.origin_x += dx;
        self.origin_y += dy;
        self.apply_edge_policy();
    }

    /// Center the view on a grid cell
    pub fn center_on(&mut self, cell_x: i32, cell_y: i32) {
        self.origin_x = cell_x - self.cells_wide() / 2;
        self.origin_y = cell_y - self.cells_high() / 2;
        self.apply_edge_policy();
    }

    /// Set an explicit zoom level, which must be one of `ZOOM_LEVELS`.
    /// The grid cell at screen center stays at screen center.
    pub fn set_zoom(&mut self, level: u32) {
        let Some(index) = ZOOM_LEVELS.iter().position(|&z| z == level) else {
            log::warn!("ignoring unsupported zoom level {level}");
            return;
        };
        self.set_zoom_index(index);
    }

    /// Step one level up the zoom ladder; returns false at the top
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom_index + 1 < ZOOM_LEVELS.len() {
            self.set_zoom_index(self.zoom_index + 1);
            true
        } else {
            false
        }
    }

    /// Step one level down the zoom ladder; returns false at the bottom
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom_index > 0 {
            self.set_zoom_index(self.zoom_index - 1);
            true
        } else {
            false
        }
    }

    fn set_zoom_index(&mut self, index: usize) {
        let center_x = self.origin_x + self.cells_wide() / 2;
        let center_y = self.origin_y + self.cells_high() / 2;
        self.zoom_index = index;
        self.origin_x = center_x - self.cells_wide() / 2;
        self.origin_y = center_y - self.cells_high() / 2;
        self.apply_edge_policy();
    }

    /// Switch the edge policy, re-applying clamp or wrap to the origin
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
        self.apply_edge_policy();
    }

    /// Reset pan and zoom to their startup values
    pub fn reset(&mut self) {
        self.origin_x = 0;
        self.origin_y = 0;
        self.zoom_index = DEFAULT_ZOOM_INDEX;
        self.apply_edge_policy();
    }

    fn apply_edge_policy(&mut self) {
        match self.wrap {
            WrapMode::Toroidal => {
                self.origin_x = self.origin_x.rem_euclid(self.grid_width);
                self.origin_y = self.origin_y.rem_euclid(self.grid_height);
            }
            WrapMode::Bounded => {
                // One cell of letterbox margin is allowed past each edge
                let max_x = (self.grid_width - self.cells_wide() + 1).max(-1);
                let max_y = (self.grid_height - self.cells_high() + 1).max(-1);
                self.origin_x = self.origin_x.clamp(-1, max_x);
                self.origin_y = self.origin_y.clamp(-1, max_y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded() -> Viewport {
        Viewport::new(256, 128, WrapMode::Bounded, 320, 240)
    }

    fn toroidal() -> Viewport {
        Viewport::new(256, 128, WrapMode::Toroidal, 320, 240)
    }

    #[test]
    fn test_grid_to_screen_scales_by_zoom() {
        let mut vp = bounded();
        vp.set_zoom(4);
        vp.pan(10, 5);
        let rect = vp.grid_to_screen(12, 7);
        let (ox, oy) = vp.origin();
        assert_eq!(rect.x, (12 - ox) * 4);
        assert_eq!(rect.y, (7 - oy) * 4);
        assert_eq!(rect.size, 4);
    }

    #[test]
    fn test_screen_to_grid_inverts_grid_to_screen() {
        let mut vp = toroidal();
        vp.pan(30, 40);
        for cell in [(30, 40), (45, 55), (100, 90)] {
            let rect = vp.grid_to_screen(cell.0, cell.1);
            assert_eq!(vp.screen_to_grid(rect.x, rect.y), Ok(cell));
        }
    }

    #[test]
    fn test_screen_to_grid_rejects_outside_pixels() {
        let vp = bounded();
        assert_eq!(
            vp.screen_to_grid(-1, 10),
            Err(ViewportError::OutOfViewport { px: -1, py: 10 })
        );
        assert!(vp.screen_to_grid(320, 0).is_err());
        assert!(vp.screen_to_grid(0, 240).is_err());
    }

    #[test]
    fn test_set_zoom_preserves_center_cell() {
        for level in [1, 2, 4, 8] {
            let mut vp = toroidal();
            vp.pan(60, 30);
            let (cx, cy) = (320 / 2, 240 / 2);
            let before = vp.screen_to_grid(cx, cy).unwrap();
            vp.set_zoom(level);
            let after = vp.screen_to_grid(cx, cy).unwrap();
            assert!(
                (before.0 - after.0).abs() <= 1 && (before.1 - after.1).abs() <= 1,
                "center moved from {before:?} to {after:?} at zoom {level}"
            );
        }
    }

    #[test]
    fn test_set_zoom_ignores_unsupported_level() {
        let mut vp = bounded();
        vp.set_zoom(3);
        assert_eq!(vp.zoom(), 2);
    }

    #[test]
    fn test_zoom_ladder_stops_at_ends() {
        let mut vp = bounded();
        assert!(vp.zoom_in() && vp.zoom_in());
        assert!(!vp.zoom_in());
        assert_eq!(vp.zoom(), 8);
        assert!(vp.zoom_out() && vp.zoom_out() && vp.zoom_out());
        assert!(!vp.zoom_out());
        assert_eq!(vp.zoom(), 1);
    }

    #[test]
    fn test_bounded_pan_clamps_with_margin() {
        let mut vp = bounded();
        vp.pan(-1000, -1000);
        assert_eq!(vp.origin(), (-1, -1));

        vp.pan(5000, 5000);
        let (ox, oy) = vp.origin();
        assert_eq!(ox, 256 - vp.cells_wide() + 1);
        assert_eq!(oy, 128 - vp.cells_high() + 1);
    }

    #[test]
    fn test_toroidal_pan_wraps_and_never_clamps() {
        let mut vp = toroidal();
        vp.pan(-10, -10);
        assert_eq!(vp.origin(), (246, 118));
        vp.pan(20, 20);
        assert_eq!(vp.origin(), (10, 10));
    }

    #[test]
    fn test_visible_range_covers_partial_edge_cells() {
        let mut vp = toroidal();
        vp.set_zoom(8);
        let ((min_x, min_y), (max_x, max_y)) = vp.visible_range();
        assert_eq!((max_x - min_x + 1), 320 / 8);
        assert_eq!((max_y - min_y + 1), 240 / 8);

        let mut vp = Viewport::new(256, 128, WrapMode::Toroidal, 321, 241);
        vp.set_zoom(8);
        let ((min_x, _), (max_x, _)) = vp.visible_range();
        assert_eq!(max_x - min_x + 1, 41);
    }

    #[test]
    fn test_center_on_places_cell_mid_screen() {
        let mut vp = toroidal();
        vp.center_on(100, 60);
        let center = vp.screen_to_grid(320 / 2, 240 / 2).unwrap();
        assert!((center.0 - 100).abs() <= 1 && (center.1 - 60).abs() <= 1);
    }
}
