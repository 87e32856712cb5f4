/// Clockwise rotation applied when placing a pattern.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Rotation {
    #[default]
    None,
    /// 90 degrees clockwise
    Quarter,
    /// 180 degrees
    Half,
    /// 270 degrees clockwise
    ThreeQuarter,
}

impl Rotation {
    /// Rotate a cell coordinate within a `w`x`h` bounding box. Quarter
    /// and three-quarter turns land in an `h`x`w` box.
    pub const fn apply(self, x: usize, y: usize, w: usize, h: usize) -> (usize, usize) {
        match self {
            Rotation::None => (x, y),
            Rotation::Quarter => (h - 1 - y, x),
            Rotation::Half => (w - 1 - x, h - 1 - y),
            Rotation::ThreeQuarter => (y, w - 1 - x),
        }
    }

    /// Bounding box dimensions after rotation
    pub const fn dims(self, w: usize, h: usize) -> (usize, usize) {
        match self {
            Rotation::None | Rotation::Half => (w, h),
            Rotation::Quarter | Rotation::ThreeQuarter => (h, w),
        }
    }

    /// The next quarter turn clockwise (editor cycles through these)
    pub const fn next(self) -> Self {
        match self {
            Rotation::None => Rotation::Quarter,
            Rotation::Quarter => Rotation::Half,
            Rotation::Half => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::None,
        }
    }
}

/// A pattern that can be placed on the grid.
///
/// `width`/`height` is the bounding box of the alive cells; `cells` holds
/// their coordinates relative to the box's top-left corner, row-major and
/// duplicate-free. Placement copies cells into the grid; the pattern
/// itself is never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pattern {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>,
    pub author: String,
    pub comment: String,
    /// Rule specifier carried by the file, e.g. "B3/S23". Left to the
    /// caller to parse; unsupported specifiers degrade to the default.
    pub rule: Option<String>,
}

impl Pattern {
    /// Create a pattern from alive cell coordinates; the bounding box is
    /// derived from the cells.
    pub fn new(name: impl Into<String>, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        Self {
            name: name.into(),
            width,
            height,
            cells,
            author: String::new(),
            comment: String::new(),
            rule: None,
        }
    }

    fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    /// Count of alive cells
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Built-in pattern catalog, seeded into the library at startup.
pub mod presets {
    use super::*;

    // Still lifes

    pub fn block() -> Pattern {
        Pattern::new("Block", vec![(0, 0), (1, 0), (0, 1), (1, 1)]).with_comment("Still life")
    }

    pub fn beehive() -> Pattern {
        Pattern::new(
            "Beehive",
            vec![(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
        )
        .with_comment("6-cell still life")
    }

    pub fn loaf() -> Pattern {
        Pattern::new(
            "Loaf",
            vec![(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (3, 2), (2, 3)],
        )
        .with_comment("7-cell still life")
    }

    pub fn boat() -> Pattern {
        Pattern::new("Boat", vec![(0, 0), (1, 0), (0, 1), (2, 1), (1, 2)])
            .with_comment("5-cell still life")
    }

    pub fn tub() -> Pattern {
        Pattern::new("Tub", vec![(1, 0), (0, 1), (2, 1), (1, 2)]).with_comment("4-cell still life")
    }

    // Oscillators

    pub fn blinker() -> Pattern {
        Pattern::new("Blinker", vec![(0, 0), (1, 0), (2, 0)]).with_comment("Period 2 oscillator")
    }

    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            vec![(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
        )
        .with_comment("Period 2 oscillator")
    }

    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
                (2, 2), (3, 2),
                (2, 3), (3, 3),
            ],
        )
        .with_comment("Period 2 oscillator")
    }

    pub fn pulsar() -> Pattern {
        Pattern::new(
            "Pulsar",
            vec![
                (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
                (0, 2), (5, 2), (7, 2), (12, 2),
                (0, 3), (5, 3), (7, 3), (12, 3),
                (0, 4), (5, 4), (7, 4), (12, 4),
                (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
                (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
                (0, 8), (5, 8), (7, 8), (12, 8),
                (0, 9), (5, 9), (7, 9), (12, 9),
                (0, 10), (5, 10), (7, 10), (12, 10),
                (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
            ],
        )
        .with_comment("Period 3 oscillator")
    }

    pub fn pentadecathlon() -> Pattern {
        Pattern::new(
            "Pentadecathlon",
            vec![
                (2, 0), (7, 0),
                (0, 1), (1, 1), (3, 1), (4, 1), (5, 1), (6, 1), (8, 1), (9, 1),
                (2, 2), (7, 2),
            ],
        )
        .with_comment("Period 15 oscillator")
    }

    // Spaceships

    pub fn glider() -> Pattern {
        Pattern::new("Glider", vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
            .with_comment("Smallest spaceship, moves diagonally")
    }

    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            vec![
                (0, 0), (3, 0),
                (4, 1),
                (0, 2), (4, 2),
                (1, 3), (2, 3), (3, 3), (4, 3),
            ],
        )
        .with_comment("Lightweight spaceship")
    }

    pub fn mwss() -> Pattern {
        Pattern::new(
            "MWSS",
            vec![
                (2, 0),
                (0, 1), (4, 1),
                (5, 2),
                (0, 3), (5, 3),
                (1, 4), (2, 4), (3, 4), (4, 4), (5, 4),
            ],
        )
        .with_comment("Middleweight spaceship")
    }

    pub fn hwss() -> Pattern {
        Pattern::new(
            "HWSS",
            vec![
                (2, 0), (3, 0),
                (0, 1), (5, 1),
                (6, 2),
                (0, 3), (6, 3),
                (1, 4), (2, 4), (3, 4), (4, 4), (5, 4), (6, 4),
            ],
        )
        .with_comment("Heavyweight spaceship")
    }

    // Guns

    pub fn gosper_glider_gun() -> Pattern {
        Pattern::new(
            "Gosper Glider Gun",
            vec![
                (24, 0),
                (22, 1), (24, 1),
                (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
                (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
                (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
                (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
                (10, 6), (16, 6), (24, 6),
                (11, 7), (15, 7),
                (12, 8), (13, 8),
            ],
        )
        .with_comment("First known gun, emits a glider every 30 generations")
    }

    // Methuselahs

    pub fn r_pentomino() -> Pattern {
        Pattern::new("R-pentomino", vec![(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)])
            .with_comment("Methuselah, stabilizes at generation 1103")
    }

    pub fn diehard() -> Pattern {
        Pattern::new(
            "Diehard",
            vec![(6, 0), (0, 1), (1, 1), (1, 2), (5, 2), (6, 2), (7, 2)],
        )
        .with_comment("Methuselah, dies out at generation 130")
    }

    pub fn acorn() -> Pattern {
        Pattern::new(
            "Acorn",
            vec![(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
        )
        .with_comment("Methuselah, stabilizes at generation 5206")
    }

    /// All built-in patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            block(),
            beehive(),
            loaf(),
            boat(),
            tub(),
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            pentadecathlon(),
            glider(),
            lwss(),
            mwss(),
            hwss(),
            gosper_glider_gun(),
            r_pentomino(),
            diehard(),
            acorn(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_derived_from_cells() {
        let p = presets::glider();
        assert_eq!((p.width, p.height), (3, 3));
        assert_eq!(p.population(), 5);
    }

    #[test]
    fn test_empty_pattern_has_zero_box() {
        let p = Pattern::new("void", vec![]);
        assert_eq!((p.width, p.height), (0, 0));
        assert!(p.is_empty());
    }

    #[test]
    fn test_presets_respect_invariants() {
        for p in presets::all_patterns() {
            let mut seen = p.cells.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), p.cells.len(), "{} has duplicate cells", p.name);
            for &(x, y) in &p.cells {
                assert!(x < p.width && y < p.height, "{} cell out of box", p.name);
            }
        }
    }

    #[test]
    fn test_quarter_turn_swaps_dims() {
        assert_eq!(Rotation::Quarter.dims(5, 2), (2, 5));
        assert_eq!(Rotation::Half.dims(5, 2), (5, 2));
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let (w, h) = (4, 3);
        for x in 0..w {
            for y in 0..h {
                // Compose four explicit quarter turns, tracking the box
                let (x1, y1) = Rotation::Quarter.apply(x, y, w, h);
                let (x2, y2) = Rotation::Quarter.apply(x1, y1, h, w);
                let (x3, y3) = Rotation::Quarter.apply(x2, y2, w, h);
                let (x4, y4) = Rotation::Quarter.apply(x3, y3, h, w);
                assert_eq!((x4, y4), (x, y));
            }
        }
    }

    #[test]
    fn test_half_turn_matches_two_quarters() {
        let (w, h) = (6, 4);
        for x in 0..w {
            for y in 0..h {
                let (qx, qy) = Rotation::Quarter.apply(x, y, w, h);
                let (qqx, qqy) = Rotation::Quarter.apply(qx, qy, h, w);
                assert_eq!(Rotation::Half.apply(x, y, w, h), (qqx, qqy));
            }
        }
    }
}
