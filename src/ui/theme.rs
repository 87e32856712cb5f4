use macroquad::prelude::{Color, WHITE};

/// Display theme names, in the order the theme hotkey cycles through
pub const THEME_NAMES: &[&str] = &["classic", "amber", "blue", "white", "matrix"];

/// Color theme for the handheld display
#[derive(Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub cell_alive: Color,
    pub grid_lines: Color,
    pub text: Color,
    pub text_highlight: Color,
    pub text_dim: Color,
    pub menu_bg: Color,
    pub menu_highlight: Color,
    pub cursor: Color,
    pub title: Color,
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba(r, g, b, 255)
}

impl Theme {
    /// Look a theme up by settings name; unknown names fall back to classic
    pub fn by_name(name: &str) -> Theme {
        match name {
            "amber" => Theme {
                background: rgb(0, 0, 0),
                cell_alive: rgb(255, 176, 0),
                grid_lines: rgb(40, 30, 0),
                text: rgb(255, 200, 100),
                text_highlight: rgb(255, 176, 0),
                text_dim: rgb(150, 120, 60),
                menu_bg: rgb(20, 15, 0),
                menu_highlight: rgb(100, 70, 0),
                cursor: rgb(255, 255, 255),
                title: rgb(255, 176, 0),
            },
            "blue" => Theme {
                background: rgb(0, 0, 20),
                cell_alive: rgb(100, 150, 255),
                grid_lines: rgb(20, 20, 50),
                text: rgb(200, 220, 255),
                text_highlight: rgb(100, 150, 255),
                text_dim: rgb(120, 140, 180),
                menu_bg: rgb(10, 10, 30),
                menu_highlight: rgb(30, 50, 100),
                cursor: rgb(255, 255, 100),
                title: rgb(100, 180, 255),
            },
            "white" => Theme {
                background: WHITE,
                cell_alive: rgb(0, 0, 0),
                grid_lines: rgb(220, 220, 220),
                text: rgb(60, 60, 60),
                text_highlight: rgb(0, 100, 200),
                text_dim: rgb(140, 140, 140),
                menu_bg: rgb(240, 240, 240),
                menu_highlight: rgb(200, 220, 255),
                cursor: rgb(255, 100, 100),
                title: rgb(0, 100, 200),
            },
            "matrix" => Theme {
                background: rgb(0, 10, 0),
                cell_alive: rgb(0, 255, 65),
                grid_lines: rgb(0, 30, 0),
                text: rgb(0, 200, 50),
                text_highlight: rgb(0, 255, 65),
                text_dim: rgb(0, 120, 40),
                menu_bg: rgb(0, 15, 0),
                menu_highlight: rgb(0, 50, 0),
                cursor: rgb(100, 255, 100),
                title: rgb(0, 255, 65),
            },
            _ => Theme {
                background: rgb(0, 0, 0),
                cell_alive: rgb(0, 255, 0),
                grid_lines: rgb(30, 30, 30),
                text: rgb(200, 200, 200),
                text_highlight: rgb(0, 255, 0),
                text_dim: rgb(150, 150, 150),
                menu_bg: rgb(20, 20, 20),
                menu_highlight: rgb(0, 100, 0),
                cursor: rgb(255, 255, 0),
                title: rgb(0, 255, 0),
            },
        }
    }

    /// The name following `current` in the cycle order
    pub fn next_name(current: &str) -> &'static str {
        let index = THEME_NAMES
            .iter()
            .position(|&name| name == current)
            .unwrap_or(0);
        THEME_NAMES[(index + 1) % THEME_NAMES.len()]
    }
}
