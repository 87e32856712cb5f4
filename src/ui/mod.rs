mod menu;
pub mod theme;

pub use menu::Menu;
pub use theme::{THEME_NAMES, Theme};

// Fixed panel dimensions of the handheld display
pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 480;

/// Height of the HUD strip along the bottom edge
pub const HUD_HEIGHT: f32 = 24.0;
