mod game_state;
pub mod library;
pub mod screen;
pub mod settings;
mod viewport;

pub use game_state::GameState;
pub use library::{CatalogEntry, LibraryError, PatternLibrary};
pub use screen::{MENU_ITEMS, Screen, ScreenEvent};
pub use settings::Settings;
pub use viewport::{CellRect, Viewport, ViewportError, ZOOM_LEVELS};
