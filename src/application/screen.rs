//! Screen flow for the handheld UI, modeled as a tagged state value with
//! an explicit transition function. Each variant carries only the data
//! that screen needs.

/// Entries of the main menu, in display order
pub const MENU_ITEMS: &[&str] = &["Resume", "Pattern Gallery", "Editor", "Info"];

/// The active UI screen
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    /// Splash shown briefly at startup
    Boot,
    Menu {
        cursor: usize,
    },
    Running,
    Editor {
        cursor_x: i32,
        cursor_y: i32,
    },
    Gallery {
        cursor: usize,
        count: usize,
    },
    Info,
}

/// Inputs the screen flow reacts to
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScreenEvent {
    BootDone,
    Up,
    Down,
    /// Confirm the highlighted entry. The gallery size comes along so
    /// entering the gallery can bound its cursor.
    Choose { gallery_count: usize },
    Back,
    /// Editor cursor movement; the input layer supplies in-bounds deltas
    MoveCursor { dx: i32, dy: i32 },
}

impl Screen {
    pub const fn initial() -> Self {
        Screen::Boot
    }

    /// Apply one event and produce the next screen. Unrelated events
    /// leave the screen unchanged.
    pub fn transition(self, event: ScreenEvent) -> Screen {
        use Screen::*;
        use ScreenEvent::*;

        match (self, event) {
            (Boot, BootDone) => Menu { cursor: 0 },

            (Menu { cursor }, Up) => Menu {
                cursor: cursor.checked_sub(1).unwrap_or(MENU_ITEMS.len() - 1),
            },
            (Menu { cursor }, Down) => Menu {
                cursor: (cursor + 1) % MENU_ITEMS.len(),
            },
            (Menu { cursor }, Choose { gallery_count }) => match MENU_ITEMS[cursor] {
                "Resume" => Running,
                "Pattern Gallery" => Gallery {
                    cursor: 0,
                    count: gallery_count,
                },
                "Editor" => Editor {
                    cursor_x: 0,
                    cursor_y: 0,
                },
                "Info" => Info,
                _ => self,
            },
            (Menu { .. }, Back) => Running,

            (Running, Back) => Menu { cursor: 0 },

            (Editor { .. }, Back) => Running,
            (
                Editor { cursor_x, cursor_y },
                MoveCursor { dx, dy },
            ) => Editor {
                cursor_x: cursor_x + dx,
                cursor_y: cursor_y + dy,
            },

            (Gallery { cursor, count }, Up) if count > 0 => Gallery {
                cursor: cursor.checked_sub(1).unwrap_or(count - 1),
                count,
            },
            (Gallery { cursor, count }, Down) if count > 0 => Gallery {
                cursor: (cursor + 1) % count,
                count,
            },
            // Placement hand-off happens in the frame loop; choosing an
            // entry returns to the running view
            (Gallery { .. }, Choose { .. }) => Running,
            (Gallery { .. }, Back) => Menu { cursor: 1 },

            (Info, Back) => Menu { cursor: 3 },

            (unchanged, _) => unchanged,
        }
    }

    /// Short label for the HUD
    pub const fn name(self) -> &'static str {
        match self {
            Screen::Boot => "boot",
            Screen::Menu { .. } => "menu",
            Screen::Running => "running",
            Screen::Editor { .. } => "editor",
            Screen::Gallery { .. } => "gallery",
            Screen::Info => "info",
        }
    }
}
