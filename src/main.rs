use std::path::PathBuf;

use macroquad::prelude::*;

use pocket_life::application::library;
use pocket_life::application::screen::MENU_ITEMS;
use pocket_life::input;
use pocket_life::rendering;
use pocket_life::ui::{self, Theme};
use pocket_life::{
    GameState, Grid, PatternLibrary, Rotation, Screen, ScreenEvent, Settings, Viewport, WrapMode,
};

/// Known-good grid size used when the configured dimensions are invalid
const FALLBACK_GRID: (usize, usize) = (256, 128);

const BOOT_SECONDS: f32 = 1.5;

fn window_conf() -> Conf {
    Conf {
        window_title: "Pocket Life".to_owned(),
        window_width: ui::SCREEN_WIDTH as i32,
        window_height: ui::SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Build the session grid from settings, substituting the fallback size
/// if the configured dimensions are rejected.
fn session_grid(settings: &Settings) -> Grid {
    Grid::new(settings.grid_width, settings.grid_height, settings.wrap).unwrap_or_else(|e| {
        log::warn!("{e}; falling back to {}x{}", FALLBACK_GRID.0, FALLBACK_GRID.1);
        Grid::new(FALLBACK_GRID.0, FALLBACK_GRID.1, settings.wrap)
            .expect("fallback grid dimensions are positive")
    })
}

/// User pattern directory next to the settings file
fn patterns_dir(settings_path: Option<&PathBuf>) -> Option<PathBuf> {
    let dir = settings_path?.parent()?.join("patterns");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("could not create pattern directory {dir:?}: {e}");
        return None;
    }
    Some(dir)
}

/// Anchor that centers a w x h box on the view center
fn centered_anchor(viewport: &Viewport, w: usize, h: usize) -> (i32, i32) {
    let center = viewport
        .screen_to_grid(ui::SCREEN_WIDTH as i32 / 2, ui::SCREEN_HEIGHT as i32 / 2)
        .unwrap_or((0, 0));
    (center.0 - w as i32 / 2, center.1 - h as i32 / 2)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let settings_path = Settings::default_path();
    let mut settings = settings_path
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let grid = session_grid(&settings);
    let (grid_w, grid_h) = grid.dimensions();
    let mut state = GameState::new(grid);
    state.updates_per_second = settings.speed;

    let mut viewport = Viewport::new(
        grid_w,
        grid_h,
        settings.wrap,
        ui::SCREEN_WIDTH,
        ui::SCREEN_HEIGHT,
    );
    viewport.center_on(grid_w as i32 / 2, grid_h as i32 / 2);

    let mut pattern_library = PatternLibrary::with_builtins();
    if let Some(dir) = patterns_dir(settings_path.as_ref()) {
        if let Err(e) = pattern_library.scan(&dir) {
            log::warn!("pattern scan failed: {e}");
        }
    }

    // Optional pattern path handed over on the command line
    if let Some(arg) = std::env::args().nth(1) {
        match library::load_file(std::path::Path::new(&arg)) {
            Ok(pattern) => {
                let (x, y) = centered_anchor(&viewport, pattern.width, pattern.height);
                state.apply_pattern(&pattern, x, y, Rotation::None);
                log::info!("loaded startup pattern {:?}", pattern.name);
            }
            Err(e) => log::error!("could not load startup pattern: {e}"),
        }
    }

    let mut screen = Screen::initial();
    let mut theme = Theme::by_name(&settings.theme);
    let mut boot_elapsed = 0.0f32;
    let mut placement_rotation = Rotation::None;

    loop {
        let dt = get_frame_time();
        clear_background(theme.background);

        match screen {
            Screen::Boot => {
                boot_elapsed += dt;
                rendering::draw_boot(&theme);
                if boot_elapsed >= BOOT_SECONDS || get_last_key_pressed().is_some() {
                    screen = screen.transition(ScreenEvent::BootDone);
                }
            }

            Screen::Menu { cursor } => {
                rendering::draw_grid(&state.grid, &viewport, &theme, false);
                rendering::draw_menu(MENU_ITEMS, cursor, &theme);
                if let Some(event) = input::nav_event(pattern_library.len()) {
                    screen = screen.transition(event);
                }
            }

            Screen::Running => {
                if is_key_pressed(KeyCode::Escape) {
                    screen = screen.transition(ScreenEvent::Back);
                }
                if is_key_pressed(KeyCode::E) {
                    // Jump straight into the editor from the running view
                    screen = Screen::Editor {
                        cursor_x: grid_w as i32 / 2,
                        cursor_y: grid_h as i32 / 2,
                    };
                }
                if is_key_pressed(KeyCode::G) {
                    settings.show_grid_lines = !settings.show_grid_lines;
                    persist(&settings, settings_path.as_deref());
                }
                if is_key_pressed(KeyCode::T) {
                    settings.theme = Theme::next_name(&settings.theme).to_string();
                    theme = Theme::by_name(&settings.theme);
                    persist(&settings, settings_path.as_deref());
                }
                if is_key_pressed(KeyCode::W) {
                    let wrap = match state.grid.wrap() {
                        WrapMode::Toroidal => WrapMode::Bounded,
                        WrapMode::Bounded => WrapMode::Toroidal,
                    };
                    state.set_wrap(wrap);
                    viewport.set_wrap(wrap);
                    settings.wrap = wrap;
                    persist(&settings, settings_path.as_deref());
                }
                input::handle_simulation_keys(&mut state);
                input::handle_viewport_keys(&mut viewport);

                state.tick(dt);
                rendering::draw_grid(&state.grid, &viewport, &theme, settings.show_grid_lines);
                rendering::draw_hud(&state, &viewport, screen.name(), &theme);
            }

            Screen::Editor { .. } => {
                if is_key_pressed(KeyCode::Escape) {
                    screen = screen.transition(ScreenEvent::Back);
                } else {
                    if let Some(event) = input::editor_cursor_event() {
                        screen = screen.transition(event);
                    }
                    // Keep the cursor inside the grid
                    if let Screen::Editor { cursor_x, cursor_y } = &mut screen {
                        *cursor_x = (*cursor_x).clamp(0, grid_w as i32 - 1);
                        *cursor_y = (*cursor_y).clamp(0, grid_h as i32 - 1);
                    }
                    if let Screen::Editor { cursor_x, cursor_y } = screen {
                        if input::editor_toggle_requested() {
                            if let Err(e) = state.grid.toggle_cell(cursor_x, cursor_y) {
                                log::debug!("editor toggle ignored: {e}");
                            }
                        }
                        // Follow the cursor when it leaves the view
                        let ((min_x, min_y), (max_x, max_y)) = viewport.visible_range();
                        if cursor_x < min_x || cursor_x > max_x || cursor_y < min_y || cursor_y > max_y
                        {
                            viewport.center_on(cursor_x, cursor_y);
                        }
                    }
                }

                rendering::draw_grid(&state.grid, &viewport, &theme, settings.show_grid_lines);
                if let Screen::Editor { cursor_x, cursor_y } = screen {
                    rendering::draw_cursor(&viewport, cursor_x, cursor_y, &theme);
                }
                rendering::draw_hud(&state, &viewport, screen.name(), &theme);
            }

            Screen::Gallery { cursor, count } => {
                if is_key_pressed(KeyCode::R) {
                    placement_rotation = placement_rotation.next();
                }
                if let Some(event) = input::nav_event(count) {
                    if matches!(event, ScreenEvent::Choose { .. }) {
                        if let Some(entry) = pattern_library.entries().get(cursor) {
                            if let Ok(pattern) = &entry.pattern {
                                let pattern = pattern.clone();
                                let (w, h) =
                                    placement_rotation.dims(pattern.width, pattern.height);
                                let (x, y) = centered_anchor(&viewport, w, h);
                                state.apply_pattern(&pattern, x, y, placement_rotation);
                            }
                        }
                    }
                    screen = screen.transition(event);
                }
                rendering::draw_gallery(&pattern_library, cursor, &theme);
            }

            Screen::Info => {
                if is_key_pressed(KeyCode::Escape) {
                    screen = screen.transition(ScreenEvent::Back);
                }
                rendering::draw_info(&theme);
            }
        }

        next_frame().await;
    }
}

fn persist(settings: &Settings, path: Option<&std::path::Path>) {
    let Some(path) = path else { return };
    if let Err(e) = settings.save(path) {
        log::warn!("could not save settings to {path:?}: {e}");
    }
}
