use macroquad::prelude::*;

use crate::application::{GameState, ScreenEvent, Viewport};

/// Cells moved per frame while a pan key is held
pub const PAN_STEP: i32 = 5;

/// Alive probability used by the randomize key
pub const RANDOM_DENSITY: f64 = 0.3;

/// Map list-navigation keys to a screen event. Shared by the menu and
/// the gallery, which only differ in their entry count.
pub fn nav_event(gallery_count: usize) -> Option<ScreenEvent> {
    if is_key_pressed(KeyCode::Up) {
        Some(ScreenEvent::Up)
    } else if is_key_pressed(KeyCode::Down) {
        Some(ScreenEvent::Down)
    } else if is_key_pressed(KeyCode::Enter) {
        Some(ScreenEvent::Choose { gallery_count })
    } else if is_key_pressed(KeyCode::Escape) {
        Some(ScreenEvent::Back)
    } else {
        None
    }
}

/// Simulation hotkeys for the running screen
pub fn handle_simulation_keys(state: &mut GameState) {
    let actions: [(KeyCode, fn(&mut GameState)); 6] = [
        (KeyCode::Space, GameState::toggle_running),
        (KeyCode::C, GameState::clear),
        (KeyCode::R, |s| s.randomize(RANDOM_DENSITY)),
        (KeyCode::S, GameState::step_once),
        (KeyCode::Equal, |s| s.adjust_speed(1.0)),
        (KeyCode::Minus, |s| s.adjust_speed(-1.0)),
    ];
    for (key, action) in actions {
        if is_key_pressed(key) {
            action(state);
        }
    }
}

/// Pan and zoom keys, active on the running and editor screens
pub fn handle_viewport_keys(viewport: &mut Viewport) {
    let mut dx = 0;
    let mut dy = 0;
    if is_key_down(KeyCode::Left) {
        dx -= PAN_STEP;
    }
    if is_key_down(KeyCode::Right) {
        dx += PAN_STEP;
    }
    if is_key_down(KeyCode::Up) {
        dy -= PAN_STEP;
    }
    if is_key_down(KeyCode::Down) {
        dy += PAN_STEP;
    }
    if dx != 0 || dy != 0 {
        viewport.pan(dx, dy);
    }

    if is_key_pressed(KeyCode::LeftBracket) {
        viewport.zoom_out();
    }
    if is_key_pressed(KeyCode::RightBracket) {
        viewport.zoom_in();
    }
    if is_key_pressed(KeyCode::H) {
        viewport.reset();
    }
}

/// Editor cursor movement, one cell per keypress
pub fn editor_cursor_event() -> Option<ScreenEvent> {
    let mut dx = 0;
    let mut dy = 0;
    if is_key_pressed(KeyCode::Left) {
        dx -= 1;
    }
    if is_key_pressed(KeyCode::Right) {
        dx += 1;
    }
    if is_key_pressed(KeyCode::Up) {
        dy -= 1;
    }
    if is_key_pressed(KeyCode::Down) {
        dy += 1;
    }
    (dx != 0 || dy != 0).then_some(ScreenEvent::MoveCursor { dx, dy })
}

/// Whether the editor toggle key was pressed this frame
pub fn editor_toggle_requested() -> bool {
    is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter)
}
