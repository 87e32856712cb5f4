use macroquad::prelude::*;

use crate::application::{GameState, PatternLibrary, Viewport};
use crate::domain::{Grid, Pattern};
use crate::ui::{HUD_HEIGHT, Menu, Theme};

/// Format large numbers with K/M suffixes for the HUD
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{n}")
    }
}

/// Draw every grid cell in the viewport's visible range. Grid lines only
/// appear once cells are large enough to separate.
pub fn draw_grid(grid: &Grid, viewport: &Viewport, theme: &Theme, show_grid_lines: bool) {
    let ((min_x, min_y), (max_x, max_y)) = viewport.visible_range();
    let draw_lines = show_grid_lines && viewport.zoom() >= 4;

    for cell_y in min_y..=max_y {
        for cell_x in min_x..=max_x {
            let rect = viewport.grid_to_screen(cell_x, cell_y);
            let size = rect.size as f32;
            if grid.get(cell_x, cell_y).is_alive() {
                draw_rectangle(rect.x as f32, rect.y as f32, size, size, theme.cell_alive);
            }
            if draw_lines {
                draw_rectangle_lines(rect.x as f32, rect.y as f32, size, size, 1.0, theme.grid_lines);
            }
        }
    }
}

/// Highlight the editor cursor cell
pub fn draw_cursor(viewport: &Viewport, cell_x: i32, cell_y: i32, theme: &Theme) {
    let rect = viewport.grid_to_screen(cell_x, cell_y);
    let size = rect.size as f32;
    draw_rectangle_lines(rect.x as f32 - 1.0, rect.y as f32 - 1.0, size + 2.0, size + 2.0, 2.0, theme.cursor);
}

/// HUD strip along the bottom: generation, population, speed, zoom and
/// the active screen name.
pub fn draw_hud(state: &GameState, viewport: &Viewport, screen_name: &str, theme: &Theme) {
    let y = screen_height() - HUD_HEIGHT;
    draw_rectangle(0.0, y, screen_width(), HUD_HEIGHT, theme.menu_bg);

    let status = format!(
        "GEN {}  POP {}  SPD {:.0}/s  x{}  [{}]",
        format_number(state.grid.generation() as usize),
        format_number(state.grid.population()),
        state.updates_per_second,
        viewport.zoom(),
        screen_name,
    );
    let color = if state.is_running {
        theme.text_highlight
    } else {
        theme.text
    };
    draw_text(&status, 8.0, y + 17.0, 20.0, color);
}

/// Splash screen shown while booting
pub fn draw_boot(theme: &Theme) {
    let title = "POCKET LIFE";
    let size = 56.0;
    let width = measure_text(title, None, size as u16, 1.0).width;
    draw_text(
        title,
        (screen_width() - width) / 2.0,
        screen_height() / 2.0,
        size,
        theme.title,
    );
    let hint = "press any key";
    let hint_width = measure_text(hint, None, 20, 1.0).width;
    draw_text(
        hint,
        (screen_width() - hint_width) / 2.0,
        screen_height() / 2.0 + 40.0,
        20.0,
        theme.text_dim,
    );
}

/// Main menu overlay
pub fn draw_menu(items: &[&str], cursor: usize, theme: &Theme) {
    let entries: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    let menu = Menu::new(screen_width() / 2.0 - 120.0, 140.0, 240.0, "Pocket Life");
    menu.draw(&entries, cursor, entries.len(), theme);
}

/// Gallery: pattern list on the left, preview of the selection on the
/// right, failed-file count underneath.
pub fn draw_gallery(library: &PatternLibrary, cursor: usize, theme: &Theme) {
    const VISIBLE_ROWS: usize = 12;

    let entries: Vec<String> = library
        .entries()
        .iter()
        .map(|entry| {
            if entry.pattern.is_ok() {
                entry.name.clone()
            } else {
                format!("{} (!)", entry.name)
            }
        })
        .collect();
    let menu = Menu::new(24.0, 48.0, 280.0, "Pattern Gallery");
    menu.draw(&entries, cursor, VISIBLE_ROWS, theme);

    if let Some(entry) = library.entries().get(cursor) {
        match &entry.pattern {
            Ok(pattern) => draw_pattern_preview(pattern, 340.0, 60.0, theme),
            Err(e) => {
                draw_text(&format!("{e}"), 340.0, 80.0, 18.0, theme.text_dim);
            }
        }
    }

    let failed = library.failed_count();
    if failed > 0 {
        let note = format!("{failed} pattern file(s) failed to load");
        draw_text(&note, 24.0, screen_height() - HUD_HEIGHT - 12.0, 16.0, theme.text_dim);
    }
    draw_text(
        "enter: place at view center   esc: back",
        24.0,
        screen_height() - HUD_HEIGHT + 17.0,
        16.0,
        theme.text_dim,
    );
}

/// Scaled-down standalone rendering of one pattern
fn draw_pattern_preview(pattern: &Pattern, x: f32, y: f32, theme: &Theme) {
    const PREVIEW_SPAN: f32 = 320.0;

    draw_text(&pattern.name, x, y - 12.0, 22.0, theme.text_highlight);
    if !pattern.comment.is_empty() {
        draw_text(&pattern.comment, x, y + 8.0, 16.0, theme.text_dim);
    }

    let longest = pattern.width.max(pattern.height).max(1) as f32;
    let cell = (PREVIEW_SPAN / longest).clamp(1.0, 12.0);
    let top = y + 24.0;
    for &(px, py) in &pattern.cells {
        draw_rectangle(
            x + px as f32 * cell,
            top + py as f32 * cell,
            cell.max(1.0) - 1.0,
            cell.max(1.0) - 1.0,
            theme.cell_alive,
        );
    }

    let caption = format!(
        "{}x{}, {} cells{}",
        pattern.width,
        pattern.height,
        pattern.population(),
        pattern
            .rule
            .as_deref()
            .map(|r| format!(", rule {r}"))
            .unwrap_or_default(),
    );
    draw_text(&caption, x, top + PREVIEW_SPAN + 20.0, 16.0, theme.text);
}

/// Info screen: key bindings and a word on the formats
pub fn draw_info(theme: &Theme) {
    let lines = [
        ("POCKET LIFE", theme.title),
        ("", theme.text),
        ("space  run / pause        s  single step", theme.text),
        ("c      clear              r  randomize", theme.text),
        ("arrows pan                [ ]  zoom", theme.text),
        ("g      grid lines         t  theme", theme.text),
        ("h      reset view         esc  menu", theme.text),
        ("", theme.text),
        ("Patterns load from .rle and .cells files", theme.text_dim),
        ("placed in the user pattern directory.", theme.text_dim),
    ];
    let mut y = 100.0;
    for (line, color) in lines {
        draw_text(line, 80.0, y, 22.0, color);
        y += 30.0;
    }
}
