use macroquad::prelude::*;

use super::theme::Theme;

/// Keyboard-driven selection list.
///
/// The widget only draws; cursor movement lives in the screen state so
/// the list never owns UI flow.
pub struct Menu {
    x: f32,
    y: f32,
    width: f32,
    row_height: f32,
    title: String,
}

impl Menu {
    pub fn new(x: f32, y: f32, width: f32, title: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            row_height: 28.0,
            title: title.into(),
        }
    }

    /// Draw the list with the cursor row highlighted. Long lists scroll
    /// so the cursor stays within `visible_rows`.
    pub fn draw(&self, items: &[String], cursor: usize, visible_rows: usize, theme: &Theme) {
        draw_text(&self.title, self.x, self.y - 8.0, 24.0, theme.title);

        let first = cursor.saturating_sub(visible_rows.saturating_sub(1));
        let window = items.iter().enumerate().skip(first).take(visible_rows);
        for (row, (index, item)) in window.enumerate() {
            let row_y = self.y + row as f32 * self.row_height;
            let selected = index == cursor;
            let bg = if selected {
                theme.menu_highlight
            } else {
                theme.menu_bg
            };
            draw_rectangle(self.x, row_y, self.width, self.row_height - 2.0, bg);
            let color = if selected {
                theme.text_highlight
            } else {
                theme.text
            };
            draw_text(item, self.x + 8.0, row_y + 20.0, 20.0, color);
        }

        if items.len() > visible_rows {
            let hint = format!("{}/{}", cursor + 1, items.len());
            let hint_y = self.y + visible_rows as f32 * self.row_height + 16.0;
            draw_text(&hint, self.x, hint_y, 16.0, theme.text_dim);
        }
    }
}
