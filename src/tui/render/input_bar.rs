use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

const PROMPT: &str = " > ";
const PLACEHOLDER: &str = "What needs to be done?";

/// Render the new-task input bar
pub fn render_input_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let prompt_style = Style::default().fg(app.theme.highlight).bg(bg);

    let line = if app.mode == Mode::Add {
        let prompt_width = unicode::display_width(PROMPT);
        let room = (area.width as usize).saturating_sub(prompt_width + 1);
        // Scroll horizontally so the cursor stays on screen
        let cursor_col = unicode::byte_offset_to_display_col(&app.edit_buffer, app.edit_cursor);
        let shift = cursor_col.saturating_sub(room);
        let shown = skip_columns(&app.edit_buffer, shift);
        let skipped = unicode::display_width(&app.edit_buffer) - unicode::display_width(shown);

        let x = area.x + (prompt_width + cursor_col.saturating_sub(skipped)) as u16;
        frame.set_cursor_position(Position::new(x, area.y));

        Line::from(vec![
            Span::styled(PROMPT, prompt_style),
            Span::styled(
                unicode::truncate_to_width(shown, room + 1),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(PLACEHOLDER, Style::default().fg(app.theme.dim).bg(bg)),
        ])
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Suffix of `s` starting at the first grapheme at or past `cols` cells.
fn skip_columns(s: &str, cols: usize) -> &str {
    let mut offset = 0;
    while unicode::byte_offset_to_display_col(s, offset) < cols {
        match unicode::next_grapheme_boundary(s, offset) {
            Some(next) => offset = next,
            None => break,
        }
    }
    &s[offset..]
}
