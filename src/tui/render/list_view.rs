use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::FilterMode;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Checkbox for a task (markdown style)
fn check_symbol(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Render the task list content area
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;
    let len = app.visible_len();

    if len == 0 {
        let msg = match app.store.filter() {
            FilterMode::All => " No tasks",
            FilterMode::Active => " No active tasks",
            FilterMode::Completed => " No completed tasks",
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor row on screen
    app.clamp_cursor();
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }
    app.scroll_offset = app.scroll_offset.min(len.saturating_sub(1));

    let theme = &app.theme;
    let width = area.width as usize;
    let visible = app.store.visible();
    let end = len.min(app.scroll_offset + visible_height);
    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    let mut edit_anchor: Option<(u16, u16)> = None;

    for (row, item) in visible[app.scroll_offset..end].iter().enumerate() {
        let pos = app.scroll_offset + row;
        let task = item.task;
        let is_cursor = pos == app.cursor;
        let is_exiting = app.sequencer.is_pending(task.id);
        let is_editing = app.mode == Mode::Edit && app.edit_target == Some(task.id);
        let row_bg = if is_cursor { theme.selection_bg } else { bg };

        let prefix = format!(" {} ", check_symbol(task.completed));
        let prefix_width = unicode::display_width(&prefix);
        let room = width.saturating_sub(prefix_width);

        let (check_style, text_style) = if is_exiting {
            let style = Style::default()
                .fg(theme.red)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT);
            (style, style)
        } else if task.completed {
            (
                Style::default().fg(theme.check_color(true)).bg(row_bg),
                Style::default()
                    .fg(theme.dim)
                    .bg(row_bg)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            let fg = if is_cursor { theme.text_bright } else { theme.text };
            (
                Style::default().fg(theme.check_color(false)).bg(row_bg),
                Style::default().fg(fg).bg(row_bg),
            )
        };

        let text = if is_editing {
            let col = unicode::byte_offset_to_display_col(&app.edit_buffer, app.edit_cursor);
            let x = (prefix_width + col.min(room.saturating_sub(1))) as u16;
            edit_anchor = Some((area.x + x, area.y + row as u16));
            unicode::truncate_to_width(&app.edit_buffer, room)
        } else {
            unicode::truncate_to_width(&task.text, room)
        };
        let text_style = if is_editing {
            Style::default().fg(theme.text_bright).bg(row_bg)
        } else {
            text_style
        };

        let used = prefix_width + unicode::display_width(&text);
        lines.push(Line::from(vec![
            Span::styled(prefix, check_style),
            Span::styled(text, text_style),
            Span::styled(
                " ".repeat(width.saturating_sub(used)),
                Style::default().bg(row_bg),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);

    if let Some((x, y)) = edit_anchor {
        frame.set_cursor_position(Position::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn renders_checkboxes_in_store_order() {
        let (mut app, _) = app_with_tasks(&[("buy milk", false), ("walk dog", true)]);
        let out = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " [ ] buy milk\n [x] walk dog");
    }

    #[test]
    fn filtered_view_hides_completed() {
        let (mut app, _) = app_with_tasks(&[("a", true), ("b", false), ("c", true)]);
        app.set_filter(FilterMode::Active);
        let out = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " [ ] b");
    }

    #[test]
    fn empty_messages_follow_filter() {
        let (mut app, _) = app_with_tasks(&[]);
        let out = render_to_string(TERM_W, 3, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " No tasks");

        let (mut app, _) = app_with_tasks(&[("open", false)]);
        app.set_filter(FilterMode::Completed);
        let out = render_to_string(TERM_W, 3, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " No completed tasks");
    }

    #[test]
    fn long_text_is_truncated() {
        let (mut app, _) = app_with_tasks(&[("a very long task description", false)]);
        let out = render_to_string(16, 1, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " [ ] a very lon\u{2026}");
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let (mut app, _) = app_with_tasks(&[
            ("t1", false),
            ("t2", false),
            ("t3", false),
            ("t4", false),
        ]);
        app.cursor = 3;
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " [ ] t3\n [ ] t4");
        assert_eq!(app.scroll_offset, 2);
    }

    #[test]
    fn pending_delete_uses_exit_style() {
        let (mut app, _) = app_with_tasks(&[("going", false), ("staying", false)]);
        let visible = app.store.visible();
        app.sequencer.request(0, &visible).unwrap();
        drop(visible);
        app.cursor = 1;

        let buf = render_to_buffer(TERM_W, 2, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(buf[(5, 0)].fg, app.theme.red);
        assert!(buf[(5, 0)].modifier.contains(Modifier::CROSSED_OUT));
        assert_ne!(buf[(5, 1)].fg, app.theme.red);
    }

    #[test]
    fn cursor_row_is_highlighted() {
        let (mut app, _) = app_with_tasks(&[("a", false), ("b", false)]);
        app.cursor = 1;
        let buf = render_to_buffer(TERM_W, 2, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(buf[(0, 1)].bg, app.theme.selection_bg);
        assert_eq!(buf[(0, 0)].bg, app.theme.background);
    }

    #[test]
    fn edited_row_shows_buffer() {
        let (mut app, _) = app_with_tasks(&[("old", false)]);
        app.mode = Mode::Edit;
        app.edit_target = app.cursor_id();
        app.edit_buffer = "new text".into();
        app.edit_cursor = 3;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(out, " [ ] new text");
    }
}
