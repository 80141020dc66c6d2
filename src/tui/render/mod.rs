pub mod filter_bar;
pub mod help_overlay;
pub mod input_bar;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: filter bar | input bar | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filter bar + separator
            Constraint::Length(1), // input bar
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    filter_bar::render_filter_bar(frame, app, chunks[0]);
    input_bar::render_input_bar(frame, app, chunks[1]);
    list_view::render_list_view(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn full_screen_layout() {
        let (mut app, _) = app_with_tasks(&[("buy milk", false), ("walk dog", true)]);
        let out = render_to_string(TERM_W, 8, |frame, _| render(frame, &mut app));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("ticklist"));
        assert!(lines[2].contains("What needs to be done?"));
        assert!(lines[3].contains("[ ] buy milk"));
        assert!(lines[4].contains("[x] walk dog"));
        assert!(lines[7].contains("1 item left"));
    }
}
