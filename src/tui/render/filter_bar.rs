use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::FilterMode;
use crate::tui::app::App;

/// Render the filter bar (title, filter tabs, separator line)
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.store.filter();

    let mut spans: Vec<Span> = vec![Span::styled(
        " ticklist ",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    for (i, mode) in FilterMode::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, mode.label());
        let style = if *mode == active {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(label, style));
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(spans), separator])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
