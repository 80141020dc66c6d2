use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let summary = app.store.summary();

    let mut spans = match &app.status_message {
        Some(msg) => vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.highlight).bg(bg),
        )],
        None => vec![Span::styled(
            format!(" {}", summary.remaining_label()),
            Style::default().fg(app.theme.text).bg(bg),
        )],
    };

    let hint = match app.mode {
        Mode::Add => "Enter add  Esc done".to_string(),
        Mode::Edit => "Enter save  Esc cancel".to_string(),
        Mode::Navigate => {
            let mut parts: Vec<&str> = Vec::new();
            if app.sequencer.pending_count() > 0 {
                parts.push("u keep");
            }
            if summary.has_completed() {
                parts.push("C clear completed");
            }
            if app.show_key_hints {
                parts.push("? help");
            }
            parts.join("  ")
        }
    };

    // Right-align the hint if it fits
    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let hint_width = unicode::display_width(&hint) + 1;
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            format!("{} ", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
