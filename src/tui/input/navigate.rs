use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::FilterMode;
use crate::tui::app::App;

use super::edit::{begin_add, begin_edit};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Clear any transient status message on keypress
    app.status_message = None;

    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Cursor movement
        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g') | KeyCode::Home) => {
            app.cursor = 0;
        }
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible_len().saturating_sub(1);
        }

        // Add / edit
        (_, KeyCode::Char('a') | KeyCode::Char('i')) => begin_add(app),
        (_, KeyCode::Char('e') | KeyCode::Enter) => begin_edit(app),

        // Toggle completion
        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => toggle_at_cursor(app),

        // Deferred delete / cancel
        (_, KeyCode::Char('d') | KeyCode::Delete) => delete_at_cursor(app),
        (_, KeyCode::Char('u')) => {
            let n = app.sequencer.cancel_all();
            if n > 0 {
                app.status_message = Some(format!("kept {} task{}", n, plural(n)));
            }
        }

        // Filters
        (_, KeyCode::Char('1')) => app.set_filter(FilterMode::All),
        (_, KeyCode::Char('2')) => app.set_filter(FilterMode::Active),
        (_, KeyCode::Char('3')) => app.set_filter(FilterMode::Completed),
        (_, KeyCode::Tab) => {
            let next = app.store.filter().next();
            app.set_filter(next);
        }
        (_, KeyCode::BackTab) => {
            let prev = app.store.filter().prev();
            app.set_filter(prev);
        }

        (_, KeyCode::Char('C')) => clear_completed(app),
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }
        _ => {}
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible_len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}

fn toggle_at_cursor(app: &mut App) {
    let Some(id) = app.cursor_id() else {
        return;
    };
    let result = app.store.toggle(id);
    app.report(result);
    // The task may have left the filtered view
    app.clamp_cursor();
}

fn delete_at_cursor(app: &mut App) {
    let visible = app.store.visible();
    let requested = app.sequencer.request(app.cursor, &visible).is_some();
    drop(visible);
    if requested && app.poll_timeout().is_zero() {
        // Zero delay: nothing to animate
        app.tick();
    }
}

fn clear_completed(app: &mut App) {
    let current = app.cursor_id();
    let result = app.store.clear_completed();
    if let Some(n) = app.report(result)
        && n > 0
    {
        app.status_message = Some(format!("cleared {} completed task{}", n, plural(n)));
        match current {
            Some(id) => app.focus(id),
            None => app.clamp_cursor(),
        }
    }
}
