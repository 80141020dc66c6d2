use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Open the input bar for a new task
pub fn begin_add(app: &mut App) {
    app.mode = Mode::Add;
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.edit_target = None;
}

/// Edit the task under the cursor in place
pub fn begin_edit(app: &mut App) {
    let Some(id) = app.cursor_id() else {
        return;
    };
    let Some(task) = app.store.list().get(id) else {
        return;
    };
    app.edit_buffer = task.text.clone();
    app.edit_cursor = app.edit_buffer.len();
    app.edit_target = Some(id);
    app.mode = Mode::Edit;
}

fn finish(app: &mut App) {
    app.mode = Mode::Navigate;
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.edit_target = None;
}

fn confirm(app: &mut App) {
    match app.mode {
        Mode::Add => {
            let text = std::mem::take(&mut app.edit_buffer);
            app.edit_cursor = 0;
            let result = app.store.add(&text);
            match app.report(result) {
                // Stay in the input bar for the next task
                Some(Some(id)) => app.focus(id),
                // Blank input closes the bar
                Some(None) => finish(app),
                None => {}
            }
        }
        Mode::Edit => {
            if let Some(id) = app.edit_target {
                let text = app.edit_buffer.clone();
                let result = app.store.edit(id, &text);
                app.report(result);
                if app.store.list().get(id).is_some() {
                    app.focus(id);
                } else {
                    // Changed on disk while we were typing; keep the text visible
                    app.clamp_cursor();
                    app.status_message =
                        Some(format!("task changed on disk; edit not saved: {}", text.trim()));
                }
            }
            finish(app);
        }
        Mode::Navigate => {}
    }
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Enter => confirm(app),
        KeyCode::Esc => finish(app),

        // Word movement: Alt+Left/Right, Alt+b/f
        KeyCode::Left if alt => {
            app.edit_cursor = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Right if alt => {
            app.edit_cursor = unicode::word_boundary_right(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Char('b') if alt => {
            app.edit_cursor = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Char('f') if alt => {
            app.edit_cursor = unicode::word_boundary_right(&app.edit_buffer, app.edit_cursor);
        }

        KeyCode::Left => {
            if let Some(pos) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = pos;
            }
        }
        KeyCode::Right => {
            if let Some(pos) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = pos;
            }
        }
        KeyCode::Home => app.edit_cursor = 0,
        KeyCode::End => app.edit_cursor = app.edit_buffer.len(),
        KeyCode::Char('a') if ctrl => app.edit_cursor = 0,
        KeyCode::Char('e') if ctrl => app.edit_cursor = app.edit_buffer.len(),

        // Deletion
        KeyCode::Backspace if alt => delete_word_back(app),
        KeyCode::Char('w') if ctrl => delete_word_back(app),
        KeyCode::Char('u') if ctrl => {
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
        }
        KeyCode::Backspace => {
            if let Some(pos) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(pos..app.edit_cursor);
                app.edit_cursor = pos;
            }
        }
        KeyCode::Delete => {
            if let Some(end) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(app.edit_cursor..end);
            }
        }

        KeyCode::Char(c) if !ctrl && !alt => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn delete_word_back(app: &mut App) {
    let start = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
    app.edit_buffer.drain(start..app.edit_cursor);
    app.edit_cursor = start;
}
