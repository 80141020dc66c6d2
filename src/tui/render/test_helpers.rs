use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::io::slot::MemorySlot;
use crate::io::store::{TaskStore, encode};
use crate::model::TaskRecord;
use crate::ops::sequencer::{DEFAULT_DELETE_DELAY, DeleteSequencer, ManualClock};
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;

/// Render into an in-memory buffer and return it.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over an in-memory slot holding the given tasks, with a
/// manual clock driving deferred deletes.
pub fn app_with_tasks(tasks: &[(&str, bool)]) -> (App, ManualClock) {
    let records: Vec<TaskRecord> = tasks
        .iter()
        .map(|(text, done)| TaskRecord::new(*text, *done))
        .collect();
    let slot = MemorySlot::with_value("tasks", &encode(&records).unwrap());
    let store = TaskStore::open(Box::new(slot), "tasks");
    let clock = ManualClock::new();
    let sequencer = DeleteSequencer::with_clock(DEFAULT_DELETE_DELAY, Box::new(clock.clone()));
    (
        App::with_sequencer(store, Theme::default(), sequencer),
        clock,
    )
}

/// (text, completed) for every task in store order
pub fn task_texts(app: &App) -> Vec<(&str, bool)> {
    app.store
        .tasks()
        .iter()
        .map(|t| (t.text.as_str(), t.completed))
        .collect()
}
