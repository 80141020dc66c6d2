use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::slot::DirSlot;
use crate::io::store::{StoreError, TaskStore};
use crate::io::watcher::SnapshotWatcher;
use crate::io::workspace_io::open_workspace;
use crate::model::{Config, FilterMode, TaskId};
use crate::ops::projector;
use crate::ops::sequencer::{DeleteSequencer, DeleteState};

use super::input;
use super::render;
use super::theme::Theme;

/// Upper bound on how long the event loop blocks waiting for input
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task in the input bar
    Add,
    /// Editing the text of an existing task in place
    Edit,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub sequencer: DeleteSequencer,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor as a visual position in the filtered list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Text being typed (Add and Edit modes)
    pub edit_buffer: String,
    /// Byte offset of the edit cursor in `edit_buffer`
    pub edit_cursor: usize,
    /// Task being edited (Edit mode)
    pub edit_target: Option<TaskId>,
    /// One-line message shown in the status row until the next key press
    pub status_message: Option<String>,
    pub show_help: bool,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        let sequencer = DeleteSequencer::new(Duration::from_millis(config.ui.delete_delay_ms));
        let mut app = App::with_sequencer(store, Theme::from_config(&config.ui), sequencer);
        app.show_key_hints = config.ui.show_key_hints;
        app
    }

    pub fn with_sequencer(store: TaskStore, theme: Theme, sequencer: DeleteSequencer) -> Self {
        App {
            store,
            sequencer,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            status_message: None,
            show_help: false,
            show_key_hints: false,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.store.visible().len()
    }

    /// Id of the task under the cursor
    pub fn cursor_id(&self) -> Option<TaskId> {
        projector::id_at(self.cursor, &self.store.visible())
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Move the cursor onto `id` if it is visible, otherwise just clamp
    pub fn focus(&mut self, id: TaskId) {
        match projector::visual_position_of(id, &self.store.visible()) {
            Some(pos) => self.cursor = pos,
            None => self.clamp_cursor(),
        }
    }

    /// Switch filter, keeping the cursor on the same task when it stays visible
    pub fn set_filter(&mut self, mode: FilterMode) {
        let current = self.cursor_id();
        self.store.set_filter(mode);
        match current {
            Some(id) => self.focus(id),
            None => self.clamp_cursor(),
        }
    }

    /// Unwrap a store result, turning a write failure into a status message
    pub fn report<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.status_message = Some(format!("save failed: {}", e));
                None
            }
        }
    }

    /// Run deletes whose exit phase is over
    pub fn tick(&mut self) {
        let current = self.cursor_id();
        let store = &mut self.store;
        let result = self.sequencer.fire_due(|id| store.remove(id));
        if let Some(settled) = self.report(result)
            && !settled.is_empty()
        {
            let skipped = settled
                .iter()
                .filter(|s| s.state == DeleteState::Skipped)
                .count();
            if skipped > 0 {
                self.status_message = Some(format!(
                    "{} pending delete(s) skipped: task changed on disk",
                    skipped
                ));
            }
            match current {
                Some(id) if self.store.list().get(id).is_some() => self.focus(id),
                _ => self.clamp_cursor(),
            }
        }
    }

    /// Finish pending deletes immediately (on quit)
    pub fn flush_pending(&mut self) {
        let store = &mut self.store;
        let result = self.sequencer.fire_all(|id| store.remove(id));
        self.report(result);
    }

    /// Pick up a snapshot written by another process
    pub fn reload_from_disk(&mut self) {
        let current = self.cursor_id();
        if !self.store.reload() {
            return;
        }
        match current {
            Some(id) => self.focus(id),
            None => self.clamp_cursor(),
        }
        let target_gone = self
            .edit_target
            .is_some_and(|id| self.store.list().get(id).is_none());
        if self.mode == Mode::Edit && target_gone {
            self.mode = Mode::Navigate;
            self.edit_target = None;
            self.status_message = Some("tasks changed on disk; edit discarded".into());
        } else {
            self.status_message = Some("reloaded: tasks changed on disk".into());
        }
    }

    /// How long the event loop may block before the next delete is due
    pub fn poll_timeout(&self) -> Duration {
        match self.sequencer.time_until_next() {
            Some(due) => due.min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }
}

/// Run the TUI application
pub fn run(start_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match start_dir {
        Some(dir) => Path::new(dir).to_path_buf(),
        None => std::env::current_dir()?,
    };
    let workspace = open_workspace(&start)?;
    let key = workspace.config.storage.key.clone();
    let slot = DirSlot::locking(&workspace.data_dir);
    let snapshot_path = slot.path_for(&key);
    let store = TaskStore::open(Box::new(slot), key);

    let mut app = App::new(store, &workspace.config);
    // Without a watcher the TUI still works; it just won't see CLI writes live.
    let watcher = SnapshotWatcher::start(&workspace.data_dir, &snapshot_path).ok();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());
    app.flush_pending();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(msg) = app.status_message.take()
        && msg.starts_with("save failed")
    {
        eprintln!("warning: {}", msg);
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&SnapshotWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout())?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.tick();

        if let Some(w) = watcher
            && !w.poll().is_empty()
        {
            app.reload_from_disk();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
