mod init;
pub use init::cmd_init;

use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::FileLock;
use crate::io::slot::DirSlot;
use crate::io::store::TaskStore;
use crate::io::workspace_io::{self, WorkspaceError};
use crate::model::{FilterMode, TaskId, Workspace};
use crate::ops::projector;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = cli.dir.as_deref();

    match cli.command {
        // `tk` without a subcommand launches the TUI in main.rs
        None => Err("no command given (try `tk --help`)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, dir),

            // Read commands
            Commands::List(args) => cmd_list(args, dir, json),
            Commands::Stats => cmd_stats(dir, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, dir, json),
            Commands::Toggle(args) => cmd_toggle(args, dir, json),
            Commands::Edit(args) => cmd_edit(args, dir, json),
            Commands::Rm(args) => cmd_rm(args, dir, json),
            Commands::Clear => cmd_clear(dir, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_workspace(dir: Option<&str>) -> Result<Workspace, WorkspaceError> {
    let start = match dir {
        Some(d) => std::fs::canonicalize(d).map_err(|e| WorkspaceError::ReadError {
            path: PathBuf::from(d),
            source: e,
        })?,
        None => std::env::current_dir()?,
    };
    workspace_io::open_workspace(&start)
}

/// Open the task store of a workspace. The caller holds the lock if it
/// intends to write.
fn open_store(workspace: &Workspace) -> TaskStore {
    let slot = DirSlot::new(&workspace.data_dir);
    TaskStore::open(Box::new(slot), workspace.config.storage.key.clone())
}

/// Resolve a 1-based position under `filter` to a task id.
fn resolve_position(
    store: &TaskStore,
    pos: usize,
    filter: FilterMode,
) -> Result<TaskId, Box<dyn std::error::Error>> {
    let visible = crate::ops::filter::visible(store.tasks(), filter);
    pos.checked_sub(1)
        .and_then(|i| projector::id_at(i, &visible))
        .ok_or_else(|| {
            let n = visible.len();
            let plural = if n == 1 { "" } else { "s" };
            let shown = match filter {
                FilterMode::All => format!("{} task{}", n, plural),
                other => format!("{} {} task{}", n, other, plural),
            };
            format!("no task at position {} ({})", pos, shown).into()
        })
}

/// The task with `id` as it appears under `filter`, for output
fn task_json(store: &TaskStore, id: TaskId, filter: FilterMode) -> Option<TaskJson> {
    let visible = crate::ops::filter::visible(store.tasks(), filter);
    let pos = projector::visual_position_of(id, &visible)?;
    Some(task_to_json(pos + 1, &visible[pos]))
}

fn print_change(change: ChangeJson, json: bool, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&change)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let store = open_store(&workspace);
    let visible = crate::ops::filter::visible(store.tasks(), args.filter);
    let summary = store.summary();

    if json {
        let output = list_to_json(args.filter, &visible, summary);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_list(args.filter, &visible, &summary) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let store = open_store(&workspace);
    let summary = store.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in format_stats(&summary) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let _lock = FileLock::acquire_default(&workspace.data_dir)?;
    let mut store = open_store(&workspace);

    let text = args.text.join(" ");
    let Some(id) = store.add(&text)? else {
        // Blank input is rejected without touching the list
        eprintln!("nothing to add: task text is empty");
        return print_change(
            ChangeJson {
                action: "add",
                changed: false,
                task: None,
                cleared: None,
                summary: store.summary(),
            },
            json,
            "no task added",
        );
    };

    let task = task_json(&store, id, FilterMode::All);
    let line = task
        .as_ref()
        .map(|t| format!("added {}. {}", t.pos, t.text))
        .unwrap_or_default();
    print_change(
        ChangeJson {
            action: "add",
            changed: true,
            task,
            cleared: None,
            summary: store.summary(),
        },
        json,
        &line,
    )
}

fn cmd_toggle(
    args: PositionArgs,
    dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let _lock = FileLock::acquire_default(&workspace.data_dir)?;
    let mut store = open_store(&workspace);

    let id = resolve_position(&store, args.pos, args.filter)?;
    let changed = store.toggle(id)?;

    let task = task_json(&store, id, FilterMode::All);
    let line = match store.list().get(id) {
        Some(t) if t.completed => format!("completed: {}", t.text),
        Some(t) => format!("reopened: {}", t.text),
        None => String::new(),
    };
    print_change(
        ChangeJson {
            action: "toggle",
            changed,
            task,
            cleared: None,
            summary: store.summary(),
        },
        json,
        &line,
    )
}

fn cmd_edit(args: EditArgs, dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let _lock = FileLock::acquire_default(&workspace.data_dir)?;
    let mut store = open_store(&workspace);

    let id = resolve_position(&store, args.pos, args.filter)?;
    let changed = store.edit(id, &args.text.join(" "))?;

    let line = match store.list().get(id) {
        Some(t) if changed => format!("edited: {}", t.text),
        Some(t) => {
            eprintln!("text unchanged (new text is empty or identical)");
            format!("unchanged: {}", t.text)
        }
        None => String::new(),
    };
    print_change(
        ChangeJson {
            action: "edit",
            changed,
            task: task_json(&store, id, FilterMode::All),
            cleared: None,
            summary: store.summary(),
        },
        json,
        &line,
    )
}

fn cmd_rm(args: PositionArgs, dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let _lock = FileLock::acquire_default(&workspace.data_dir)?;
    let mut store = open_store(&workspace);

    let id = resolve_position(&store, args.pos, args.filter)?;
    // Capture the task before it disappears
    let task = task_json(&store, id, args.filter);
    let text = store
        .list()
        .get(id)
        .map(|t| t.text.clone())
        .unwrap_or_default();
    let changed = store.remove(id)?;

    print_change(
        ChangeJson {
            action: "rm",
            changed,
            task,
            cleared: None,
            summary: store.summary(),
        },
        json,
        &format!("deleted: {}", text),
    )
}

fn cmd_clear(dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace(dir)?;
    let _lock = FileLock::acquire_default(&workspace.data_dir)?;
    let mut store = open_store(&workspace);

    let n = store.clear_completed()?;
    let line = match n {
        0 => "no completed tasks".to_string(),
        1 => "cleared 1 completed task".to_string(),
        n => format!("cleared {} completed tasks", n),
    };
    print_change(
        ChangeJson {
            action: "clear",
            changed: n > 0,
            task: None,
            cleared: Some(n),
            summary: store.summary(),
        },
        json,
        &line,
    )
}
