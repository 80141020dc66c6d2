use clap::{Args, Parser, Subcommand};

use crate::model::FilterMode;

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] ticklist v", env!("CARGO_PKG_VERSION"), " - one list, no fuss"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a .ticklist/ directory here
    Init(InitArgs),
    /// Add a task to the end of the list
    Add(AddArgs),
    /// List tasks with their positions
    List(ListArgs),
    /// Mark a task completed, or active again
    Toggle(PositionArgs),
    /// Change a task's text
    Edit(EditArgs),
    /// Delete a task
    Rm(PositionArgs),
    /// Delete every completed task
    Clear,
    /// Show how many tasks are left
    Stats,
}

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if .ticklist/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (all, active, completed)
    #[arg(long, short, default_value = "all")]
    pub filter: FilterMode,
}

/// A position in the list as printed by `tk list` with the same filter
#[derive(Args)]
pub struct PositionArgs {
    /// 1-based position
    pub pos: usize,
    /// Filter the position refers to
    #[arg(long, short, default_value = "all")]
    pub filter: FilterMode,
}

#[derive(Args)]
pub struct EditArgs {
    /// 1-based position
    pub pos: usize,
    /// New text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Filter the position refers to
    #[arg(long, short, default_value = "all")]
    pub filter: FilterMode,
}
