use clap::Parser;
use ticklist::cli::commands::{Cli, Commands};
use ticklist::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let dir = cli.dir.clone();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => ticklist::tui::run(dir.as_deref()),
        // Init runs before workspace discovery
        Some(Commands::Init(args)) => handlers::cmd_init(args, dir.as_deref()),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
