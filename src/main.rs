use std::path::Path;

use clap::Parser;
use agenda::cli::commands::Cli;
use agenda::cli::handlers;
use agenda::io::store::{FileStore, load_or_default, resolve_state_path};
use agenda::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref().map(Path::new))?;
    if let Err(e) = logging::init_logging(&config.log) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let state_path = resolve_state_path(cli.data.as_deref().map(Path::new), &config);
    let backend = FileStore::new(state_path);
    tracing::debug!(path = %backend.path().display(), "using state file");

    match cli.command {
        // No subcommand → launch TUI
        None => {
            let store = load_or_default(&backend)?;
            agenda::tui::run(store, Box::new(backend), config)
        }
        Some(command) => handlers::dispatch(command, cli.json, &backend),
    }
}
