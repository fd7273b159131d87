//! ConfSync CLI
//!
//! Keeps a local working copy in step with a remote git repository and
//! distributes its files according to `config.json`.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run { target, json } => {
            commands::run_pipeline(&target.remote, &target.dir.dir, json)
        }
        Commands::Sync { target, json } => commands::run_sync(&target.remote, &target.dir.dir, json),
        Commands::Apply { dir, json } => commands::run_apply(&dir.dir, json),
        Commands::Check { dir, json } => commands::run_check(&dir.dir, json),
    }
}
