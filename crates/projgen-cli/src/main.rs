//! projgen CLI
//!
//! Synthesizes Poetry-managed Python projects from `projgen.toml` and runs
//! their tasks.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::Path;

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
    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => {
            let dir = match cli.dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            execute_command(&dir, cmd)
        }
        None => {
            println!(
                "{} Poetry project generator",
                "projgen".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "projgen --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(dir: &Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Synth { no_post_synth } => commands::run_synth(dir, no_post_synth),
        Commands::Run { task } => commands::run_task(dir, &task),
        Commands::Tasks => commands::run_list_tasks(dir),
        Commands::Add { spec, dev } => commands::run_add(dir, &spec, dev),
    }
}
