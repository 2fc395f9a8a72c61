//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// projgen - Synthesize and drive Poetry-managed Python projects
#[derive(Parser, Debug)]
#[command(name = "projgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true, env = "PROJGEN_DIR")]
    pub dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate project files from projgen.toml
    ///
    /// Writes pyproject.toml, poetry.toml, .gitignore and the task manifest,
    /// then sets up the Poetry environment and installs dependencies.
    ///
    /// Examples:
    ///   projgen synth                  # Generate, provision and install
    ///   projgen synth --no-post-synth  # Only write files
    Synth {
        /// Skip environment setup and dependency installation
        #[arg(long)]
        no_post_synth: bool,
    },

    /// Run a task from the task manifest
    ///
    /// Examples:
    ///   projgen run install
    ///   projgen run publish:test
    Run {
        /// Name of the task
        task: String,
    },

    /// List available tasks
    Tasks,

    /// Add a dependency to projgen.toml
    ///
    /// Examples:
    ///   projgen add requests@^2.31     # Runtime dependency
    ///   projgen add pytest@^7.0 --dev  # Development dependency
    ///   projgen add click              # Any version
    Add {
        /// Dependency spec, `<name>@<constraint>`
        spec: String,

        /// Add as a development dependency
        #[arg(short, long)]
        dev: bool,
    },
}
