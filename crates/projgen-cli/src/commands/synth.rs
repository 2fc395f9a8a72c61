//! Synth command implementation

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use projgen_core::{ShellRunner, TracingSink};
use projgen_fs::WriteOutcome;
use projgen_python::{PythonManifest, PythonProject};

use crate::error::Result;

/// Run the synth command
///
/// Loads `projgen.toml`, writes every generated file and, unless
/// `no_post_synth` is set or the manifest disables it, provisions the
/// environment and installs dependencies.
pub fn run_synth(path: &Path, no_post_synth: bool) -> Result<()> {
    let manifest = PythonManifest::load(path)?;
    println!(
        "{} Synthesizing {}",
        "=>".blue().bold(),
        manifest.project.name.cyan()
    );

    let mut options = manifest.into_options(path);
    if no_post_synth {
        options.post_synth = false;
    }

    let mut project = PythonProject::new(
        options,
        Arc::new(ShellRunner::new()),
        Arc::new(TracingSink),
    )?;
    let report = project.synth()?;

    for file in &report.files {
        match file.outcome {
            WriteOutcome::Created => println!("   {} {}", "created".green(), file.path),
            WriteOutcome::Updated => println!("   {} {}", "updated".yellow(), file.path),
            WriteOutcome::Unchanged => {}
        }
        tracing::debug!(file = %file.path, checksum = %file.checksum, "Generated");
    }

    if report.changed().next().is_none() {
        println!("{} Project files are up to date.", "OK".green().bold());
    } else {
        println!("{} Project synthesized.", "OK".green().bold());
    }
    Ok(())
}
