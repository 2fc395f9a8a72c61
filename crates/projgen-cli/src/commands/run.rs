//! Task commands: run one task or list them all
//!
//! Both read `.projgen/tasks.json`, so they work without re-reading
//! `projgen.toml`.

use std::path::Path;

use colored::Colorize;
use projgen_core::{ShellRunner, TaskRuntime, Tasks, TracingSink};
use projgen_fs::{NormalizedPath, ProjectPath, io};

use crate::error::{CliError, Result};

fn load_tasks(path: &Path) -> Result<Tasks> {
    let manifest = NormalizedPath::new(path).join(ProjectPath::TasksManifest.as_str());
    if !manifest.is_file() {
        return Err(CliError::user(format!(
            "No task manifest at {}. Run `projgen synth` first.",
            manifest
        )));
    }
    Ok(Tasks::from_manifest(&io::read_text(&manifest)?)?)
}

/// Run the run command
pub fn run_task(path: &Path, name: &str) -> Result<()> {
    let tasks = load_tasks(path)?;
    if tasks.try_find(name).is_none() {
        let known: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        return Err(CliError::user(format!(
            "Unknown task '{}'. Available tasks: {}",
            name,
            known.join(", ")
        )));
    }

    let runner = ShellRunner::new();
    TaskRuntime::new(path, &tasks, &runner, &TracingSink).run(name)?;
    Ok(())
}

/// Run the tasks command
pub fn run_list_tasks(path: &Path) -> Result<()> {
    let tasks = load_tasks(path)?;
    let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0);

    for task in tasks.iter() {
        let name = format!("{:<width$}", task.name);
        println!(
            "{}  {}",
            name.cyan(),
            task.description.as_deref().unwrap_or("").dimmed()
        );
    }
    Ok(())
}
