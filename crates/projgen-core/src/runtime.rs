//! Task runtime: executes tasks from the task graph

use std::path::Path;

use indexmap::IndexMap;

use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::exec::{CommandRunner, ShellCommand};
use crate::tasks::{EnvValue, Task, TaskStep, Tasks};

/// Runs tasks in a project directory.
///
/// Deferred environment values are evaluated here, once per task run, by
/// running their command through the runner and taking trimmed stdout.
pub struct TaskRuntime<'a> {
    root: &'a Path,
    tasks: &'a Tasks,
    runner: &'a dyn CommandRunner,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> TaskRuntime<'a> {
    pub fn new(
        root: &'a Path,
        tasks: &'a Tasks,
        runner: &'a dyn CommandRunner,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            root,
            tasks,
            runner,
            sink,
        }
    }

    /// Run a task and everything it spawns. Stops at the first failing step.
    pub fn run(&self, name: &str) -> Result<()> {
        self.run_inner(name, &mut Vec::new())
    }

    fn run_inner(&self, name: &str, stack: &mut Vec<String>) -> Result<()> {
        if stack.iter().any(|t| t == name) {
            stack.push(name.to_string());
            return Err(Error::TaskCycle {
                chain: stack.join(" -> "),
            });
        }

        let task = self
            .tasks
            .try_find(name)
            .ok_or_else(|| Error::TaskNotFound {
                name: name.to_string(),
            })?;

        stack.push(name.to_string());
        let env = self.resolve_env(task)?;

        for step in &task.steps {
            match step {
                TaskStep::Exec(command) => {
                    self.sink.info(&format!("{name} | {command}"));
                    let invocation = ShellCommand::new(command, self.root)
                        .with_env(env.clone())
                        .inherit_output();
                    self.runner.run(&invocation)?;
                }
                TaskStep::Spawn(child) => self.run_inner(child, stack)?,
                TaskStep::Say(message) => self.sink.info(&format!("{name} | {message}")),
            }
        }

        stack.pop();
        Ok(())
    }

    /// Resolve the global environment overlaid with the task's own.
    ///
    /// Deferred expressions see the parent process environment, not values
    /// resolved earlier in the same map.
    pub fn resolve_env(&self, task: &Task) -> Result<IndexMap<String, String>> {
        let mut merged: IndexMap<&String, &EnvValue> = IndexMap::new();
        for (key, value) in self.tasks.env().iter().chain(task.env.iter()) {
            merged.insert(key, value);
        }

        let mut resolved = IndexMap::new();
        for (key, value) in merged {
            let text = match value.command() {
                Some(command) => self
                    .runner
                    .run(&ShellCommand::new(command, self.root))
                    .map_err(|e| Error::EnvEvaluation {
                        key: key.clone(),
                        source: Box::new(e),
                    })?
                    .trim()
                    .to_string(),
                None => value.as_str().to_string(),
            };
            resolved.insert(key.clone(), text);
        }
        Ok(resolved)
    }
}
