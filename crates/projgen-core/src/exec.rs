//! Shell command execution
//!
//! Components never spawn processes directly; they hand a [`ShellCommand`]
//! to a [`CommandRunner`]. Production code uses [`ShellRunner`], tests use a
//! scripted fake.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// How a command's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout and return it
    Capture,
    /// Stream to the parent's stdout/stderr
    Inherit,
}

/// A single shell invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// Command line passed to the shell
    pub line: String,
    /// Working directory
    pub cwd: PathBuf,
    /// Extra environment, layered over the parent environment
    pub env: IndexMap<String, String>,
    pub output: OutputMode,
}

impl ShellCommand {
    /// Build a command that captures stdout.
    pub fn new(line: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            line: line.into(),
            cwd: cwd.as_ref().to_path_buf(),
            env: IndexMap::new(),
            output: OutputMode::Capture,
        }
    }

    pub fn with_env(mut self, env: IndexMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn inherit_output(mut self) -> Self {
        self.output = OutputMode::Inherit;
        self
    }
}

/// Executes shell commands on behalf of components.
pub trait CommandRunner: Send + Sync {
    /// Whether `program` resolves on the current search path.
    fn is_available(&self, program: &str) -> bool;

    /// Run a command to completion.
    ///
    /// Returns captured stdout (empty for [`OutputMode::Inherit`]); a
    /// non-zero exit is an [`Error::CommandFailed`].
    fn run(&self, command: &ShellCommand) -> Result<String>;
}

/// Runs commands through the platform shell (`sh -c` / `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell(line: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", line]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", line]);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, command: &ShellCommand) -> Result<String> {
        let mut cmd = Self::shell(&command.line);
        cmd.current_dir(&command.cwd).envs(&command.env);

        tracing::debug!(command = %command.line, cwd = %command.cwd.display(), "Running command");

        let spawn_err = |source| Error::CommandSpawn {
            command: command.line.clone(),
            source,
        };

        match command.output {
            OutputMode::Capture => {
                let output = cmd
                    .stdin(Stdio::null())
                    .output()
                    .map_err(spawn_err)?;
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    Err(Error::CommandFailed {
                        command: command.line.clone(),
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    })
                }
            }
            OutputMode::Inherit => {
                let status = cmd.status().map_err(spawn_err)?;
                if status.success() {
                    Ok(String::new())
                } else {
                    Err(Error::CommandFailed {
                        command: command.line.clone(),
                        code: status.code(),
                        stderr: String::new(),
                    })
                }
            }
        }
    }
}
