//! Poetry virtual environment provisioning
//!
//! The provisioner is idempotent: it asks Poetry for the project's
//! environment path and only creates an environment when none resolves.
//!
//! ```text
//! Unknown -> CheckingTool -> AbsentTool ------------------------> Done
//!                         -> CheckingEnv -> EnvExists ----------> Done
//!                                        -> CreatingEnv -------> Done
//! ```
//!
//! A missing `poetry` executable is advisory. A failed environment query
//! means "no environment yet". Only a failed creation command is an error.

use std::path::Path;

use projgen_core::{CommandRunner, DiagnosticSink, Result, ShellCommand};

/// Executable looked up on the search path.
pub const POETRY_BIN: &str = "poetry";

/// Prints the project's environment path, or fails when there is none.
pub const ENV_PATH_COMMAND: &str = "poetry env info -p";

/// Creates an environment bound to the default interpreter.
pub const ENV_CREATE_COMMAND: &str = "poetry env use python";

pub(crate) const TOOL_MISSING_MESSAGE: &str = "Unable to setup an environment since poetry is not installed. Please install poetry (https://python-poetry.org/docs/) or use a different component for managing environments such as 'venv'.";

pub(crate) const SETTING_UP_MESSAGE: &str = "Setting up a virtual environment...";

/// Where the provisioner is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    Unknown,
    CheckingTool,
    AbsentTool,
    CheckingEnv,
    EnvExists,
    CreatingEnv,
    Done,
}

/// How a provisioning run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// `poetry` is not on the search path; nothing was attempted
    ToolMissing,
    /// An environment already existed at this path; nothing was changed
    Existing(String),
    /// An environment was created; the path is `None` if Poetry still could
    /// not report it afterwards
    Created(Option<String>),
}

/// Ensures a Poetry environment exists for a project directory.
pub struct EnvironmentProvisioner<'a> {
    root: &'a Path,
    runner: &'a dyn CommandRunner,
    sink: &'a dyn DiagnosticSink,
    state: ProvisionState,
}

impl<'a> EnvironmentProvisioner<'a> {
    pub fn new(
        root: &'a Path,
        runner: &'a dyn CommandRunner,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            root,
            runner,
            sink,
            state: ProvisionState::Unknown,
        }
    }

    pub fn state(&self) -> ProvisionState {
        self.state
    }

    /// Run the state machine to completion.
    ///
    /// Safe to call any number of times: an existing environment is only
    /// queried, never recreated.
    pub fn ensure(&mut self) -> Result<ProvisionOutcome> {
        self.transition(ProvisionState::CheckingTool);
        if !self.runner.is_available(POETRY_BIN) {
            self.transition(ProvisionState::AbsentTool);
            self.sink.info(TOOL_MISSING_MESSAGE);
            self.transition(ProvisionState::Done);
            return Ok(ProvisionOutcome::ToolMissing);
        }

        self.transition(ProvisionState::CheckingEnv);
        if let Some(path) = self.env_path() {
            self.transition(ProvisionState::EnvExists);
            tracing::debug!(path = %path, "Poetry environment already exists");
            self.transition(ProvisionState::Done);
            return Ok(ProvisionOutcome::Existing(path));
        }

        self.transition(ProvisionState::CreatingEnv);
        self.sink.info(SETTING_UP_MESSAGE);
        self.runner
            .run(&ShellCommand::new(ENV_CREATE_COMMAND, self.root))?;

        let path = self.env_path();
        self.sink.info(&format!(
            "Environment successfully created (located in {}).",
            path.as_deref().unwrap_or("an unknown location")
        ));
        self.transition(ProvisionState::Done);
        Ok(ProvisionOutcome::Created(path))
    }

    /// Ask Poetry for the environment path. Failure or empty output both
    /// mean "absent".
    fn env_path(&self) -> Option<String> {
        match self
            .runner
            .run(&ShellCommand::new(ENV_PATH_COMMAND, self.root))
        {
            Ok(stdout) => {
                let path = stdout.trim();
                (!path.is_empty()).then(|| path.to_string())
            }
            Err(e) => {
                tracing::debug!(error = %e, "No Poetry environment resolved");
                None
            }
        }
    }

    fn transition(&mut self, next: ProvisionState) {
        tracing::trace!(from = ?self.state, to = ?next, "Provisioner transition");
        self.state = next;
    }
}
