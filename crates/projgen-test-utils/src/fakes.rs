//! Test doubles for the command runner and diagnostic sink.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use projgen_core::{CommandRunner, DiagnosticSink, Error, Level, Result, ShellCommand};

#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Failure { code: i32, stderr: String },
}

/// A [`CommandRunner`] with scripted responses.
///
/// Responses are queued per command line. The last queued response for a
/// line is sticky: once the queue is down to one entry it is returned for
/// every further call. Unscripted commands succeed with empty output.
///
/// ```rust
/// use projgen_test_utils::FakeRunner;
///
/// let runner = FakeRunner::new().with_program("poetry");
/// runner.respond("poetry env info -p", "");
/// runner.respond("poetry env info -p", "/envs/demo-py3.12");
/// ```
#[derive(Debug, Default)]
pub struct FakeRunner {
    programs: Mutex<HashSet<String>>,
    responses: Mutex<HashMap<String, VecDeque<Response>>>,
    calls: Mutex<Vec<ShellCommand>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` resolvable on the fake search path.
    pub fn with_program(self, program: &str) -> Self {
        self.programs.lock().unwrap().insert(program.to_string());
        self
    }

    /// Queue a successful response for `line`.
    pub fn respond(&self, line: &str, stdout: &str) -> &Self {
        self.queue(line, Response::Output(stdout.to_string()))
    }

    /// Queue a failing response for `line`.
    pub fn fail(&self, line: &str, code: i32, stderr: &str) -> &Self {
        self.queue(
            line,
            Response::Failure {
                code,
                stderr: stderr.to_string(),
            },
        )
    }

    fn queue(&self, line: &str, response: Response) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(line.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<ShellCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines run so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.line).collect()
    }

    /// How many times `line` was run.
    pub fn count(&self, line: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.line == line).count()
    }
}

impl CommandRunner for FakeRunner {
    fn is_available(&self, program: &str) -> bool {
        self.programs.lock().unwrap().contains(program)
    }

    fn run(&self, command: &ShellCommand) -> Result<String> {
        self.calls.lock().unwrap().push(command.clone());

        let response = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(&command.line) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match response {
            None => Ok(String::new()),
            Some(Response::Output(stdout)) => Ok(stdout),
            Some(Response::Failure { code, stderr }) => Err(Error::CommandFailed {
                command: command.line.clone(),
                code: Some(code),
                stderr,
            }),
        }
    }
}

/// A [`DiagnosticSink`] that keeps every message.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// Messages at `level`, in order.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|(_, m)| m.contains(needle))
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, level: Level, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}
