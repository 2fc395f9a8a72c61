//! Task graph: named tasks made of shell steps
//!
//! Tasks are registered by components at construction time and persisted to
//! `.projgen/tasks.json`. Environment values may be deferred shell
//! expressions (`$(...)`); those are only ever evaluated by the
//! [`TaskRuntime`](crate::runtime::TaskRuntime) when a task runs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Value bound to an environment variable for task execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnvValue {
    /// Passed to the process as-is
    Literal(String),
    /// `$(...)` shell expression, evaluated at task-run time
    Deferred(String),
}

impl EnvValue {
    /// Classify a raw value: anything wrapped in `$(` `)` is deferred.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.starts_with("$(") && raw.ends_with(')') {
            Self::Deferred(raw)
        } else {
            Self::Literal(raw)
        }
    }

    /// Build a deferred value from the command whose output becomes the value.
    pub fn deferred(command: &str) -> Self {
        Self::Deferred(format!("$({command})"))
    }

    /// The command to run for a deferred value.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Deferred(expr) => expr.strip_prefix("$(")?.strip_suffix(')'),
            Self::Literal(_) => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The raw text as written to the task manifest.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Deferred(s) => s,
        }
    }
}

impl From<String> for EnvValue {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<EnvValue> for String {
    fn from(value: EnvValue) -> Self {
        match value {
            EnvValue::Literal(s) | EnvValue::Deferred(s) => s,
        }
    }
}

/// One step of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStep {
    /// Run a shell command
    Exec(String),
    /// Run another task
    Spawn(String),
    /// Print a message
    Say(String),
}

/// A named unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub env: IndexMap<String, EnvValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<TaskStep>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            env: IndexMap::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a shell step.
    pub fn exec(&mut self, command: impl Into<String>) -> &mut Self {
        self.steps.push(TaskStep::Exec(command.into()));
        self
    }

    /// Append a step that runs another task.
    pub fn spawn(&mut self, task: impl Into<String>) -> &mut Self {
        self.steps.push(TaskStep::Spawn(task.into()));
        self
    }

    pub fn say(&mut self, message: impl Into<String>) -> &mut Self {
        self.steps.push(TaskStep::Say(message.into()));
        self
    }

    /// Bind an environment variable for this task only.
    pub fn env(&mut self, key: impl Into<String>, value: EnvValue) -> &mut Self {
        self.env.insert(key.into(), value);
        self
    }
}

/// All tasks of a project plus the environment shared by every task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tasks {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    env: IndexMap<String, EnvValue>,
    #[serde(default)]
    tasks: IndexMap<String, Task>,
}

impl Tasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Names are unique.
    pub fn add_task(&mut self, task: Task) -> Result<&mut Task> {
        if self.tasks.contains_key(&task.name) {
            return Err(Error::TaskExists { name: task.name });
        }
        let name = task.name.clone();
        Ok(self.tasks.entry(name).or_insert(task))
    }

    /// Register a task, replacing any task of the same name.
    pub fn set_task(&mut self, task: Task) -> &mut Task {
        let name = task.name.clone();
        self.tasks.insert(name.clone(), task);
        &mut self.tasks[&name]
    }

    pub fn try_find(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.get_mut(name)
    }

    /// Bind an environment variable for every task.
    ///
    /// The value is stored as given; deferred expressions stay unevaluated.
    pub fn add_environment(&mut self, key: impl Into<String>, value: EnvValue) {
        self.env.insert(key.into(), value);
    }

    pub fn env(&self) -> &IndexMap<String, EnvValue> {
        &self.env
    }

    /// Tasks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Load tasks from the content of a `.projgen/tasks.json` manifest.
    pub fn from_manifest(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize for the `.projgen/tasks.json` manifest.
    pub fn to_manifest(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
