//! Error types for projgen-core

/// Result type for projgen-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in projgen-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Dependency spec could not be parsed
    #[error("Invalid dependency spec '{spec}': {reason}")]
    InvalidDependencySpec { spec: String, reason: String },

    /// A task with the same name is already registered
    #[error("Task already exists: {name}")]
    TaskExists { name: String },

    /// Requested task is not registered
    #[error("Task not found: {name}")]
    TaskNotFound { name: String },

    /// Spawn steps form a loop
    #[error("Task cycle detected: {chain}")]
    TaskCycle { chain: String },

    /// The shell could not be started for a command
    #[error("Failed to start `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A command ran and exited unsuccessfully
    #[error("Command `{command}` failed (exit code {}): {stderr}", display_code(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A deferred environment expression failed at task-run time
    #[error("Unable to evaluate environment variable {key}: {source}")]
    EnvEvaluation {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// A generated file could not be rendered
    #[error("Cannot render {path}: {message}")]
    Render { path: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from projgen-fs
    #[error(transparent)]
    Fs(#[from] projgen_fs::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}
