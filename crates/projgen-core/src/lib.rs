//! Project model for projgen
//!
//! A project is a tree of composable components. Each component contributes
//! dependencies, tasks and generated files to a shared [`ProjectModel`]; the
//! [`Project`] drives synthesis and the post-synthesis lifecycle phase.
//!
//! # Architecture
//!
//! ```text
//!                 projgen-cli
//!                      |
//!               projgen-python  (components)
//!                      |
//!                projgen-core   (model, tasks, runtime)
//!                      |
//!                 projgen-fs
//! ```
//!
//! External processes and user-facing diagnostics go through the
//! [`CommandRunner`] and [`DiagnosticSink`] traits so that every component
//! can be driven by fakes in tests.

pub mod casing;
pub mod component;
pub mod deps;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod files;
pub mod project;
pub mod runtime;
pub mod tasks;

pub use casing::{decamelize, decamelize_keys, decamelize_table};
pub use component::Component;
pub use deps::{Dependencies, Dependency, DependencyKind, DependencySpec};
pub use diagnostics::{DiagnosticSink, Level, TracingSink};
pub use error::{Error, Result};
pub use exec::{CommandRunner, OutputMode, ShellCommand, ShellRunner};
pub use files::{FileContent, Files, GeneratedFile, GENERATED_MARKER};
pub use project::{Project, ProjectModel, ProjectOptions, SynthReport, WrittenFile};
pub use runtime::TaskRuntime;
pub use tasks::{EnvValue, Task, TaskStep, Tasks};
