//! Poetry-managed Python projects for projgen.
//!
//! The [`Poetry`] component turns the project's generic dependency registry
//! and packaging metadata into `pyproject.toml`, registers the install,
//! package and publish tasks, and provisions the virtual environment after
//! synthesis.

pub mod env;
pub mod error;
pub mod manifest;
pub mod poetry;
pub mod project;
pub mod pyproject;
pub mod synth;

pub use env::{EnvironmentProvisioner, ProvisionOutcome, ProvisionState};
pub use error::{Error, Result};
pub use manifest::PythonManifest;
pub use poetry::Poetry;
pub use project::{PythonProject, PythonProjectOptions};
pub use pyproject::{Author, PackagingMetadata};
pub use synth::{DependencyMap, synth_dev_dependencies, synth_runtime_dependencies};
